use gift_draw::Participant;
use rocket::{http::Status, serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        auth::AuthToken,
        exchange::{ExchangeSummary, ExclusionRule, NewExchange, NewParticipant},
        store::ExchangeStore,
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        create_exchange,
        list_exchanges,
        get_exchange,
        delete_exchange,
        add_participant,
        add_exclusion,
        add_exclusion_rules,
    ]
}

fn no_such_exchange(id: u32) -> Error {
    Error::Status(
        Status::NotFound,
        format!("No exchange found with ID {id}"),
    )
}

#[post("/exchanges", data = "<new_exchange>", format = "json")]
pub async fn create_exchange(
    _token: AuthToken,
    new_exchange: Json<NewExchange>,
    store: &State<ExchangeStore>,
) -> Result<Json<ExchangeSummary>> {
    let id = store.create(new_exchange.0.name);
    store
        .with(id, |exchange| exchange.summary())
        .map(Json)
        .ok_or_else(|| no_such_exchange(id))
}

#[get("/exchanges")]
pub async fn list_exchanges(_token: AuthToken, store: &State<ExchangeStore>) -> Json<Vec<ExchangeSummary>> {
    Json(store.list())
}

#[get("/exchanges/<id>")]
pub async fn get_exchange(
    _token: AuthToken,
    id: u32,
    store: &State<ExchangeStore>,
) -> Result<Json<ExchangeSummary>> {
    store
        .with(id, |exchange| exchange.summary())
        .map(Json)
        .ok_or_else(|| no_such_exchange(id))
}

#[delete("/exchanges/<id>")]
pub async fn delete_exchange(_token: AuthToken, id: u32, store: &State<ExchangeStore>) -> Result<()> {
    if store.remove(id) {
        Ok(())
    } else {
        Err(no_such_exchange(id))
    }
}

/// Register a participant. The contact number was already validated by
/// deserialization; the roster rejects duplicate names.
#[post("/exchanges/<id>/participants", data = "<participant>", format = "json")]
pub async fn add_participant(
    _token: AuthToken,
    id: u32,
    participant: Json<NewParticipant>,
    store: &State<ExchangeStore>,
) -> Result<()> {
    let NewParticipant { name, contact } = participant.0;
    store
        .with_mut(id, |exchange| {
            exchange.roster.insert(Participant {
                name,
                contact: contact.to_string(),
            })
        })
        .ok_or_else(|| no_such_exchange(id))??;
    Ok(())
}

/// Record one forbidden pairing. Names must already be registered: at this
/// surface an unknown name is a typo, not a no-op.
#[post("/exchanges/<id>/exclusions", data = "<rule>", format = "json")]
pub async fn add_exclusion(
    _token: AuthToken,
    id: u32,
    rule: Json<ExclusionRule>,
    store: &State<ExchangeStore>,
) -> Result<()> {
    apply_rules(store, id, vec![rule.0])
}

/// Record forbidden pairings from their human-entered textual form, one
/// `"A cannot give to B"` line per entry.
#[post("/exchanges/<id>/exclusions/rules", data = "<lines>", format = "json")]
pub async fn add_exclusion_rules(
    _token: AuthToken,
    id: u32,
    lines: Json<Vec<String>>,
    store: &State<ExchangeStore>,
) -> Result<()> {
    let rules = lines
        .0
        .iter()
        .map(|line| {
            line.parse::<ExclusionRule>().map_err(|err| {
                Error::Status(Status::BadRequest, format!("{line:?}: {err}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    apply_rules(store, id, rules)
}

/// Validate every rule against the roster, then record them all. Applied
/// atomically: one bad name rejects the whole request.
fn apply_rules(store: &ExchangeStore, id: u32, rules: Vec<ExclusionRule>) -> Result<()> {
    store
        .with_mut(id, |exchange| {
            for rule in &rules {
                for name in [&rule.donor, &rule.recipient] {
                    if !exchange.roster.contains(name) {
                        return Err(Error::Status(
                            Status::NotFound,
                            format!("No participant named {name:?} in this exchange"),
                        ));
                    }
                }
            }
            for rule in &rules {
                exchange.exclusions.add_exclusion(&rule.donor, &rule.recipient);
            }
            Ok(())
        })
        .ok_or_else(|| no_such_exchange(id))?
}
