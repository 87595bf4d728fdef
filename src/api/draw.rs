use aws_sdk_sns::Client as SnsClient;
use gift_draw::AssignmentEngine;
use log::info;
use rocket::{http::Status, serde::json::Json, Route, State};

use crate::{
    config::Config,
    error::{Error, Result},
    model::{auth::AuthToken, store::ExchangeStore},
    notify::{Delivery, Notifier},
};

pub fn routes() -> Vec<Route> {
    routes![run_draw]
}

/// Run the draw for an exchange and message every participant their giftee.
///
/// The pairings themselves never leave this handler: the response carries
/// only per-participant delivery outcomes, so not even the coordinator
/// learns who drew whom.
#[post("/exchanges/<id>/draw")]
pub async fn run_draw(
    _token: AuthToken,
    id: u32,
    store: &State<ExchangeStore>,
    config: &State<Config>,
    sender: &State<SnsClient>,
) -> Result<Json<Vec<Delivery>>> {
    // Snapshot the exchange so the store lock is not held while messages
    // are in flight.
    let (roster, exclusions) = store
        .with(id, |exchange| {
            (exchange.roster.clone(), exchange.exclusions.clone())
        })
        .ok_or_else(|| {
            Error::Status(Status::NotFound, format!("No exchange found with ID {id}"))
        })?;

    let engine = AssignmentEngine::with_attempts(config.draw_attempts());
    let assignment = engine.assign(&roster, &exclusions)?;
    info!("Drew exchange {id} with {} participants", assignment.len());

    let deliveries = Notifier::new(sender, config)
        .notify_all(&roster, &assignment)
        .await;
    Ok(Json(deliveries))
}
