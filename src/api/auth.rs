use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    config::Config,
    error::{Error, Result},
    model::auth::{AuthToken, OperatorCredentials, AUTH_TOKEN_COOKIE},
};

pub fn routes() -> Vec<Route> {
    routes![authenticate, logout]
}

/// Sign in as the exchange coordinator.
#[post("/auth/coordinator", data = "<credentials>", format = "json")]
pub async fn authenticate(
    cookies: &CookieJar<'_>,
    credentials: Json<OperatorCredentials>,
    config: &State<Config>,
) -> Result<()> {
    if !credentials.verify(config) {
        return Err(Error::Status(
            Status::Unauthorized,
            "Incorrect username or password.".to_string(),
        ));
    }

    let token = AuthToken::new(&*credentials.username);
    cookies.add(token.into_cookie(config));

    Ok(())
}

#[post("/auth/logout")]
pub async fn logout(_token: AuthToken, cookies: &CookieJar<'_>) -> Result<()> {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Ok(())
}
