use rocket::Route;

pub mod auth;
pub mod draw;
pub mod exchange;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(exchange::routes());
    routes.extend(draw::routes());
    routes
}
