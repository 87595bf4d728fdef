#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod notify;

use rocket::{Build, Rocket};

use crate::config::{ConfigFairing, NotifierFairing};
use crate::logging::LoggerFairing;
use crate::model::store::ExchangeStore;

/// Assemble the rocket: config, SNS notifier, in-memory exchange store,
/// request logging, and the API routes. Ignition runs the fairings and
/// aborts launch if any piece of configuration is missing or malformed.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .attach(ConfigFairing)
        .attach(NotifierFairing)
        .attach(LoggerFairing)
        .manage(ExchangeStore::new())
        .mount("/", api::routes())
}
