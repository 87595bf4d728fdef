pub mod auth;
pub mod contact;
pub mod exchange;
pub mod store;
