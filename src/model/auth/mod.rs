mod operator;
mod token;

pub use operator::OperatorCredentials;
pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
