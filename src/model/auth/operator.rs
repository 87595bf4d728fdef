use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Raw coordinator credentials, as received at sign-in. Never stored:
/// the reference hash lives in configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct OperatorCredentials {
    pub username: String,
    pub password: String,
}

impl OperatorCredentials {
    /// Check against the configured username and argon2 password hash.
    /// A malformed configured hash simply fails verification.
    pub fn verify(&self, config: &Config) -> bool {
        self.username == config.operator_username()
            && argon2::verify_encoded(config.operator_password_hash(), self.password.as_bytes())
                .unwrap_or(false)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl OperatorCredentials {
        pub fn example() -> Self {
            Self {
                username: "coordinator".into(),
                password: "coordinator".into(),
            }
        }

        pub fn wrong_password() -> Self {
            Self {
                username: "coordinator".into(),
                password: "not the password".into(),
            }
        }
    }
}
