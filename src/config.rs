use aws_config::SdkConfig;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_sns::{
    Client as SnsClient, Credentials, Region,
};
use chrono::Duration;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use gift_draw::DEFAULT_ATTEMPTS;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    auth_ttl: u32,
    #[serde(default = "default_draw_attempts")]
    draw_attempts: usize,
    #[serde(default)]
    gift_image_url: Option<String>,
    operator_username: String,
    // secrets
    jwt_secret: String,
    operator_password_hash: String,
}

fn default_draw_attempts() -> usize {
    DEFAULT_ATTEMPTS
}

impl Config {
    /// Valid lifetime of auth token cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// How many randomized candidates a draw may try before giving up.
    pub fn draw_attempts(&self) -> usize {
        self.draw_attempts
    }

    /// Optional link to a gift image, appended to every assignment message.
    pub fn gift_image_url(&self) -> Option<&str> {
        self.gift_image_url.as_deref()
    }

    /// Username the exchange coordinator signs in with.
    pub fn operator_username(&self) -> &str {
        &self.operator_username
    }

    /// Argon2-encoded hash of the coordinator's password.
    pub fn operator_password_hash(&self) -> &str {
        &self.operator_password_hash
    }

    /// Secret key used to encrypt JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the other fairings and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the AWS connection.
#[derive(Deserialize)]
struct AwsConfig {
    // non-secrets
    aws_region: String,
    aws_access_key_id: String,
    // secrets
    aws_secret_access_key: String,
}

/// A fairing that loads the AWS config and places an SNS `Client` into
/// managed state. The client is built once here and borrowed for each
/// notification batch; nothing else ever holds the connection.
pub struct NotifierFairing;

#[rocket::async_trait]
impl Fairing for NotifierFairing {
    fn info(&self) -> Info {
        Info {
            name: "AWS SNS",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<AwsConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load AWS config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        // Construct the connection.
        let aws_config = SdkConfig::builder()
            .region(Region::new(config.aws_region))
            .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
                config.aws_access_key_id,
                config.aws_secret_access_key,
                None,
                None,
                "rocket config",
            )))
            .build();
        let client = SnsClient::new(&aws_config);
        info!("Loaded Amazon SNS config");

        // Manage the state.
        rocket = rocket.manage(client);
        Ok(rocket)
    }
}
