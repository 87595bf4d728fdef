use aws_sdk_sns::Client as SnsClient;
use gift_draw::{Assignment, Roster};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Subject line attached to every assignment message.
#[cfg_attr(test, allow(dead_code))]
const SUBJECT: &str = "Your secret santa!";

/// Outcome of one notification attempt, reported back to the coordinator.
/// Note that it only names the donor; the recipient stays secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub participant: String,
    pub delivered: bool,
}

/// Sends assignment messages for one draw.
///
/// Borrows the shared SNS client for the duration of the batch; the
/// assignment is read-only here and dropped by the caller afterwards.
pub struct Notifier<'a> {
    sender: &'a SnsClient,
    config: &'a Config,
}

impl<'a> Notifier<'a> {
    pub fn new(sender: &'a SnsClient, config: &'a Config) -> Self {
        Self { sender, config }
    }

    /// Message body telling `donor` who they drew.
    #[cfg_attr(test, allow(dead_code))]
    fn message(&self, donor: &str, recipient: &str) -> String {
        let mut body = format!(
            "Hi {donor}! You drew {recipient} in the secret santa, so they \
             are your giftee this year. Keep it to yourself!"
        );
        if let Some(url) = self.config.gift_image_url() {
            body.push('\n');
            body.push_str(url);
        }
        body
    }

    /// Send one donor their result. Returns whether the publish succeeded;
    /// failures are logged, not propagated, so the rest of the batch still
    /// goes out.
    #[cfg_attr(test, allow(unused_variables))]
    async fn send(&self, contact: &str, donor: &str, recipient: &str) -> bool {
        #[cfg(not(test))]
        {
            use log::{info, warn};

            let result = self
                .sender
                .publish()
                .phone_number(contact)
                .subject(SUBJECT)
                .message(self.message(donor, recipient))
                .send()
                .await;
            match result {
                Ok(_) => {
                    info!("Notified {donor} of their draw result");
                    true
                }
                Err(err) => {
                    warn!("Failed to notify {donor}: {err}");
                    false
                }
            }
        }
        #[cfg(test)]
        {
            true
        }
    }

    /// Notify every donor in the assignment. One message per pair; a failed
    /// send is recorded and does not abort the batch.
    pub async fn notify_all(&self, roster: &Roster, assignment: &Assignment) -> Vec<Delivery> {
        let mut deliveries = Vec::with_capacity(assignment.len());
        for (donor, recipient) in assignment.pairs() {
            let delivered = match roster.contact(donor) {
                Some(contact) => self.send(contact, donor, recipient).await,
                // Assignments are permutations of the roster, so this arm
                // means the roster changed under us; report it undelivered.
                None => false,
            };
            deliveries.push(Delivery {
                participant: donor.to_string(),
                delivered,
            });
        }
        deliveries
    }
}
