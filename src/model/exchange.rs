use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gift_draw::{ConstraintGraph, Roster};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::contact::Contact;

/// A gift exchange under construction: who is in, and who must not draw whom.
///
/// The eventual assignment is *not* part of this type. Pairings exist only
/// for the duration of a draw request and go straight to the participants.
#[derive(Debug)]
pub struct Exchange {
    pub id: u32,
    pub name: String,
    pub roster: Roster,
    pub exclusions: ConstraintGraph,
}

impl Exchange {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            roster: Roster::new(),
            exclusions: ConstraintGraph::new(),
        }
    }

    /// The coordinator-facing view of this exchange.
    pub fn summary(&self) -> ExchangeSummary {
        let mut exclusions: Vec<ExclusionRule> = self
            .exclusions
            .exclusions()
            .map(|(donor, recipient)| ExclusionRule {
                donor: donor.to_string(),
                recipient: recipient.to_string(),
            })
            .collect();
        exclusions.sort_by(|a, b| (&a.donor, &a.recipient).cmp(&(&b.donor, &b.recipient)));

        ExchangeSummary {
            id: self.id,
            name: self.name.clone(),
            participants: self.roster.names().map(str::to_string).collect(),
            exclusions,
            cyclic_exclusions: self.exclusions.has_cycle(),
        }
    }
}

/// Request body for creating an exchange.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewExchange {
    pub name: String,
}

/// Request body for registering a participant.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    pub contact: Contact,
}

/// What the coordinator sees when listing or fetching an exchange.
///
/// `cyclic_exclusions` flags a chain of exclusions that loops back on
/// itself. That alone does not make the draw impossible, so it is reported
/// as a diagnostic rather than treated as an error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeSummary {
    pub id: u32,
    pub name: String,
    pub participants: Vec<String>,
    pub exclusions: Vec<ExclusionRule>,
    pub cyclic_exclusions: bool,
}

/// One forbidden pairing, writable as `"Alice cannot give to Bob"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub donor: String,
    pub recipient: String,
}

/// The phrase separating the two names in the textual rule form.
const RULE_SEPARATOR: &str = " cannot give to ";

impl Display for ExclusionRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.donor, RULE_SEPARATOR, self.recipient)
    }
}

impl FromStr for ExclusionRule {
    type Err = ParseRuleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (donor, recipient) = line
            .split_once(RULE_SEPARATOR)
            .ok_or(ParseRuleError::MissingSeparator)?;
        let donor = donor.trim();
        let recipient = recipient.trim();
        if donor.is_empty() || recipient.is_empty() {
            return Err(ParseRuleError::EmptyName);
        }
        Ok(Self {
            donor: donor.to_string(),
            recipient: recipient.to_string(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRuleError {
    #[error("expected the form \"<donor> cannot give to <recipient>\"")]
    MissingSeparator,
    #[error("both names in an exclusion rule must be non-empty")]
    EmptyName,
}
