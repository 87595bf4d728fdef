use std::collections::HashSet;

use serde::Serialize;

/// A completed donor→recipient mapping.
///
/// Once constructed an assignment is immutable: the notification step reads
/// it, nothing writes it, and it is dropped rather than persisted. Donors
/// appear in roster registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pairs: Vec<(String, String)>,
}

impl Assignment {
    pub(crate) fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// The recipient assigned to `donor`, if `donor` is in the draw.
    pub fn recipient_for(&self, donor: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(d, _)| d == donor)
            .map(|(_, r)| r.as_str())
    }

    /// All (donor, recipient) pairs in donor order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(d, r)| (d.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True iff no donor was assigned themselves.
    pub fn is_derangement(&self) -> bool {
        self.pairs.iter().all(|(donor, recipient)| donor != recipient)
    }

    /// True iff the recipients are exactly the donors, each used once.
    pub fn is_permutation(&self) -> bool {
        let donors: HashSet<&str> = self.pairs.iter().map(|(d, _)| d.as_str()).collect();
        let recipients: HashSet<&str> = self.pairs.iter().map(|(_, r)| r.as_str()).collect();
        recipients.len() == self.pairs.len() && donors == recipients
    }
}
