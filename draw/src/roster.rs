use serde::{Deserialize, Serialize};

use crate::error::DrawError;

/// A single member of the gift exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique display name; the key every other structure refers to.
    pub name: String,
    /// Opaque contact address. Only the notification layer ever reads this;
    /// the assignment algorithm ignores it entirely.
    pub contact: String,
}

/// The registered participants, in registration order.
///
/// Registration order matters: it is the donor order of any assignment
/// produced from this roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant.
    ///
    /// Names are unique keys; registering a name twice is rejected rather
    /// than overwriting the earlier entry.
    pub fn insert(&mut self, participant: Participant) -> Result<(), DrawError> {
        if self.contains(&participant.name) {
            return Err(DrawError::DuplicateParticipant(participant.name));
        }
        self.participants.push(participant);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    /// The contact address registered for `name`, if any.
    pub fn contact(&self, name: &str) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.contact.as_str())
    }

    /// Participant names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str) -> Participant {
        Participant {
            name: name.to_string(),
            contact: format!("+44770090{:04}", name.len()),
        }
    }

    #[test]
    fn insert_preserves_order() {
        let mut roster = Roster::new();
        for name in ["Charlie", "Alice", "Bob"] {
            roster.insert(participant(name)).unwrap();
        }

        let names: Vec<&str> = roster.names().collect();
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut roster = Roster::new();
        roster.insert(participant("Alice")).unwrap();

        let err = roster.insert(participant("Alice")).unwrap_err();
        assert_eq!(err, DrawError::DuplicateParticipant("Alice".to_string()));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn contact_lookup() {
        let mut roster = Roster::new();
        roster
            .insert(Participant {
                name: "Alice".to_string(),
                contact: "+447700900001".to_string(),
            })
            .unwrap();

        assert_eq!(roster.contact("Alice"), Some("+447700900001"));
        assert_eq!(roster.contact("Bob"), None);
    }
}
