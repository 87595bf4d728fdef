use thiserror::Error;

/// Failures the assignment engine can report.
///
/// A draw either returns a fully valid [`crate::Assignment`] or one of
/// these; there is no partial success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// A derangement needs at least two elements.
    #[error("a draw needs at least 2 participants, got {0}")]
    NotEnoughParticipants(usize),
    /// Participant names are unique keys; re-registering one is rejected.
    #[error("participant {0:?} is already registered")]
    DuplicateParticipant(String),
    /// No valid assignment was found within the attempt budget. Either the
    /// exclusions provably rule everything out, or they are dense enough
    /// that randomized search gave up.
    #[error("no valid assignment found (gave up after {attempts} candidates)")]
    Infeasible { attempts: usize },
}
