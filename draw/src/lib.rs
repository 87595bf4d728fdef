//! Constrained random assignment for gift exchanges.
//!
//! Given a roster of participants and a set of forbidden donor→recipient
//! pairings, the engine produces a bijective assignment with no fixed points
//! (nobody draws themselves) and no forbidden pair, or fails explicitly when
//! no valid assignment can be found within the attempt budget.
//!
//! This crate is a pure library: it has no notion of how participants are
//! collected or how they are told their result. Contact addresses are carried
//! through as opaque strings for the caller's benefit.

pub mod assignment;
pub mod engine;
pub mod error;
pub mod exclusions;
pub mod roster;

pub use assignment::Assignment;
pub use engine::{AssignmentEngine, DEFAULT_ATTEMPTS};
pub use error::DrawError;
pub use exclusions::ConstraintGraph;
pub use roster::{Participant, Roster};
