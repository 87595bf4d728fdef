use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::assignment::Assignment;
use crate::error::DrawError;
use crate::exclusions::ConstraintGraph;
use crate::roster::Roster;

/// Number of randomized candidates tried before a draw is declared infeasible.
pub const DEFAULT_ATTEMPTS: usize = 1000;

/// Produces bijective, fixed-point-free, exclusion-respecting assignments.
///
/// The engine is Monte-Carlo: it repeatedly generates randomized candidates
/// and accepts the first one that passes every check. It never returns an
/// invalid assignment, but for dense exclusion sets it can fail to find a
/// valid one that does exist before the attempt budget runs out. That
/// tradeoff is deliberate; a constructive matching algorithm is out of scope
/// for a gift draw.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentEngine {
    attempts: usize,
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentEngine {
    /// An engine with the default attempt budget.
    pub fn new() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// An engine with a non-default attempt budget.
    pub fn with_attempts(attempts: usize) -> Self {
        Self { attempts }
    }

    /// Run a draw with the thread-local RNG.
    pub fn assign(
        &self,
        roster: &Roster,
        graph: &ConstraintGraph,
    ) -> Result<Assignment, DrawError> {
        self.assign_with(&mut rand::thread_rng(), roster, graph)
    }

    /// Run a draw with a caller-supplied RNG (seedable for reproducible
    /// tests). Every attempt draws fresh randomness from `rng`, so a
    /// rejected candidate is never simply retried.
    pub fn assign_with<R: Rng>(
        &self,
        rng: &mut R,
        roster: &Roster,
        graph: &ConstraintGraph,
    ) -> Result<Assignment, DrawError> {
        if roster.len() < 2 {
            return Err(DrawError::NotEnoughParticipants(roster.len()));
        }

        // A donor whose exclusions cover the whole rest of the roster can
        // never be matched; fail before spending the budget on them.
        if !graph.is_empty() {
            for donor in roster.names() {
                if graph.allowed_recipients(donor, roster).is_empty() {
                    return Err(DrawError::Infeasible { attempts: 0 });
                }
            }
        }

        // Strategy selection lives here, outside either algorithm.
        let strategy: &dyn Strategy = if graph.is_empty() {
            &Shuffle
        } else {
            &Constrained
        };

        for _ in 0..self.attempts {
            let Some(candidate) = strategy.candidate(rng, roster, graph) else {
                continue;
            };
            if candidate.is_derangement() && graph.is_valid(&candidate) {
                return Ok(candidate);
            }
        }
        Err(DrawError::Infeasible {
            attempts: self.attempts,
        })
    }
}

/// One way of generating candidate assignments.
///
/// Strategies only propose; the engine applies the acceptance checks, so a
/// sloppy strategy costs attempts but can never produce an invalid result.
trait Strategy {
    /// Generate one candidate, or `None` if this attempt dead-ended.
    fn candidate(
        &self,
        rng: &mut dyn RngCore,
        roster: &Roster,
        graph: &ConstraintGraph,
    ) -> Option<Assignment>;
}

/// Unconstrained draw: pair the roster with a uniform shuffle of itself.
///
/// Samples uniformly from all permutations, so the assignments the engine
/// accepts are uniform over derangements.
struct Shuffle;

impl Strategy for Shuffle {
    fn candidate(
        &self,
        rng: &mut dyn RngCore,
        roster: &Roster,
        _graph: &ConstraintGraph,
    ) -> Option<Assignment> {
        let mut recipients: Vec<&str> = roster.names().collect();
        recipients.shuffle(rng);
        let pairs = roster
            .names()
            .zip(recipients)
            .map(|(donor, recipient)| (donor.to_string(), recipient.to_string()))
            .collect();
        Some(Assignment::new(pairs))
    }
}

/// Constrained draw: give each donor in turn a random recipient from the
/// still-unclaimed names their exclusions allow.
///
/// A dead end (every unclaimed name is off-limits for some donor) abandons
/// the attempt entirely; the engine restarts from scratch rather than
/// repairing the partial assignment.
struct Constrained;

impl Strategy for Constrained {
    fn candidate(
        &self,
        rng: &mut dyn RngCore,
        roster: &Roster,
        graph: &ConstraintGraph,
    ) -> Option<Assignment> {
        let mut remaining: Vec<&str> = roster.names().collect();
        let mut pairs = Vec::with_capacity(roster.len());
        for donor in roster.names() {
            let open: Vec<usize> = (0..remaining.len())
                .filter(|&i| remaining[i] != donor && !graph.forbids(donor, remaining[i]))
                .collect();
            let index = *open.choose(rng)?;
            let recipient = remaining.swap_remove(index);
            pairs.push((donor.to_string(), recipient.to_string()));
        }
        Some(Assignment::new(pairs))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::roster::Participant;

    fn roster(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for name in names {
            roster
                .insert(Participant {
                    name: name.to_string(),
                    contact: String::new(),
                })
                .unwrap();
        }
        roster
    }

    #[test]
    fn empty_roster_is_invalid_input() {
        let err = AssignmentEngine::new()
            .assign(&roster(&[]), &ConstraintGraph::new())
            .unwrap_err();
        assert_eq!(err, DrawError::NotEnoughParticipants(0));
    }

    #[test]
    fn singleton_roster_is_invalid_input() {
        let err = AssignmentEngine::new()
            .assign(&roster(&["Alice"]), &ConstraintGraph::new())
            .unwrap_err();
        assert_eq!(err, DrawError::NotEnoughParticipants(1));
    }

    #[test]
    fn two_participants_always_swap() {
        let roster = roster(&["Alice", "Bob"]);
        let graph = ConstraintGraph::new();
        let engine = AssignmentEngine::new();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignment = engine.assign_with(&mut rng, &roster, &graph).unwrap();
            assert_eq!(assignment.recipient_for("Alice"), Some("Bob"));
            assert_eq!(assignment.recipient_for("Bob"), Some("Alice"));
        }
    }

    #[test]
    fn assignments_satisfy_every_invariant() {
        let roster = roster(&["Alice", "Bob", "Charlie", "Dan", "Erin"]);
        let mut graph = ConstraintGraph::new();
        graph.add_exclusion("Alice", "Bob");
        graph.add_exclusion("Dan", "Erin");
        graph.add_exclusion("Dan", "Alice");
        let engine = AssignmentEngine::new();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignment = engine.assign_with(&mut rng, &roster, &graph).unwrap();
            assert_eq!(assignment.len(), roster.len());
            assert!(assignment.is_derangement());
            assert!(assignment.is_permutation());
            assert!(graph.is_valid(&assignment));
        }
    }

    #[test]
    fn mutual_exclusion_of_two_is_infeasible() {
        let roster = roster(&["Luis", "Juan"]);
        let mut graph = ConstraintGraph::new();
        graph.add_exclusion("Luis", "Juan");

        // Caught by the feasibility shortcut: Luis has nobody left.
        let err = AssignmentEngine::new().assign(&roster, &graph).unwrap_err();
        assert_eq!(err, DrawError::Infeasible { attempts: 0 });
    }

    #[test]
    fn excluding_the_whole_group_is_infeasible() {
        let roster = roster(&["Alice", "Bob", "Charlie", "Dan"]);
        let mut graph = ConstraintGraph::new();
        graph.add_exclusion("Alice", "Bob");
        graph.add_exclusion("Alice", "Charlie");
        graph.add_exclusion("Alice", "Dan");

        let err = AssignmentEngine::new().assign(&roster, &graph).unwrap_err();
        assert_eq!(err, DrawError::Infeasible { attempts: 0 });
    }

    #[test]
    fn hall_violation_exhausts_the_budget() {
        // Alice, Bob and Charlie may each only give to Dan, so no bijection
        // exists, yet every donor individually still has an option and the
        // shortcut cannot see it. The engine must give up, not hang.
        let roster = roster(&["Alice", "Bob", "Charlie", "Dan"]);
        let mut graph = ConstraintGraph::new();
        graph.add_exclusion("Alice", "Bob");
        graph.add_exclusion("Alice", "Charlie");
        graph.add_exclusion("Bob", "Alice");
        graph.add_exclusion("Bob", "Charlie");
        graph.add_exclusion("Charlie", "Alice");
        graph.add_exclusion("Charlie", "Bob");

        let engine = AssignmentEngine::with_attempts(64);
        let mut rng = StdRng::seed_from_u64(7);
        let err = engine.assign_with(&mut rng, &roster, &graph).unwrap_err();
        assert_eq!(err, DrawError::Infeasible { attempts: 64 });
    }

    #[test]
    fn exclusions_for_unknown_names_are_inert() {
        let roster = roster(&["Alice", "Bob"]);
        let mut graph = ConstraintGraph::new();
        graph.add_exclusion("Zed", "Alice");

        let assignment = AssignmentEngine::new().assign(&roster, &graph).unwrap();
        assert_eq!(assignment.recipient_for("Alice"), Some("Bob"));
        assert_eq!(assignment.recipient_for("Bob"), Some("Alice"));
    }
}
