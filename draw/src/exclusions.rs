use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::roster::Roster;

/// Directed graph of forbidden donor→recipient pairings.
///
/// Edges mean "must not be assigned", never "must be assigned", so the graph
/// only ever rejects candidates; it cannot force a particular pairing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintGraph {
    edges: HashMap<String, HashSet<String>>,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid `donor` from being assigned `recipient`.
    ///
    /// Self-exclusions are accepted but not stored: no assignment ever maps
    /// a participant to themselves, so the edge would be redundant.
    pub fn add_exclusion(&mut self, donor: &str, recipient: &str) {
        if donor == recipient {
            return;
        }
        self.edges
            .entry(donor.to_string())
            .or_default()
            .insert(recipient.to_string());
    }

    /// Whether any exclusions have been recorded at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn forbids(&self, donor: &str, recipient: &str) -> bool {
        self.edges
            .get(donor)
            .map(|targets| targets.contains(recipient))
            .unwrap_or(false)
    }

    /// Every forbidden (donor, recipient) pair, in no particular order.
    pub fn exclusions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().flat_map(|(donor, targets)| {
            targets
                .iter()
                .map(move |recipient| (donor.as_str(), recipient.as_str()))
        })
    }

    /// The roster members `donor` could still be assigned: everyone except
    /// themselves and their excluded recipients.
    pub fn allowed_recipients<'a>(&self, donor: &str, roster: &'a Roster) -> Vec<&'a str> {
        roster
            .names()
            .filter(|name| *name != donor && !self.forbids(donor, name))
            .collect()
    }

    /// Detect a chain of exclusions that loops back on itself.
    ///
    /// This is a diagnostic heuristic, not a feasibility check: exclusions
    /// are "must not match" edges, so a cycle does not by itself make a draw
    /// impossible. True feasibility is a bipartite-matching question that
    /// this crate deliberately answers by bounded randomized retry instead
    /// (see [`crate::engine::AssignmentEngine`]).
    pub fn has_cycle(&self) -> bool {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        for start in self.edges.keys() {
            if self.visit(start, &mut marks) {
                return true;
            }
        }
        false
    }

    /// Depth-first walk from `node`, looking for a back-edge.
    fn visit<'a>(&'a self, node: &'a str, marks: &mut HashMap<&'a str, Mark>) -> bool {
        match marks.get(node) {
            Some(Mark::InProgress) => return true,
            Some(Mark::Done) => return false,
            None => {}
        }
        marks.insert(node, Mark::InProgress);
        if let Some(targets) = self.edges.get(node) {
            for target in targets {
                if self.visit(target, marks) {
                    return true;
                }
            }
        }
        marks.insert(node, Mark::Done);
        false
    }

    /// True iff no donor in `assignment` was given a recipient from their
    /// exclusion set. Pure predicate: never fails, never mutates.
    pub fn is_valid(&self, assignment: &Assignment) -> bool {
        assignment
            .pairs()
            .all(|(donor, recipient)| !self.forbids(donor, recipient))
    }
}

/// DFS node state for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}
