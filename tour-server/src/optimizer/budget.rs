//! Greedy budget admission.

use crate::domain::Cost;

use super::graph::StopGraph;
use super::search::FinalizedStop;

/// Outcome of admitting finalized stops against a budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    /// `admitted[i]` is true if the stop at graph index `i` was admitted.
    pub admitted: Vec<bool>,

    /// Total visit cost of the admitted stops.
    pub spent: Cost,

    /// Budget left over.
    pub remaining: Cost,
}

impl Admission {
    /// Number of admitted stops.
    pub fn count(&self) -> usize {
        self.admitted.iter().filter(|a| **a).count()
    }
}

/// Walk `finalized` in order and admit each stop whose visit cost fits the
/// remaining budget.
///
/// A stop that does not fit is skipped without ending the walk, so a later,
/// cheaper stop can still be admitted.
pub fn admit(graph: &StopGraph<'_>, finalized: &[FinalizedStop], budget: Cost) -> Admission {
    let mut admitted = vec![false; graph.len()];
    let mut remaining = budget;
    let mut spent = Cost::ZERO;

    for entry in finalized {
        let visit_cost = graph.stop(entry.index).visit_cost;
        if let Some(left) = remaining.checked_sub(visit_cost) {
            admitted[entry.index] = true;
            remaining = left;
            spent = spent.saturating_add(visit_cost);
        }
    }

    Admission {
        admitted,
        spent,
        remaining,
    }
}
