//! Optimizer error types.

use crate::domain::{DomainError, StopId};

/// Error from building or searching an itinerary graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    /// The same stop identifier appears twice in the input
    #[error("invalid graph: duplicate stop '{0}'")]
    DuplicateStop(StopId),

    /// A neighbor edge points at a stop that is not in the input
    #[error("invalid graph: stop '{stop}' has unknown neighbor '{neighbor}'")]
    UnknownNeighbor { stop: StopId, neighbor: StopId },

    /// A stop failed validation (bad id or negative cost)
    #[error("invalid stop '{stop}': {source}")]
    InvalidStop {
        stop: String,
        #[source]
        source: DomainError,
    },

    /// The budget failed validation
    #[error("invalid budget: {0}")]
    InvalidBudget(#[source] DomainError),
}

impl OptimizeError {
    /// Whether this error describes a malformed graph (as opposed to bad
    /// scalar values).
    pub fn is_invalid_graph(&self) -> bool {
        matches!(
            self,
            OptimizeError::DuplicateStop(_) | OptimizeError::UnknownNeighbor { .. }
        )
    }
}
