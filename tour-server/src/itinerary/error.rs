//! Itinerary generation error types.

use crate::domain::DomainError;
use crate::optimizer::OptimizeError;

/// Errors from turning preferences into an itinerary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItineraryError {
    /// The requested city is not in the catalog
    #[error("unsupported city '{0}'")]
    UnsupportedCity(String),

    /// The user has never saved preferences
    #[error("no preferences stored for user '{0}': collect preferences first")]
    NoPreferences(String),

    /// A required field is absent from both the request and stored preferences
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// Filtering left nothing to visit
    #[error("no stops match your interests or budget")]
    NothingMatches,

    /// A field value failed validation
    #[error("invalid request: {0}")]
    Invalid(#[from] DomainError),

    /// The optimizer rejected the city's graph
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}
