//! Catalog error types.

use std::path::PathBuf;

use crate::optimizer::OptimizeError;

/// Errors from loading or validating the stop catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON was malformed
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two cities share a name (case-insensitively)
    #[error("duplicate city '{0}'")]
    DuplicateCity(String),

    /// A city has no stops
    #[error("city '{0}' has no stops")]
    EmptyCity(String),

    /// A city's stops do not form a valid graph
    #[error("city '{city}': {source}")]
    InvalidCity {
        city: String,
        #[source]
        source: OptimizeError,
    },
}
