//! Preference store error types.

/// Errors that can occur when reading or writing user preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// HTTP request to the backing store failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication with the backing store failed
    #[error("unauthorized: check NEO4J_USER and NEO4J_PASSWORD")]
    Unauthorized,

    /// Backing store reported an error
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Failed to decode the backing store's response
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A stored value could not be turned back into a preference
    #[error("invalid stored value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Store configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
}
