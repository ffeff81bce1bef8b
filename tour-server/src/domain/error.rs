//! Domain error types.
//!
//! These errors represent validation failures on raw input values. They are
//! distinct from storage and HTTP errors.

/// Domain-level errors for value validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// User identifier failed validation
    #[error("invalid user id: {0}")]
    InvalidUserId(&'static str),

    /// Stop identifier failed validation
    #[error("invalid stop id: {0}")]
    InvalidStopId(&'static str),

    /// Cost or budget value failed validation
    #[error("invalid cost {value}: {reason}")]
    InvalidCost { value: f64, reason: &'static str },

    /// Interest tag failed validation
    #[error("invalid interest: {0}")]
    InvalidInterest(&'static str),

    /// Time of day could not be parsed
    #[error("invalid time of day '{0}': expected HH:MM or H:MM AM/PM")]
    InvalidTimeOfDay(String),

    /// Date could not be parsed
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// End of the day window is not after its start
    #[error("end time {end} must be after start time {start}")]
    InvalidTimeWindow { start: String, end: String },
}
