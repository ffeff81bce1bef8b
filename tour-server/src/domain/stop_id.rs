//! Stop identifier type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A validated stop identifier (e.g. "Museum Island").
///
/// Any non-empty string is an identifier; it is kept exactly as given, so
/// `"A"` and `" A"` are different stops. Ordering is lexicographic on the
/// UTF-8 bytes, which is what the optimizer uses to break ties.
///
/// # Examples
///
/// ```
/// use tour_server::domain::StopId;
///
/// let gate = StopId::parse("Brandenburg Gate").unwrap();
/// assert_eq!(gate.as_str(), "Brandenburg Gate");
///
/// assert!(StopId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier from a string.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::InvalidStopId("must not be empty"));
        }
        Ok(StopId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
