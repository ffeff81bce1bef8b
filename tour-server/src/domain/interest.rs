//! Interest tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A normalised interest tag such as `history` or `museums`.
///
/// Tags are trimmed and lowercased on parse so that user input
/// ("History ") matches catalog tags ("history").
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interest(String);

impl Interest {
    /// Parse and normalise an interest tag.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let normalised = s.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(DomainError::InvalidInterest("must not be empty"));
        }
        if normalised.contains(',') {
            return Err(DomainError::InvalidInterest("must not contain commas"));
        }
        if normalised.chars().any(char::is_control) {
            return Err(DomainError::InvalidInterest(
                "must not contain control characters",
            ));
        }
        Ok(Interest(normalised))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Interest {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Interest> for String {
    fn from(interest: Interest) -> Self {
        interest.0
    }
}

impl fmt::Debug for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interest({})", self.0)
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
