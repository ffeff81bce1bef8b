//! User identifier type.

use std::fmt;

use super::DomainError;

/// Maximum length of a user identifier in bytes.
const MAX_LEN: usize = 64;

/// A validated user identifier, used as the preference store key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Parse a user identifier. Surrounding whitespace is trimmed.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUserId("must not be empty"));
        }
        if trimmed.len() > MAX_LEN {
            return Err(DomainError::InvalidUserId("must be at most 64 bytes"));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(DomainError::InvalidUserId(
                "must not contain control characters",
            ));
        }
        Ok(UserId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        assert_eq!(UserId::parse(" user123 ").unwrap().as_str(), "user123");
    }

    #[test]
    fn reject_invalid() {
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("   ").is_err());
        assert!(UserId::parse("a\u{0}b").is_err());
        assert!(UserId::parse(&"u".repeat(MAX_LEN + 1)).is_err());
    }
}
