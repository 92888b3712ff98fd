//! Account names identifying members, services and the governance account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account name: 1 to 12 characters from `a-z`, `1-5` and `.`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountName(String);

impl AccountName {
    /// Maximum length of an account name.
    pub const MAX_LEN: usize = 12;

    /// Create an account name from a raw string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Create an account name, returning `None` if it is not well-formed.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = Self(raw.to_string());
        name.is_valid().then_some(name)
    }

    /// Return the raw name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this name is well-formed.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() <= Self::MAX_LEN
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_lowercase() || ('1'..='5').contains(&c) || c == '.')
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_well_formed_names() {
        assert!(AccountName::parse("alice").is_some());
        assert!(AccountName::parse("dao.hypha1").is_some());
    }

    #[test]
    fn parse_rejects_malformed_names() {
        assert!(AccountName::parse("").is_none());
        assert!(AccountName::parse("Alice").is_none());
        assert!(AccountName::parse("thirteenchars").is_none());
        assert!(AccountName::parse("bob9").is_none());
    }
}
