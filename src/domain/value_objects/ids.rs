//! # Identifiers
//!
//! String-based identifiers for accounts and issued paper.
//!
//! Both wrap the raw text that appears on the wire (`"issuer": "company1"`,
//! `"cusip": "company1000ACF"`) and serialize transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a ledger account (a company or named user).
///
/// # Examples
///
/// ```
/// use paper_ledger::domain::value_objects::AccountId;
///
/// let id = AccountId::new("company1");
/// assert_eq!(id.as_str(), "company1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Ledger-local asset identifier: the issuer's account prefix followed by a
/// two-character maturity code.
///
/// Not related to the CUSIP standard used by securities markets.
///
/// # Examples
///
/// ```
/// use paper_ledger::domain::value_objects::Cusip;
///
/// let cusip = Cusip::compose("company1000A", "CF");
/// assert_eq!(cusip.as_str(), "company1000ACF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cusip(String);

impl Cusip {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds an identifier from an account prefix and a maturity suffix.
    #[must_use]
    pub fn compose(prefix: &str, suffix: &str) -> Self {
        let mut id = String::with_capacity(prefix.len() + suffix.len());
        id.push_str(prefix);
        id.push_str(suffix);
        Self(id)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Cusip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cusip {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn account_id_serializes_as_plain_string() {
        let id = AccountId::new("company2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"company2\"");
        let parsed: AccountId = serde_json::from_str("\"company2\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn cusip_compose_concatenates() {
        let cusip = Cusip::compose("10000A", "MX");
        assert_eq!(cusip.to_string(), "10000AMX");
        assert!(!cusip.is_empty());
        assert!(Cusip::default().is_empty());
    }
}
