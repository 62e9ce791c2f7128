//! # Timestamp Value Object
//!
//! UTC instant parsed from the epoch-millisecond text carried in issuance
//! payloads (`"issueDate": "1456161763790"`).
//!
//! # Examples
//!
//! ```
//! use chrono::Datelike;
//! use paper_ledger::domain::value_objects::timestamp::Timestamp;
//!
//! let issued = Timestamp::parse_millis("1456790400000").unwrap();
//! let maturity = issued.add_days(14).unwrap();
//! assert_eq!((maturity.month(), maturity.day()), (3, 15));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Datelike, Days, TimeZone, Utc};
use std::fmt;

/// A UTC timestamp with millisecond input resolution.
///
/// # Invariants
///
/// - Always in UTC timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Parses epoch milliseconds written as decimal text.
    ///
    /// A leading sign is accepted, surrounding whitespace is not.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the text is not an integer
    /// or names an instant chrono cannot represent.
    pub fn parse_millis(text: &str) -> DomainResult<Self> {
        let millis: i64 = text
            .parse()
            .map_err(|_| DomainError::invalid_timestamp(text))?;
        Self::from_millis(millis).ok_or_else(|| DomainError::invalid_timestamp(text))
    }

    /// Returns the Unix timestamp in milliseconds.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Adds whole calendar days.
    ///
    /// Returns `None` on overflow of the representable range.
    #[must_use]
    pub fn add_days(&self, days: u32) -> Option<Self> {
        self.0.checked_add_days(Days::new(u64::from(days))).map(Self)
    }

    /// Month of the year, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, 1 through 31.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_epoch_millis() {
        let ts = Timestamp::parse_millis("1456161763790").unwrap();
        assert_eq!(ts.timestamp_millis(), 1_456_161_763_790);
        assert_eq!(ts.to_string(), "2016-02-22T17:22:43.790Z");
    }

    #[test]
    fn negative_millis_are_before_epoch() {
        let ts = Timestamp::parse_millis("-86400000").unwrap();
        assert_eq!((ts.month(), ts.day()), (12, 31));
    }

    #[test]
    fn rejects_non_integer_text() {
        for bad in ["", "abc", "1.5", " 1000", "1e3"] {
            let err = Timestamp::parse_millis(bad).unwrap_err();
            assert!(matches!(err, DomainError::InvalidTimestamp(_)), "{bad}");
        }
    }

    #[test]
    fn add_days_crosses_leap_february() {
        // 2016-02-22 + 30 days lands on 2016-03-23
        let ts = Timestamp::parse_millis("1456161763790").unwrap();
        let maturity = ts.add_days(30).unwrap();
        assert_eq!((maturity.month(), maturity.day()), (3, 23));
    }

    #[test]
    fn zero_days_is_identity() {
        let ts = Timestamp::from_millis(0).unwrap();
        assert_eq!(ts.add_days(0).unwrap(), ts);
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00.000Z");
    }
}
