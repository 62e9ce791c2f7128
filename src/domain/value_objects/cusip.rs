//! # CUSIP Suffix Generation
//!
//! Derives the two trailing characters of an asset identifier from the
//! issue timestamp and the maturity offset.
//!
//! The maturity month selects the first character and the maturity day the
//! second. Letters `I` and `O` never appear.
//!
//! The year is not encoded, so two issuances by one account that mature on
//! the same month and day share an identifier and merge.

use super::timestamp::Timestamp;
use crate::domain::errors::{DomainError, DomainResult};

/// Maturity month (index 0 = January) to first suffix character.
pub const MONTH_CODES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M'];

/// Maturity day-of-month (index 0 = day 1) to second suffix character.
pub const DAY_CODES: [char; 31] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K',
    'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X',
];

/// Computes the suffix for paper issued at `issue_millis` maturing after
/// `maturity_days` calendar days (UTC).
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if `issue_millis` is not integer
/// epoch milliseconds or the maturity date is out of range.
///
/// # Examples
///
/// ```
/// use paper_ledger::domain::value_objects::cusip::generate_suffix;
///
/// // 2016-03-01 + 14 days = March 15
/// assert_eq!(generate_suffix("1456790400000", 14).unwrap(), "CF");
/// ```
pub fn generate_suffix(issue_millis: &str, maturity_days: u32) -> DomainResult<String> {
    let issued = Timestamp::parse_millis(issue_millis)?;
    let maturity = issued
        .add_days(maturity_days)
        .ok_or_else(|| DomainError::invalid_timestamp(issue_millis))?;
    Ok(suffix_for(maturity.month(), maturity.day()).iter().collect())
}

// chrono guarantees month in 1..=12 and day in 1..=31
fn suffix_for(month: u32, day: u32) -> [char; 2] {
    [
        MONTH_CODES[(month - 1) as usize],
        DAY_CODES[(day - 1) as usize],
    ]
}
