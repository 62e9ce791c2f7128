//! # Transfer Request
//!
//! Payload of a `transferPaper` invocation.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{AccountId, Cusip};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A request to move units of one paper between two accounts.
///
/// # Examples
///
/// ```
/// use paper_ledger::domain::entities::transfer_request::TransferRequest;
///
/// let raw = r#"{"cusip":"10000ACP","fromCompany":"company1","toCompany":"company2","quantity":3}"#;
/// let request: TransferRequest = serde_json::from_str(raw).unwrap();
/// assert_eq!(request.quantity, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Asset being sold.
    pub cusip: Cusip,
    /// Selling account.
    #[serde(rename = "fromCompany")]
    pub from_company: AccountId,
    /// Buying account.
    #[serde(rename = "toCompany")]
    pub to_company: AccountId,
    /// Units to move.
    pub quantity: u64,
    /// Accepted for payload compatibility; pricing uses the paper's own rate.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
}

impl TransferRequest {
    /// Creates a request without the legacy discount field.
    #[must_use]
    pub fn new(cusip: Cusip, from: AccountId, to: AccountId, quantity: u64) -> Self {
        Self {
            cusip,
            from_company: from,
            to_company: to,
            quantity,
            discount: None,
        }
    }

    /// Checks the fields that decoding alone cannot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecord` for empty identifiers or a
    /// transfer from an account to itself.
    pub fn validate(&self) -> DomainResult<()> {
        if self.cusip.is_empty() {
            return Err(DomainError::invalid_record("transfer cusip must not be empty"));
        }
        if self.from_company.is_empty() || self.to_company.is_empty() {
            return Err(DomainError::invalid_record(
                "transfer accounts must not be empty",
            ));
        }
        if self.from_company == self.to_company {
            return Err(DomainError::invalid_record(format!(
                "cannot transfer {} from {} to itself",
                self.cusip, self.from_company
            )));
        }
        Ok(())
    }
}
