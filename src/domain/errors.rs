//! # Domain Errors
//!
//! Business rule violations raised by entities and domain services.

use crate::domain::value_objects::ArithmeticError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or missing required input.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Issue date is not integer epoch milliseconds.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Seller does not hold enough units of the asset.
    #[error("insufficient quantity: {company} holds {held} of {asset}, requested {requested}")]
    InsufficientQuantity {
        /// Asset being transferred.
        asset: String,
        /// Selling company.
        company: String,
        /// Units currently held.
        held: u64,
        /// Units requested.
        requested: u64,
    },

    /// Buyer cannot pay the settlement amount.
    #[error("insufficient funds: {company} has {available}, settlement requires {required}")]
    InsufficientFunds {
        /// Buying company.
        company: String,
        /// Cash balance before settlement.
        available: Decimal,
        /// Settlement amount.
        required: Decimal,
    },

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid record error.
    #[must_use]
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        Self::InvalidTimestamp(input.into())
    }

    /// Returns true for quantity and funds violations.
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::InsufficientQuantity { .. } | Self::InsufficientFunds { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
