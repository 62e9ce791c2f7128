//! # Ledger Errors
//!
//! The error returned by every ledger invocation and query.
//!
//! Domain and repository errors are flattened into one kind per failure so
//! callers can match on what went wrong without knowing which layer raised
//! it.
//!
//! # Error Kinds
//!
//! ```text
//! LedgerError
//! ├── InvalidRecord / InvalidTimestamp / UnknownFunction   - bad input
//! ├── RecordNotFound / AssetNotFound / AccountNotFound
//! │   / KeyNotFound                                       - missing state
//! ├── AccountExists                                       - duplicate account
//! ├── InsufficientQuantity / InsufficientFunds            - transfer rules
//! ├── CorruptIndex / CorruptRecord                        - undecodable state
//! ├── Arithmetic                                          - decimal overflow
//! └── StoreFailure / Serialization                        - backend failures
//! ```
//!
//! # Examples
//!
//! ```
//! use paper_ledger::application::error::LedgerError;
//!
//! let err = LedgerError::account_not_found("company9");
//! assert!(err.is_not_found());
//! assert_eq!(err.kind(), "AccountNotFound");
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::ArithmeticError;
use crate::infrastructure::persistence::{RepositoryError, StoreError};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Error type for ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Malformed payload, wrong argument count or empty identifier.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Issue date is not integer epoch milliseconds.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// No registry-backed record under the key.
    #[error("{entity} not found: {key}")]
    RecordNotFound {
        /// Record class.
        entity: &'static str,
        /// Store key.
        key: String,
    },

    /// The paper named by a transfer does not exist.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// A named account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// `createAccount` on an id that already holds an account.
    #[error("account already exists: {0}")]
    AccountExists(String),

    /// A raw-key query found nothing.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A registry index is not a list of keys.
    #[error("corrupt index {index}: {reason}")]
    CorruptIndex {
        /// Index key.
        index: String,
        /// Decoder message.
        reason: String,
    },

    /// A stored record cannot be decoded.
    #[error("corrupt record {key}: {reason}")]
    CorruptRecord {
        /// Record key.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Seller holds fewer units than requested.
    #[error("insufficient quantity: {company} holds {held} of {asset}, requested {requested}")]
    InsufficientQuantity {
        /// Asset being sold.
        asset: String,
        /// Selling account.
        company: String,
        /// Units held.
        held: u64,
        /// Units requested.
        requested: u64,
    },

    /// Buyer cannot pay the settlement amount.
    #[error("insufficient funds: {company} has {available}, settlement requires {required}")]
    InsufficientFunds {
        /// Buying account.
        company: String,
        /// Cash balance.
        available: Decimal,
        /// Settlement amount.
        required: Decimal,
    },

    /// Invocation names no known function.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// Encoding a record failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store backend failed.
    #[error("store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

impl LedgerError {
    /// Creates an invalid record error.
    #[must_use]
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Creates an asset not found error.
    #[must_use]
    pub fn asset_not_found(id: impl fmt::Display) -> Self {
        Self::AssetNotFound(id.to_string())
    }

    /// Creates an account not found error.
    #[must_use]
    pub fn account_not_found(id: impl fmt::Display) -> Self {
        Self::AccountNotFound(id.to_string())
    }

    /// Creates an account exists error.
    #[must_use]
    pub fn account_exists(id: impl fmt::Display) -> Self {
        Self::AccountExists(id.to_string())
    }

    /// Creates a key not found error.
    #[must_use]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound(key.into())
    }

    /// Creates an unknown function error.
    #[must_use]
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction(name.into())
    }

    /// Stable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRecord(_) => "InvalidRecord",
            Self::InvalidTimestamp(_) => "InvalidTimestamp",
            Self::RecordNotFound { .. } => "RecordNotFound",
            Self::AssetNotFound(_) => "AssetNotFound",
            Self::AccountNotFound(_) => "AccountNotFound",
            Self::AccountExists(_) => "AccountExists",
            Self::KeyNotFound(_) => "KeyNotFound",
            Self::CorruptIndex { .. } => "CorruptIndex",
            Self::CorruptRecord { .. } => "CorruptRecord",
            Self::InsufficientQuantity { .. } => "InsufficientQuantity",
            Self::InsufficientFunds { .. } => "InsufficientFunds",
            Self::UnknownFunction(_) => "UnknownFunction",
            Self::Arithmetic(_) => "Arithmetic",
            Self::Serialization(_) => "Serialization",
            Self::StoreFailure(_) => "StoreFailure",
        }
    }

    /// Returns true if the operation referenced missing state.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. }
                | Self::AssetNotFound(_)
                | Self::AccountNotFound(_)
                | Self::KeyNotFound(_)
        )
    }

    /// Returns true if a transfer rule refused the operation.
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::InsufficientQuantity { .. } | Self::InsufficientFunds { .. }
        )
    }

    /// Returns true if the caller's input was rejected.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord(_) | Self::InvalidTimestamp(_) | Self::UnknownFunction(_)
        )
    }

    /// Returns true if stored state could not be decoded.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptIndex { .. } | Self::CorruptRecord { .. })
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRecord(msg) => Self::InvalidRecord(msg),
            DomainError::InvalidTimestamp(input) => Self::InvalidTimestamp(input),
            DomainError::InsufficientQuantity {
                asset,
                company,
                held,
                requested,
            } => Self::InsufficientQuantity {
                asset,
                company,
                held,
                requested,
            },
            DomainError::InsufficientFunds {
                company,
                available,
                required,
            } => Self::InsufficientFunds {
                company,
                available,
                required,
            },
            DomainError::Arithmetic(e) => Self::Arithmetic(e),
        }
    }
}

impl From<RepositoryError> for LedgerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity_type, key } => Self::RecordNotFound {
                entity: entity_type,
                key,
            },
            RepositoryError::CorruptIndex { index, reason } => Self::CorruptIndex {
                index: index.to_string(),
                reason,
            },
            RepositoryError::CorruptRecord { key, reason } => Self::CorruptRecord { key, reason },
            RepositoryError::Serialization(msg) => Self::Serialization(msg),
            RepositoryError::Domain(e) => e.into(),
            RepositoryError::Store(e) => Self::StoreFailure(e),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
