//! # Store and Repository Ports
//!
//! The key-value ledger store the engine runs against, and the error type
//! shared by every repository built on top of it.
//!
//! # Available Ports
//!
//! - [`LedgerStore`]: `get` / `put` / `put_all` over string keys and byte values
//!
//! # Examples
//!
//! ```
//! use paper_ledger::infrastructure::persistence::{InMemoryLedgerStore, LedgerStore};
//!
//! let store = InMemoryLedgerStore::new();
//! store.put("greeting", b"hello".to_vec()).unwrap();
//! assert_eq!(store.get("greeting").unwrap(), Some(b"hello".to_vec()));
//! ```

use crate::domain::errors::DomainError;
use std::fmt;
use thiserror::Error;

/// Error raised by a store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Filesystem or device failure.
    #[error("io error: {0}")]
    Io(String),

    /// The persisted snapshot cannot be read back.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// The backend cannot hold the given value.
    #[error("encoding error for key {key}: {reason}")]
    Encoding {
        /// Key being written.
        key: String,
        /// Why the value was refused.
        reason: String,
    },
}

impl StoreError {
    /// Creates an io error.
    #[must_use]
    pub fn io(msg: impl fmt::Display) -> Self {
        Self::Io(msg.to_string())
    }

    /// Creates a snapshot error.
    #[must_use]
    pub fn snapshot(msg: impl fmt::Display) -> Self {
        Self::Snapshot(msg.to_string())
    }

    /// Creates an encoding error.
    #[must_use]
    pub fn encoding(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Encoding {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value ledger store.
///
/// Reads must observe earlier writes made through the same handle.
/// Implementations use interior locking; callers invoke one operation at a
/// time.
pub trait LedgerStore: Send + Sync + fmt::Debug {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails.
    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Stores every entry of `batch`.
    ///
    /// The default applies the entries one by one. Backends that can apply
    /// a batch atomically should override it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on the first failing write.
    fn put_all(&self, batch: Vec<(String, Vec<u8>)>) -> StoreResult<()> {
        for (key, value) in batch {
            self.put(&key, value)?;
        }
        Ok(())
    }
}

/// Error type for repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record under the key.
    #[error("{entity_type} not found: {key}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Store key looked up.
        key: String,
    },

    /// A registry index exists but is not a list of keys.
    #[error("corrupt index {index}: {reason}")]
    CorruptIndex {
        /// Index store key.
        index: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// A stored record cannot be decoded.
    #[error("corrupt record {key}: {reason}")]
    CorruptRecord {
        /// Record store key.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Domain rule rejected the record or its merge.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Store backend failure.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            key: key.into(),
        }
    }

    /// Creates a corrupt index error.
    #[must_use]
    pub fn corrupt_index(index: &'static str, reason: impl fmt::Display) -> Self {
        Self::CorruptIndex {
            index,
            reason: reason.to_string(),
        }
    }

    /// Creates a corrupt record error.
    #[must_use]
    pub fn corrupt_record(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::CorruptRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl fmt::Display) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if stored data could not be decoded.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptIndex { .. } | Self::CorruptRecord { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
