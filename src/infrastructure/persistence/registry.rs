//! # Key-Index Registry
//!
//! Each enumerable record class keeps the ordered list of its store keys
//! under one well-known index key, since the store cannot range-scan.
//!
//! An absent index and a stored JSON `null` both read as empty. A key is
//! inserted at most once and insertion order is preserved.

use crate::infrastructure::codec;
use crate::infrastructure::persistence::traits::{
    LedgerStore, RepositoryError, RepositoryResult,
};
use std::fmt;
use tracing::debug;

/// Enumerable record classes, one index each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryClass {
    /// Commercial paper.
    Paper,
    /// Trade-finance quotes.
    Quote,
    /// Land records.
    Property,
    /// Purchase proposals.
    Proposal,
    /// Sale agreements.
    Agreement,
    /// Sale deeds.
    Deed,
    /// Notifications.
    Notification,
}

impl RegistryClass {
    /// Every class, in bootstrap order.
    pub const ALL: [Self; 7] = [
        Self::Paper,
        Self::Property,
        Self::Proposal,
        Self::Agreement,
        Self::Deed,
        Self::Notification,
        Self::Quote,
    ];

    /// Store key holding this class's index.
    #[must_use]
    pub const fn index_key(self) -> &'static str {
        match self {
            Self::Paper => "PaperKeys",
            Self::Quote => "QuoteKeys",
            Self::Property => "PropertyKeys",
            Self::Proposal => "ProposalKeys",
            Self::Agreement => "AgreementKeys",
            Self::Deed => "DeedKeys",
            Self::Notification => "NotificationKeys",
        }
    }
}

impl fmt::Display for RegistryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.index_key())
    }
}

/// Registry view over a store.
#[derive(Debug)]
pub struct KeyRegistry<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> KeyRegistry<'a, S> {
    /// Creates a registry view over `store`.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns the keys registered for `class`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::CorruptIndex` if the index is not a JSON
    /// list of strings.
    pub fn list_keys(&self, class: RegistryClass) -> RepositoryResult<Vec<String>> {
        let index = class.index_key();
        match self.store.get(index)? {
            Some(bytes) if !bytes.is_empty() => {
                let keys: Option<Vec<String>> = serde_json::from_slice(&bytes)
                    .map_err(|e| RepositoryError::corrupt_index(index, e))?;
                Ok(keys.unwrap_or_default())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Appends `key` to the class index unless already present.
    ///
    /// Returns whether the key was added. Nothing is written when it was
    /// already registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::CorruptIndex` on an undecodable index, in
    /// which case nothing is written.
    pub fn add_key(&self, class: RegistryClass, key: &str) -> RepositoryResult<bool> {
        let mut keys = self.list_keys(class)?;
        if keys.iter().any(|k| k == key) {
            return Ok(false);
        }
        keys.push(key.to_string());
        self.store.put(class.index_key(), codec::encode(&keys)?)?;
        debug!(index = class.index_key(), key, total = keys.len(), "registered key");
        Ok(true)
    }

    /// Resets every class index to the empty list.
    ///
    /// Destroys existing indexes; records themselves stay in the store but
    /// are no longer enumerable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the write fails.
    pub fn bootstrap(&self) -> RepositoryResult<()> {
        let empty = codec::encode(&Vec::<String>::new())?;
        let batch = RegistryClass::ALL
            .iter()
            .map(|class| (class.index_key().to_string(), empty.clone()))
            .collect();
        self.store.put_all(batch)?;
        Ok(())
    }
}
