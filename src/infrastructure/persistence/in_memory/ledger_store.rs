//! # In-Memory Ledger Store
//!
//! In-memory implementation of [`LedgerStore`] for tests and embedding.
//!
//! This implementation uses a thread-safe `HashMap` for storage, making it
//! suitable for unit tests without a file on disk.

use crate::infrastructure::persistence::traits::{LedgerStore, StoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory implementation of [`LedgerStore`].
///
/// Clones share the same storage. A batch is applied under one write lock,
/// so readers never observe half of it.
#[derive(Debug, Clone)]
pub struct InMemoryLedgerStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryLedgerStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of keys in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every key, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.storage.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.storage.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.storage.write().insert(key.to_string(), value);
        Ok(())
    }

    fn put_all(&self, batch: Vec<(String, Vec<u8>)>) -> StoreResult<()> {
        let mut storage = self.storage.write();
        storage.extend(batch);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryLedgerStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn put_and_get() {
        let store = InMemoryLedgerStore::new();
        store.put("k", b"v1".to_vec()).unwrap();
        store.put("k", b"v2".to_vec()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_all_applies_every_entry() {
        let store = InMemoryLedgerStore::new();
        store
            .put_all(vec![
                ("b".to_string(), b"2".to_vec()),
                ("a".to_string(), b"1".to_vec()),
            ])
            .unwrap();
        assert_eq!(store.keys(), vec!["a", "b"]);
    }

    #[test]
    fn clones_share_storage() {
        let store = InMemoryLedgerStore::new();
        let handle = store.clone();
        handle.put("k", b"v".to_vec()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(handle.len(), store.len());
    }
}
