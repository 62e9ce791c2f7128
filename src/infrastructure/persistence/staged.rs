//! # Staged Store
//!
//! A write overlay on top of another [`LedgerStore`]. Writes are buffered and
//! visible to later reads through the overlay; nothing reaches the base
//! store until [`StagedStore::commit`] hands the whole write set to
//! [`LedgerStore::put_all`]. Dropping the overlay discards it.

use crate::infrastructure::persistence::traits::{LedgerStore, StoreResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Per-invocation write set over a base store.
#[derive(Debug)]
pub struct StagedStore<'a, S: LedgerStore + ?Sized> {
    base: &'a S,
    writes: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl<'a, S: LedgerStore + ?Sized> StagedStore<'a, S> {
    /// Opens an empty write set over `base`.
    #[must_use]
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of distinct keys written so far.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.writes.lock().len()
    }

    /// Keys written so far, sorted.
    #[must_use]
    pub fn pending_keys(&self) -> Vec<String> {
        self.writes.lock().keys().cloned().collect()
    }

    /// Writes the staged set to the base store in one batch.
    ///
    /// Returns the number of keys committed.
    ///
    /// # Errors
    ///
    /// Returns the base store's error. What the base keeps of a failed batch
    /// is up to the base store.
    pub fn commit(self) -> StoreResult<usize> {
        let writes = self.writes.into_inner();
        let count = writes.len();
        if count > 0 {
            self.base.put_all(writes.into_iter().collect())?;
        }
        Ok(count)
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for StagedStore<'_, S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if let Some(value) = self.writes.lock().get(key) {
            return Ok(Some(value.clone()));
        }
        self.base.get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.writes.lock().insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryLedgerStore;

    #[test]
    fn reads_see_staged_writes() {
        let base = InMemoryLedgerStore::new();
        base.put("k", b"old".to_vec()).unwrap();
        let staged = StagedStore::new(&base);

        staged.put("k", b"new".to_vec()).unwrap();

        assert_eq!(staged.get("k").unwrap(), Some(b"new".to_vec()));
        assert_eq!(base.get("k").unwrap(), Some(b"old".to_vec()));
    }

    #[test]
    fn reads_fall_through_to_base() {
        let base = InMemoryLedgerStore::new();
        base.put("k", b"v".to_vec()).unwrap();
        let staged = StagedStore::new(&base);
        assert_eq!(staged.get("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(staged.get("other").unwrap(), None);
    }

    #[test]
    fn commit_publishes_every_write() {
        let base = InMemoryLedgerStore::new();
        let staged = StagedStore::new(&base);
        staged.put("a", b"1".to_vec()).unwrap();
        staged.put("b", b"2".to_vec()).unwrap();
        staged.put("a", b"3".to_vec()).unwrap();
        assert_eq!(staged.pending_keys(), vec!["a", "b"]);

        assert_eq!(staged.commit().unwrap(), 2);

        assert_eq!(base.get("a").unwrap(), Some(b"3".to_vec()));
        assert_eq!(base.get("b").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn dropping_discards_writes() {
        let base = InMemoryLedgerStore::new();
        {
            let staged = StagedStore::new(&base);
            staged.put("a", b"1".to_vec()).unwrap();
        }
        assert!(base.is_empty());
    }
}
