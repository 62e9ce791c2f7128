//! # File Ledger Store
//!
//! A [`LedgerStore`] persisted as one JSON object mapping keys to their
//! UTF-8 values. The whole snapshot is rewritten on every write: the new
//! content goes to a sibling temp file which is then renamed over the
//! snapshot, so a crash leaves either the old or the new state.

use crate::infrastructure::persistence::traits::{LedgerStore, StoreError, StoreResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Snapshot-file store.
#[derive(Debug)]
pub struct FileLedgerStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileLedgerStore {
    /// Opens the snapshot at `path`. A missing file is an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Snapshot` if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::snapshot(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::io(format!("{}: {e}", path.display()))),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened ledger snapshot");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Snapshot location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the ledger holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let raw = serde_json::to_vec_pretty(entries).map_err(StoreError::snapshot)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(StoreError::io)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, raw).map_err(StoreError::io)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::io)
    }
}

impl LedgerStore for FileLedgerStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).map(|v| v.as_bytes().to_vec()))
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.put_all(vec![(key.to_string(), value)])
    }

    fn put_all(&self, batch: Vec<(String, Vec<u8>)>) -> StoreResult<()> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        for (key, value) in batch {
            let text = String::from_utf8(value).map_err(|e| StoreError::encoding(&key, e))?;
            next.insert(key, text);
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn scratch_path() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "paper-ledger-test-{}-{n}/ledger.json",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_is_empty() {
        let store = FileLedgerStore::open(scratch_path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn writes_survive_reopen() {
        let path = scratch_path();
        let store = FileLedgerStore::open(&path).unwrap();
        store
            .put_all(vec![
                ("PaperKeys".to_string(), b"[]".to_vec()),
                ("acct:company1".to_string(), br#"{"id":"company1"}"#.to_vec()),
            ])
            .unwrap();

        let reopened = FileLedgerStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get("PaperKeys").unwrap(), Some(b"[]".to_vec()));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn non_utf8_batch_is_refused_whole() {
        let path = scratch_path();
        let store = FileLedgerStore::open(&path).unwrap();
        let err = store
            .put_all(vec![
                ("ok".to_string(), b"1".to_vec()),
                ("bad".to_string(), vec![0xff, 0xfe]),
            ])
            .unwrap_err();
        assert!(matches!(err, StoreError::Encoding { ref key, .. } if key == "bad"));
        assert_eq!(store.get("ok").unwrap(), None);
    }

    #[test]
    fn garbage_snapshot_is_reported() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let err = FileLedgerStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Snapshot(_)));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
