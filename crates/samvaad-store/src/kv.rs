//! Durable key-value persistence.
//!
//! The storage medium is opaque to the rest of the workspace: string keys
//! to string values, synchronous get/set. Callers inject an implementation
//! rather than reaching for ambient global state, which keeps every store
//! testable against [`MemoryStore`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::StoreError;

/// Contract the core requires from the durable medium.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one file per key under a data directory.
///
/// Values survive across process restarts. Keys map directly to file names
/// (`<key>.json`), so they must not contain path separators — the workspace
/// only uses `drafts`, `reviews_<id>`, and `sentimentSummary_<id>`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open or create a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        debug!(key, bytes = value.len(), "wrote store key");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("drafts").unwrap().is_none());
        store.set("drafts", "[]").unwrap();
        assert_eq!(store.get("drafts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set("reviews_1", "a").unwrap();
        store.set("reviews_1", "b").unwrap();
        assert_eq!(store.get("reviews_1").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn file_store_creates_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        assert!(!dir.exists());
        FileStore::open(&dir).unwrap();
        assert!(dir.exists());
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(store.get("drafts").unwrap().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let tmp = tempfile::TempDir::new().unwrap();

        let store = FileStore::open(tmp.path()).unwrap();
        store.set("drafts", r#"[{"id":1}]"#).unwrap();
        drop(store);

        let store = FileStore::open(tmp.path()).unwrap();
        assert_eq!(
            store.get("drafts").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }
}
