//! Durable key-value slots
//!
//! The ledger persists its whole state as one serialized value under a single
//! key. [`DurableStore`] is that key-value boundary; [`FileStore`] keeps one
//! file per key and [`MemoryStore`] keeps everything in process.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_text, write_text_atomic};

/// A process-external key-value store that survives restarts
pub trait DurableStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Replace the value stored under `key`
    ///
    /// Implementations report failures as `LedgerError::Storage`.
    fn set(&mut self, key: &str, value: &str) -> LedgerResult<()>;
}

/// Stores each key as `<dir>/<key>.json`, written atomically
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        read_text(self.path_for(key))
    }

    fn set(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        write_text_atomic(self.path_for(key), value)
    }
}

/// In-process store, mostly for tests
///
/// Counts successful writes and can be switched into a failing mode to
/// exercise persistence error paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.into());
        store
    }

    /// Number of successful `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every subsequent `set` fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        if self.fail_writes {
            return Err(LedgerError::Storage(format!(
                "Write to '{}' rejected: quota exceeded",
                key
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("transactions").unwrap(), None);

        store.set("transactions", "[]").unwrap();
        assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("data").join("transactions.json").exists());
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().to_path_buf());

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();

        assert_eq!(store.writes(), 2);
        assert_eq!(store.raw("k"), Some("v2"));
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let mut store = MemoryStore::with_value("k", "old");
        store.set_fail_writes(true);

        let err = store.set("k", "new").unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.raw("k"), Some("old"));
        assert_eq!(store.writes(), 0);
    }
}
