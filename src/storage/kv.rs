//! Key-value persistence backends
//!
//! The expense store only needs string values under string keys. `FileStore`
//! keeps one JSON document per key in a directory; `MemoryStore` keeps them
//! in a map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;

use super::file_io::{read_string, remove_file_if_exists, write_string_atomic};

/// A string-to-string persistence layer
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, ExpenseError>;

    /// Replace the value under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), ExpenseError>;

    /// Remove `key`; absent keys are ignored
    fn remove_item(&self, key: &str) -> Result<(), ExpenseError>;
}

/// Directory-backed store, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, ExpenseError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ExpenseError::StorageUnavailable(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        read_string(self.path_for(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        write_string_atomic(self.path_for(key)?, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), ExpenseError> {
        remove_file_if_exists(self.path_for(key)?)
    }
}

/// In-process store for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        data.remove(key);
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
        let store = FileStore::new(temp_dir.path().join("data"));

        assert!(store.get_item("expenses").unwrap().is_none());

        store.set_item("expenses", "[]").unwrap();
        assert_eq!(store.get_item("expenses").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("data").join("expenses.json").exists());

        store.remove_item("expenses").unwrap();
        assert!(store.get_item("expenses").unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        for key in ["", "../escape", "a/b", "with space"] {
            let err = store.set_item(key, "x").unwrap_err();
            assert!(err.is_storage_failure(), "key {:?}", key);
        }
    }

    #[test]
    fn test_file_store_unreadable_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        // A directory where the value file should be cannot be read as text
        std::fs::create_dir(temp_dir.path().join("expenses.json")).unwrap();

        let err = store.get_item("expenses").unwrap_err();
        assert!(matches!(err, ExpenseError::StorageUnavailable(_)));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.get_item("k").unwrap().is_none());

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }
}
