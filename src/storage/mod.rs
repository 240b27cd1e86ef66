//! Storage layer for the expense tracker
//!
//! A small key-value abstraction with a file-backed implementation (atomic
//! writes, directory created on demand) and the expense store built on it.

pub mod expenses;
pub mod file_io;
pub mod kv;

pub use expenses::{ExpenseStore, EXPENSES_KEY};
pub use file_io::{read_json, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator for the application's on-disk data
pub struct Storage {
    pub expenses: ExpenseStore<FileStore>,
}

impl Storage {
    /// Open storage under the given paths, creating directories as needed
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseStore::new(FileStore::new(paths.data_dir())),
        })
    }
}
