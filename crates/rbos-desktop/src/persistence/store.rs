//! Key-value string storage

use std::collections::HashMap;

use crate::error::PersistenceError;

/// String-keyed string storage (browser local storage, a file, ...)
///
/// Backends report refused reads and writes as `PersistenceError::Storage`.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError>;
    /// Delete a value
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}
