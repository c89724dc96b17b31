//! Key-value backends
//!
//! The persistence medium behind the credential store. Multi-key writes and
//! removals are applied as one unit so readers never see half of them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::StorageError;

/// String key-value persistence with batched writes.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Sets every entry together.
    fn multi_set(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Removes every key together. Missing keys are ignored.
    fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError>;

    /// Reads several keys, returning values in the same order.
    fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        keys.iter().map(|key| self.get(key)).collect()
    }
}

/// In-process backend, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let entries = self.lock()?;
        Ok(keys.iter().map(|key| entries.get(*key).cloned()).collect())
    }

    fn multi_set(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        for (key, value) in entries {
            guard.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}
