//! File-backed key-value store
//!
//! Keeps the whole key space in one JSON document. Every write goes to a
//! temporary file that is then renamed over the original, so a batch either
//! lands completely or not at all. An unparsable document still fails reads
//! but is replaced by the next write.

use log::{debug, error, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::backend::KeyValueStore;
use crate::error::StorageError;

pub const STORE_FILE_NAME: &str = "session_store.json";

type Entries = BTreeMap<String, String>;

/// Key-value store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (or lazily creates) the store file inside `dir`.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STORE_FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                error!("Failed to read store {}: {}", self.path.display(), e);
                return Err(StorageError::from(e));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Store file {} is not valid JSON: {}", self.path.display(), e);
            StorageError::Corrupted(self.path.display().to_string())
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let temp = self.temp_path();

        fs::write(&temp, bytes)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            error!(
                "Failed to replace store {} with {}: {}",
                self.path.display(),
                temp.display(),
                e
            );
            let _ = fs::remove_file(&temp);
            return Err(StorageError::from(e));
        }

        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("file store lock poisoned".into()))?;
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Corrupted(path)) => {
                warn!("Discarding corrupted store {} on write", path);
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let entries = self.read_entries()?;
        Ok(keys.iter().map(|key| entries.get(*key).cloned()).collect())
    }

    fn multi_set(&self, batch: &[(&str, String)]) -> Result<(), StorageError> {
        self.update(|entries| {
            for (key, value) in batch {
                entries.insert((*key).to_string(), value.clone());
            }
        })
    }

    fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}
