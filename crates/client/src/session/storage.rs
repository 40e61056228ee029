//! Key-value persistence port for session entries.
//!
//! The session store serializes its own state; storage backends only move
//! strings. Production uses [`FileStorage`]; tests use [`MemoryStorage`].

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a [`SessionStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The session entry could not be serialized.
    #[error("session entry serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value storage for session entries.
pub trait SessionStorage: Send + Sync {
    /// Read the entry stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails; a missing
    /// entry is `Ok(None)`.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot persist the entry.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the entry under `key`. Deleting a missing entry is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot remove the entry.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed storage adapter.
///
/// Each key is persisted as its own JSON document under the base
/// directory. Writes are last-write-wins; there is no locking across
/// processes.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create an adapter rooted at `dir`. The directory is created lazily
    /// on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage adapter for tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.load("user").unwrap().is_none());

        storage.store("user", "{}").unwrap();
        assert_eq!(storage.load("user").unwrap().as_deref(), Some("{}"));

        storage.remove("user").unwrap();
        assert!(storage.load("user").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("never-stored").is_ok());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.load("user").unwrap().is_none());

        storage.store("user", r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(
            storage.load("user").unwrap().as_deref(),
            Some(r#"{"email":"a@b.com"}"#)
        );

        storage.remove("user").unwrap();
        assert!(storage.load("user").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_dir_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("session");
        let storage = FileStorage::new(&nested);

        storage.store("user", "{}").unwrap();
        assert!(nested.join("user.json").exists());
    }
}
