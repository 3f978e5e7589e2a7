//! Save/load persistence
//!
//! A tiny key-value interface with one backend per platform:
//! - `MemoryStorage`: tests and throwaway runs
//! - `FileStorage`: native, one JSON file per key with tmp → rename writes
//! - `LocalStorage`: browser `localStorage` (wasm32)
//!
//! Every caller treats failures as "nothing saved"; nothing here may stop
//! the simulation.

use std::collections::HashMap;
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[derive(Debug)]
pub enum StorageError {
    /// No backing store on this platform/session
    Unavailable,
    Io(std::io::Error),
    /// Backend-specific failure (e.g. a browser exception)
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Backend(msg) => write!(f, "storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// String key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("a").unwrap().is_none());
        storage.set("a", "1").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        storage.remove("a").unwrap();
        assert!(storage.get("a").unwrap().is_none());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
        let io = StorageError::from(std::io::Error::other("disk full"));
        assert!(io.to_string().contains("disk full"));
    }
}
