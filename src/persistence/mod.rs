//! Key-value persistence for scores and preferences
//!
//! Values are stored as JSON strings under a string key. Reads and writes
//! never interrupt gameplay: every failure degrades to the in-memory value
//! and a warning in the log.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Storage backend failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backend available (private browsing, no window, ...)
    Unavailable,
    /// Backend rejected the operation (quota exceeded, security error, ...)
    Backend(String),
    /// Stored value could not be decoded
    Malformed { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Backend(msg) => write!(f, "storage error: {}", msg),
            StorageError::Malformed { key, reason } => {
                write!(f, "malformed value for \"{}\": {}", key, reason)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value store (LocalStorage on the web)
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Decode the JSON value stored under `key`
///
/// `Ok(None)` when nothing is stored.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

pub fn write_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Malformed {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    storage.set(key, &json)
}

/// A typed value mirrored to storage under a fixed key
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    key: &'static str,
    value: T,
}

impl<T: Serialize + DeserializeOwned> Persisted<T> {
    /// Read `key`, falling back to `default` if absent, unreadable or malformed
    pub fn load(storage: &dyn Storage, key: &'static str, default: T) -> Self {
        let value = match read_json(storage, key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Using default for \"{}\": {}", key, e);
                default
            }
        };
        Self { key, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Replace the value without writing it back
    pub fn set_in_memory(&mut self, value: T) {
        self.value = value;
    }

    /// Update the in-memory value and write it through
    ///
    /// A failed write keeps the new value in memory.
    pub fn set(&mut self, storage: &mut dyn Storage, value: T) {
        self.value = value;
        if let Err(e) = write_json(storage, self.key, &self.value) {
            log::warn!("Failed to save \"{}\": {}", self.key, e);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Backend where every operation fails
    pub(crate) struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_missing_key_uses_default() {
        let storage = MemoryStorage::new();
        let slot = Persisted::load(&storage, "high-score", 7u64);
        assert_eq!(*slot.get(), 7);
    }

    #[test]
    fn test_write_through_and_reload() {
        let mut storage = MemoryStorage::new();
        let mut slot = Persisted::load(&storage, "high-score", 0u64);
        slot.set(&mut storage, 120);
        assert_eq!(storage.get("high-score").unwrap().as_deref(), Some("120"));

        let reloaded = Persisted::load(&storage, "high-score", 0u64);
        assert_eq!(*reloaded.get(), 120);
    }

    #[test]
    fn test_malformed_value_is_treated_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set("high-score", "{not json").unwrap();
        let slot = Persisted::load(&storage, "high-score", 3u64);
        assert_eq!(*slot.get(), 3);

        let err = read_json::<u64>(&storage, "high-score").unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
    }

    #[test]
    fn test_wrong_type_is_treated_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set("high-score", "\"lots\"").unwrap();
        let slot = Persisted::load(&storage, "high-score", 0u64);
        assert_eq!(*slot.get(), 0);
    }

    #[test]
    fn test_broken_backend_is_not_fatal() {
        let mut storage = BrokenStorage;
        let mut slot = Persisted::load(&storage, "high-score", 5u64);
        assert_eq!(*slot.get(), 5);
        slot.set(&mut storage, 50);
        assert_eq!(*slot.get(), 50);
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Malformed {
            key: "k".to_string(),
            reason: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "malformed value for \"k\": bad");
    }
}
