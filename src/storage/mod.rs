//! Durable key-value storage for the language preference
//!
//! Backends mirror browser local storage: string keys, string values,
//! synchronous access, and failures the caller is expected to survive.

pub mod file;
pub mod memory;
pub mod redis;

use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use crate::config::{StorageBackend, StorageConfig};
use crate::utils::errors::Result;

pub use self::file::FileStorage;
pub use self::memory::MemoryStorage;
pub use self::redis::RedisStorage;

/// Synchronous string key-value storage
pub trait PreferenceStorage {
    /// Read a value; `Ok(None)` when the key was never written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Build the storage backend selected by configuration
pub fn from_config(config: &StorageConfig) -> Result<Rc<dyn PreferenceStorage>> {
    info!(backend = ?config.backend, "Initializing preference storage");

    let storage: Rc<dyn PreferenceStorage> = match config.backend {
        StorageBackend::Memory => Rc::new(MemoryStorage::new()),
        StorageBackend::File => Rc::new(FileStorage::new(&config.file_path)),
        StorageBackend::Redis => Rc::new(RedisStorage::new(
            &config.redis_url,
            &config.redis_prefix,
            Duration::from_millis(config.redis_timeout_ms),
        )?),
    };

    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_from_config() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let storage = from_config(&config).unwrap();
        storage.set_item("gestalt-language", "fr").unwrap();
        assert_eq!(storage.get_item("gestalt-language").unwrap().as_deref(), Some("fr"));
    }

    #[test]
    fn test_file_backend_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            file_path: dir.path().join("prefs.json").display().to_string(),
            ..StorageConfig::default()
        };
        let storage = from_config(&config).unwrap();
        assert_eq!(storage.get_item("gestalt-language").unwrap(), None);
    }
}
