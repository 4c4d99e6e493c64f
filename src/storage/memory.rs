//! In-memory preference storage

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use crate::utils::errors::{LocalizationError, Result};
use super::PreferenceStorage;

/// Session-only storage; can be switched off to behave like a browser in
/// privacy mode, where every access throws.
#[derive(Debug)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    available: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            available: Cell::new(true),
        }
    }

    /// Storage pre-populated with `items`
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        storage
    }

    /// Storage whose every access fails
    pub fn unavailable() -> Self {
        let storage = Self::new();
        storage.available.set(false);
        storage
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.get() {
            Ok(())
        } else {
            Err(LocalizationError::StorageUnavailable(
                "storage access denied".to_string(),
            ))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_get_and_set() {
        let storage = MemoryStorage::with_items([("gestalt-language", "de")]);
        assert_eq!(storage.get_item("gestalt-language").unwrap().as_deref(), Some("de"));

        storage.set_item("gestalt-language", "fr").unwrap();
        assert_eq!(storage.get_item("gestalt-language").unwrap().as_deref(), Some("fr"));
        assert_eq!(storage.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_unavailable_storage() {
        let storage = MemoryStorage::unavailable();
        assert_matches!(
            storage.get_item("gestalt-language"),
            Err(LocalizationError::StorageUnavailable(_))
        );
        assert_matches!(
            storage.set_item("gestalt-language", "fr"),
            Err(LocalizationError::StorageUnavailable(_))
        );

        storage.set_available(true);
        assert!(storage.set_item("gestalt-language", "fr").is_ok());
    }
}
