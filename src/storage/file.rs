//! JSON file preference storage
//!
//! Every access reads the file so that several processes sharing it observe
//! each other's writes, like tabs sharing browser storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::utils::errors::{LocalizationError, Result};
use super::PreferenceStorage;

/// Storage persisted as a flat JSON object of strings
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                LocalizationError::StorageUnavailable(format!(
                    "corrupt storage file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(LocalizationError::StorageUnavailable(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl PreferenceStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        let serialized = serde_json::to_string_pretty(&items)?;
        std::fs::write(&self.path, serialized).map_err(|e| {
            LocalizationError::StorageUnavailable(format!(
                "cannot write {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(path = %self.path.display(), key = key, "Stored preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_values_survive_new_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        FileStorage::new(&path).set_item("gestalt-language", "fr").unwrap();
        FileStorage::new(&path).set_item("theme", "dark").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("gestalt-language").unwrap().as_deref(), Some("fr"));
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get_item("gestalt-language").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert_matches!(
            storage.get_item("gestalt-language"),
            Err(LocalizationError::StorageUnavailable(_))
        );
    }

    #[test]
    fn test_unwritable_location_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("missing-dir").join("storage.json"));
        assert_matches!(
            storage.set_item("gestalt-language", "fr"),
            Err(LocalizationError::StorageUnavailable(_))
        );
    }
}
