//! Page description files
//!
//! A page is stored as JSON: `{"elements": [{"tag": "h1", "attributes": {...}, "text": "..."}]}`.

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::utils::errors::Result;
use super::document::{Document, ElementSpec};

/// Serializable page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl Page {
    /// Read a page description from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let page: Page = serde_json::from_str(&content)?;
        debug!(path = %path.display(), elements = page.elements.len(), "Loaded page description");
        Ok(page)
    }

    /// Build a live document from this page
    pub fn into_document(self) -> Document {
        Document::from_elements(self.elements)
    }

    /// Capture the current state of a document
    pub fn snapshot(document: &Document) -> Self {
        Self {
            elements: document.snapshot(),
        }
    }
}
