//! Gestalt page localization
//!
//! Loads a dictionary of translated strings, applies it to marked elements of
//! a page, tracks the selected language and persists that choice across
//! sessions.

pub mod config;
pub mod dom;
pub mod i18n;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LoadError, LocalizationError, Result};

// Re-export main components for easy access
pub use dom::{Document, ElementSpec, Page};
pub use i18n::{Localization, LocalizationOptions, TranslationStore};
pub use storage::PreferenceStorage;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
