//! Internationalization module
//!
//! Loads the translation dictionary once, renders the active language into
//! the document and keeps the user's language choice across sessions.

pub mod controller;
pub mod dictionary;
pub mod render;
pub mod store;

// Re-export commonly used i18n components
pub use controller::{LanguageChange, Localization, LocalizationOptions, Phase};
pub use dictionary::{TranslationDictionary, TranslationTable};
pub use render::{BindingKind, RenderReport};
pub use store::{DictionaryRequest, TranslationStore};
