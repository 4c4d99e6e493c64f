//! Document model
//!
//! The page the localization controller renders into: elements, selectors
//! and page description files.

pub mod document;
pub mod page;
pub mod selector;

pub use document::{Document, ElementId, ElementSpec, Listener};
pub use page::Page;
pub use selector::Selector;
