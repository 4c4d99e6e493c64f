//! Render pass and control highlighting

use crate::dom::{Document, ElementId, Selector};
use super::dictionary::TranslationTable;

/// Attribute holding the language code of a language-switch control
pub const LANGUAGE_ATTRIBUTE: &str = "data-lang";

/// Accessibility attribute mirroring the highlight state of a control
pub const PRESSED_ATTRIBUTE: &str = "aria-pressed";

/// Ways a translation can be bound to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `data-i18n`: replaces the text content
    Text,
    /// `data-i18n-placeholder`: sets the `placeholder` attribute
    Placeholder,
    /// `data-i18n-html`: replaces the inner markup
    Markup,
}

impl BindingKind {
    pub const ALL: [BindingKind; 3] = [BindingKind::Text, BindingKind::Placeholder, BindingKind::Markup];

    pub fn marker_attribute(self) -> &'static str {
        match self {
            BindingKind::Text => "data-i18n",
            BindingKind::Placeholder => "data-i18n-placeholder",
            BindingKind::Markup => "data-i18n-html",
        }
    }

    fn write(self, document: &Document, element: ElementId, value: &str) {
        match self {
            BindingKind::Text => document.set_text_content(element, value),
            BindingKind::Placeholder => document.set_attribute(element, "placeholder", value),
            BindingKind::Markup => document.set_inner_html(element, value),
        }
    }
}

/// Counts from a render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Bindings that received a translation
    pub applied: usize,
    /// Bindings left untouched because the key has no string translation
    pub missing: usize,
}

/// Elements currently bound with `kind`, paired with their translation key.
///
/// Scans the document on every call so inserted elements are always seen.
pub fn collect_bindings(document: &Document, kind: BindingKind) -> Vec<(ElementId, String)> {
    document
        .query_selector_all(&Selector::attribute(kind.marker_attribute()))
        .into_iter()
        .filter_map(|element| {
            document
                .attribute(element, kind.marker_attribute())
                .map(|key| (element, key))
        })
        .collect()
}

/// Write every available translation from `table` into the document
pub fn apply_translations(document: &Document, table: &TranslationTable) -> RenderReport {
    let mut report = RenderReport::default();

    for kind in BindingKind::ALL {
        for (element, key) in collect_bindings(document, kind) {
            match table.get(&key) {
                Some(value) => {
                    kind.write(document, element, value);
                    report.applied += 1;
                }
                None => report.missing += 1,
            }
        }
    }

    report
}

/// Highlight the controls whose language is `language` and clear the rest
pub fn toggle_active_classes(
    document: &Document,
    controls: &[ElementId],
    language: &str,
    active_class: &str,
) {
    for &control in controls {
        let is_active = document.attribute(control, LANGUAGE_ATTRIBUTE).as_deref() == Some(language);
        document.toggle_class(control, active_class, is_active);
        document.set_attribute(control, PRESSED_ATTRIBUTE, if is_active { "true" } else { "false" });
    }
}
