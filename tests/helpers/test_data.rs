//! Test data helpers
//!
//! Sample dictionaries, pages and storage used across the integration tests.

use std::rc::Rc;
use reqwest::Client;
use serde_json::{json, Value};
use gestalt_localization::dom::{Document, ElementId, ElementSpec};
use gestalt_localization::i18n::TranslationStore;
use gestalt_localization::storage::MemoryStorage;

pub const STORAGE_KEY: &str = "gestalt-language";
pub const ACTIVE_CLASS: &str = "language-button-active";

/// Dictionary with an English and a French table
pub fn sample_dictionary() -> Value {
    json!({
        "en": {
            "greet": "Hello",
            "search": "Search files",
            "intro": "<strong>Welcome</strong> to Gestalt"
        },
        "fr": {
            "greet": "Bonjour",
            "search": "Rechercher des fichiers",
            "intro": "<strong>Bienvenue</strong> sur Gestalt"
        }
    })
}

/// Handles to the interesting elements of the sample page
#[derive(Debug, Clone, Copy)]
pub struct SamplePage {
    pub greet: ElementId,
    pub search: ElementId,
    pub intro: ElementId,
    pub untranslated: ElementId,
    pub en_button: ElementId,
    pub fr_button: ElementId,
    pub de_button: ElementId,
}

impl SamplePage {
    pub fn buttons(&self) -> [ElementId; 3] {
        [self.en_button, self.fr_button, self.de_button]
    }
}

/// Page with one binding of each kind, an unknown key and three language buttons
pub fn sample_page() -> (Document, SamplePage) {
    let document = Document::new();

    let greet = document.append(
        ElementSpec::new("h1")
            .with_attribute("data-i18n", "greet")
            .with_text("Hi there"),
    );
    let search = document.append(
        ElementSpec::new("input")
            .with_attribute("data-i18n-placeholder", "search")
            .with_attribute("placeholder", "Search"),
    );
    let intro = document.append(
        ElementSpec::new("div")
            .with_attribute("data-i18n-html", "intro")
            .with_html("<em>Intro</em>"),
    );
    let untranslated = document.append(
        ElementSpec::new("p")
            .with_attribute("data-i18n", "footer.legal")
            .with_text("All rights reserved"),
    );
    let en_button = document.append(language_button("en", "EN"));
    let fr_button = document.append(language_button("fr", "FR"));
    let de_button = document.append(language_button("de", "DE"));

    (
        document,
        SamplePage {
            greet,
            search,
            intro,
            untranslated,
            en_button,
            fr_button,
            de_button,
        },
    )
}

pub fn language_button(language: &str, label: &str) -> ElementSpec {
    ElementSpec::new("button")
        .with_class("language-button")
        .with_attribute("data-lang", language)
        .with_text(label)
}

/// In-memory storage, optionally holding a stored language
pub fn storage_with(language: Option<&str>) -> Rc<MemoryStorage> {
    match language {
        Some(language) => Rc::new(MemoryStorage::with_items([(STORAGE_KEY, language)])),
        None => Rc::new(MemoryStorage::new()),
    }
}

/// Store pointed at the locales resource of `url`
pub fn store_for(url: url::Url) -> TranslationStore {
    TranslationStore::new(Client::new(), url)
}

/// Controls of `page` currently carrying the active class
pub fn highlighted(document: &Document, page: &SamplePage) -> Vec<ElementId> {
    page.buttons()
        .into_iter()
        .filter(|button| document.has_class(*button, ACTIVE_CLASS))
        .collect()
}
