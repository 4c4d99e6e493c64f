//! Localization controller
//!
//! Owns the active language, renders translations into the document,
//! remembers the user's choice across sessions and wires language-switch
//! controls. Everything runs on one thread: the dictionary continuation is a
//! local task, and state lives in `RefCell`s touched only from that thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tokio::sync::{watch, Notify};
use tokio::task::LocalSet;
use tracing::{debug, info, warn};
use crate::config::LocalizationConfig;
use crate::dom::{Document, ElementId, Selector};
use crate::storage::PreferenceStorage;
use crate::utils::errors::Result;
use crate::utils::logging::{log_language_change, log_render, log_storage_failure};
use super::dictionary::{TranslationDictionary, TranslationTable};
use super::render::{apply_translations, toggle_active_classes, LANGUAGE_ATTRIBUTE};
use super::store::{DictionaryRequest, TranslationStore};

pub const DEFAULT_CONTROL_SELECTOR: &str = ".language-button";
pub const DEFAULT_ACTIVE_CLASS: &str = "language-button-active";
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "en";
pub const DEFAULT_STORAGE_KEY: &str = "gestalt-language";

/// Options recognized by [`Localization::initialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationOptions {
    /// Selector for language-switch controls
    pub control_selector: String,
    /// Class toggled onto the control of the active language
    pub active_class: String,
    /// Language used when the requested one is not in the dictionary
    pub fallback_language: String,
    /// Storage key of the persisted preference
    pub storage_key: String,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        Self {
            control_selector: DEFAULT_CONTROL_SELECTOR.to_string(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            fallback_language: DEFAULT_FALLBACK_LANGUAGE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl From<&LocalizationConfig> for LocalizationOptions {
    fn from(config: &LocalizationConfig) -> Self {
        Self {
            control_selector: config.control_selector.clone(),
            active_class: config.active_class.clone(),
            fallback_language: config.fallback_language.clone(),
            storage_key: config.storage_key.clone(),
        }
    }
}

/// How a language change is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChange {
    /// Write the language to durable storage
    pub persist: bool,
}

impl Default for LanguageChange {
    fn default() -> Self {
        Self { persist: true }
    }
}

/// Lifecycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dictionary requested; the provisional language is highlighted only
    AwaitingDictionary,
    /// Dictionary loaded and the active language validated
    Ready,
    /// Dictionary load failed; the page keeps its shipped text
    Unavailable,
}

/// Handle returned by [`Localization::initialize`]
#[derive(Clone)]
pub struct Localization {
    inner: Rc<Controller>,
}

struct Controller {
    document: Document,
    store: TranslationStore,
    storage: Rc<dyn PreferenceStorage>,
    options: LocalizationOptions,
    controls: Vec<ElementId>,
    active_language: RefCell<String>,
    rendered_language: RefCell<Option<String>>,
    phase: watch::Sender<Phase>,
    retry: Notify,
}

impl Localization {
    /// Start localizing `document`.
    ///
    /// Restores the stored language (or the fallback), wires click listeners
    /// on every control, highlights the provisional language and requests the
    /// dictionary on a task spawned onto `local`. The dictionary is applied
    /// once `local` is driven.
    ///
    /// The controller lives as long as the document's listeners, so the
    /// returned handle may be dropped. Only an invalid control selector is
    /// reported; load and storage failures are logged and absorbed.
    pub fn initialize(
        local: &LocalSet,
        document: Document,
        store: TranslationStore,
        storage: Rc<dyn PreferenceStorage>,
        options: LocalizationOptions,
    ) -> Result<Self> {
        let selector = Selector::parse(&options.control_selector)?;
        let controls = document.query_selector_all(&selector);

        let stored = read_preference(storage.as_ref(), &options.storage_key);
        let active_language = stored
            .clone()
            .unwrap_or_else(|| options.fallback_language.clone());

        info!(
            language = %active_language,
            stored = stored.is_some(),
            controls = controls.len(),
            "Initializing localization"
        );

        let (phase, _) = watch::channel(Phase::AwaitingDictionary);
        let inner = Rc::new(Controller {
            document,
            store,
            storage,
            options,
            controls,
            active_language: RefCell::new(active_language),
            rendered_language: RefCell::new(None),
            phase,
            retry: Notify::new(),
        });

        for &control in &inner.controls {
            let controller = Rc::clone(&inner);
            inner.document.add_click_listener(
                control,
                Rc::new(move |element| controller.handle_control_click(element)),
            );
        }

        inner.highlight_controls();
        let request = inner.store.request();
        local.spawn_local(Rc::clone(&inner).drive(request));

        Ok(Self { inner })
    }

    /// Switch language and persist the choice
    pub fn set_language(&self, language: &str) {
        self.inner.set_language(language, LanguageChange::default());
    }

    pub fn set_language_with(&self, language: &str, change: LanguageChange) {
        self.inner.set_language(language, change);
    }

    /// Language currently in effect (provisional until the dictionary loads)
    pub fn active_language(&self) -> String {
        self.inner.active_language.borrow().clone()
    }

    /// Language whose table was used by the last render pass
    pub fn rendered_language(&self) -> Option<String> {
        self.inner.rendered_language.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        *self.inner.phase.borrow()
    }

    /// Wait until the dictionary has either loaded or failed
    pub async fn settled(&self) -> Phase {
        let mut receiver = self.inner.phase.subscribe();
        let result = receiver
            .wait_for(|phase| *phase != Phase::AwaitingDictionary)
            .await
            .map(|phase| *phase);
        result.unwrap_or_else(|_| self.phase())
    }

    /// Request the dictionary again after a failed load
    pub fn retry_load(&self) {
        if self.phase() != Phase::Unavailable {
            debug!(phase = ?self.phase(), "Retry ignored");
            return;
        }

        info!(url = %self.inner.store.url(), "Retrying translations load");
        self.inner.phase.send_replace(Phase::AwaitingDictionary);
        self.inner.retry.notify_one();
    }

    /// Re-run the render pass, e.g. after inserting elements
    pub fn render(&self) {
        if let Some(dictionary) = self.inner.store.cached() {
            let language = self.active_language();
            self.inner.render(&dictionary, &language);
        }
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    pub fn controls(&self) -> &[ElementId] {
        &self.inner.controls
    }

    pub fn options(&self) -> &LocalizationOptions {
        &self.inner.options
    }
}

impl Controller {
    /// Load the dictionary, waiting for a retry after each failure
    async fn drive(self: Rc<Self>, mut request: DictionaryRequest) {
        loop {
            match request.await {
                Ok(dictionary) => {
                    self.on_dictionary(&dictionary);
                    return;
                }
                Err(_) => self.on_load_failed(),
            }

            self.retry.notified().await;
            request = self.store.request();
        }
    }

    fn set_language(&self, language: &str, change: LanguageChange) {
        if language.is_empty() {
            debug!("Ignoring empty language");
            return;
        }

        let previous = self.active_language.replace(language.to_string());
        let persisted = change.persist && self.persist_preference(language);
        log_language_change(&previous, language, persisted);

        if let Some(dictionary) = self.store.cached() {
            self.render(&dictionary, language);
        }

        self.highlight_controls();
    }

    fn handle_control_click(&self, control: ElementId) {
        let Some(language) = self.document.attribute(control, LANGUAGE_ATTRIBUTE) else {
            return;
        };

        if language.is_empty() || *self.active_language.borrow() == language {
            return;
        }

        self.set_language(&language, LanguageChange::default());
    }

    fn on_dictionary(&self, dictionary: &TranslationDictionary) {
        let requested = self.active_language.borrow().clone();
        if !dictionary.contains_language(&requested) {
            info!(
                requested = %requested,
                fallback = %self.options.fallback_language,
                "Language not available, using fallback"
            );
            *self.active_language.borrow_mut() = self.options.fallback_language.clone();
        }

        let language = self.active_language.borrow().clone();
        self.render(dictionary, &language);
        self.highlight_controls();
        self.phase.send_replace(Phase::Ready);
    }

    fn on_load_failed(&self) {
        warn!(
            language = %self.active_language.borrow(),
            "Translations unavailable, keeping page text"
        );
        self.highlight_controls();
        self.phase.send_replace(Phase::Unavailable);
    }

    /// Render `language`, or the fallback when the dictionary lacks it
    fn render(&self, dictionary: &TranslationDictionary, language: &str) {
        let effective = if dictionary.contains_language(language) {
            language
        } else {
            self.options.fallback_language.as_str()
        };

        let empty = TranslationTable::default();
        let table = dictionary.table(effective).unwrap_or(&empty);
        let report = apply_translations(&self.document, table);

        log_render(effective, report.applied, report.missing);
        *self.rendered_language.borrow_mut() = Some(effective.to_string());
    }

    fn highlight_controls(&self) {
        let language = self.active_language.borrow().clone();
        toggle_active_classes(&self.document, &self.controls, &language, &self.options.active_class);
    }

    fn persist_preference(&self, language: &str) -> bool {
        match self.storage.set_item(&self.options.storage_key, language) {
            Ok(()) => true,
            Err(e) => {
                log_storage_failure("write", &self.options.storage_key, &e);
                false
            }
        }
    }
}

fn read_preference(storage: &dyn PreferenceStorage, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(value) => value.filter(|language| !language.is_empty()),
        Err(e) => {
            log_storage_failure("read", key, &e);
            None
        }
    }
}

impl fmt::Debug for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localization")
            .field("active_language", &self.active_language())
            .field("rendered_language", &self.rendered_language())
            .field("phase", &self.phase())
            .field("controls", &self.inner.controls.len())
            .field("options", &self.inner.options)
            .finish()
    }
}
