//! Translation store
//!
//! Fetches the translation dictionary at most once and shares it. Concurrent
//! callers receive the same in-flight request; a failed load clears that
//! marker so a later call may try again.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;
use crate::config::LocalizationConfig;
use crate::utils::errors::{LoadError, LoadResult, Result};
use crate::utils::logging::log_load_failure;
use super::dictionary::TranslationDictionary;

/// Shared handle on a dictionary load; every clone resolves to the same outcome
pub type DictionaryRequest = Shared<LocalBoxFuture<'static, LoadResult<Rc<TranslationDictionary>>>>;

/// Memoizing loader for the translation dictionary
#[derive(Clone)]
pub struct TranslationStore {
    inner: Rc<StoreState>,
}

struct StoreState {
    client: Client,
    url: Url,
    cached: RefCell<Option<Rc<TranslationDictionary>>>,
    inflight: RefCell<Option<DictionaryRequest>>,
    attempts: Cell<usize>,
}

impl TranslationStore {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            inner: Rc::new(StoreState {
                client,
                url,
                cached: RefCell::new(None),
                inflight: RefCell::new(None),
                attempts: Cell::new(0),
            }),
        }
    }

    /// Create a store for the locales resource named by configuration
    pub fn from_config(config: &LocalizationConfig) -> Result<Self> {
        let url = config.locales_url()?;
        let client = Client::builder()
            .user_agent(concat!("gestalt-localization/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::new(client, url))
    }

    /// Request the dictionary.
    ///
    /// Resolves immediately from the cache when loaded, joins the in-flight
    /// load when one exists, and otherwise starts a new load. The load runs
    /// when the returned handle is first polled.
    pub fn request(&self) -> DictionaryRequest {
        if let Some(dictionary) = self.cached() {
            return future::ready(Ok(dictionary)).boxed_local().shared();
        }

        if let Some(pending) = self.inner.inflight.borrow().as_ref() {
            debug!(url = %self.inner.url, "Joining in-flight locales request");
            return pending.clone();
        }

        let state = Rc::downgrade(&self.inner);
        let pending = async move { StoreState::load(state).await }
            .boxed_local()
            .shared();
        *self.inner.inflight.borrow_mut() = Some(pending.clone());
        pending
    }

    /// The dictionary, if it has been loaded
    pub fn cached(&self) -> Option<Rc<TranslationDictionary>> {
        self.inner.cached.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.inflight.borrow().is_some()
    }

    /// Number of network requests started so far
    pub fn attempts(&self) -> usize {
        self.inner.attempts.get()
    }

    pub fn url(&self) -> &Url {
        &self.inner.url
    }
}

impl StoreState {
    async fn load(state: Weak<StoreState>) -> LoadResult<Rc<TranslationDictionary>> {
        let Some(state) = state.upgrade() else {
            return Err(LoadError::Transport {
                cause: "translation store was dropped".to_string(),
            });
        };

        let result = state.fetch().await;
        state.inflight.borrow_mut().take();

        match result {
            Ok(dictionary) => {
                let dictionary = Rc::new(dictionary);
                *state.cached.borrow_mut() = Some(Rc::clone(&dictionary));
                info!(
                    url = %state.url,
                    languages = ?dictionary.languages(),
                    "Loaded translations"
                );
                Ok(dictionary)
            }
            Err(error) => {
                log_load_failure(state.url.as_str(), &error);
                Err(error)
            }
        }
    }

    async fn fetch(&self) -> LoadResult<TranslationDictionary> {
        if self.url.scheme() == "file" {
            return Err(LoadError::LocalFile {
                url: self.url.to_string(),
            });
        }

        self.attempts.set(self.attempts.get() + 1);
        debug!(url = %self.url, attempt = self.attempts.get(), "Requesting locales");

        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| LoadError::Transport {
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                status_code: response.status().as_u16(),
            });
        }

        response
            .json::<TranslationDictionary>()
            .await
            .map_err(|e| LoadError::Parse {
                cause: e.to_string(),
            })
    }
}

impl fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationStore")
            .field("url", &self.inner.url.as_str())
            .field("cached", &self.inner.cached.borrow().is_some())
            .field("loading", &self.is_loading())
            .field("attempts", &self.attempts())
            .finish()
    }
}
