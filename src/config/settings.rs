//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use url::Url;
use crate::i18n::controller::{
    DEFAULT_ACTIVE_CLASS, DEFAULT_CONTROL_SELECTOR, DEFAULT_FALLBACK_LANGUAGE, DEFAULT_STORAGE_KEY,
};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub localization: LocalizationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Localization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Origin the page is served from; the locales path is resolved against it
    pub page_origin: String,
    pub locales_path: String,
    pub storage_key: String,
    pub control_selector: String,
    pub active_class: String,
    pub fallback_language: String,
}

/// Backend used for the persisted language preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

/// Preference storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub file_path: String,
    pub redis_url: String,
    pub redis_prefix: String,
    /// Connect, read and write timeout for the redis backend
    pub redis_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stderr only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from the default `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config", false)
    }

    /// Load settings from a specific configuration file and environment variables
    pub fn from_file(path: &str, required: bool) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(required))
            .add_source(
                config::Environment::with_prefix("GESTALT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::LocalizationError> {
        super::validation::validate_settings(self)
    }
}

impl LocalizationConfig {
    /// Resolve the locales resource against the page origin
    pub fn locales_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.page_origin)?.join(&self.locales_path)
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            page_origin: "http://localhost:8080/".to_string(),
            locales_path: "locales.json".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            control_selector: DEFAULT_CONTROL_SELECTOR.to_string(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            fallback_language: DEFAULT_FALLBACK_LANGUAGE.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            file_path: "gestalt-storage.json".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            redis_prefix: "gestalt:".to_string(),
            redis_timeout_ms: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
