//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use tracing_subscriber::EnvFilter;
use crate::dom::Selector;
use crate::utils::errors::{LocalizationError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_localization_config(&settings.localization)?;
    validate_storage_config(&settings.storage)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate localization configuration
fn validate_localization_config(config: &super::LocalizationConfig) -> Result<()> {
    if config.page_origin.is_empty() {
        return Err(LocalizationError::Config(
            "Page origin is required".to_string()
        ));
    }

    if config.locales_path.is_empty() {
        return Err(LocalizationError::Config(
            "Locales path is required".to_string()
        ));
    }

    config.locales_url()?;

    if config.storage_key.is_empty() {
        return Err(LocalizationError::Config(
            "Storage key is required".to_string()
        ));
    }

    if config.fallback_language.is_empty() {
        return Err(LocalizationError::Config(
            "Fallback language is required".to_string()
        ));
    }

    if config.active_class.is_empty() || config.active_class.contains(char::is_whitespace) {
        return Err(LocalizationError::Config(
            format!("Active class must be a single class name: '{}'", config.active_class)
        ));
    }

    Selector::parse(&config.control_selector)?;

    Ok(())
}

/// Validate preference storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    match config.backend {
        StorageBackend::Memory => {}
        StorageBackend::File => {
            if config.file_path.is_empty() {
                return Err(LocalizationError::Config(
                    "Storage file path is required for the file backend".to_string()
                ));
            }
        }
        StorageBackend::Redis => {
            if config.redis_url.is_empty() {
                return Err(LocalizationError::Config(
                    "Redis URL is required for the redis backend".to_string()
                ));
            }
            if config.redis_timeout_ms == 0 {
                return Err(LocalizationError::Config(
                    "Redis timeout must be greater than zero".to_string()
                ));
            }
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LocalizationError::Config(
            "Log level is required".to_string()
        ));
    }

    EnvFilter::try_new(&config.level).map_err(|e| {
        LocalizationError::Config(format!("Invalid log filter '{}': {}", config.level, e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_invalid_control_selector() {
        let mut settings = Settings::default();
        settings.localization.control_selector = ".language button".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(LocalizationError::InvalidSelector { .. })
        );
    }

    #[test]
    fn test_invalid_page_origin() {
        let mut settings = Settings::default();
        settings.localization.page_origin = "not a url".to_string();
        assert_matches!(validate_settings(&settings), Err(LocalizationError::UrlParse(_)));
    }

    #[test]
    fn test_active_class_with_whitespace() {
        let mut settings = Settings::default();
        settings.localization.active_class = "is active".to_string();
        assert_matches!(validate_settings(&settings), Err(LocalizationError::Config(_)));
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Redis;
        settings.storage.redis_url = String::new();
        assert_matches!(validate_settings(&settings), Err(LocalizationError::Config(_)));
    }

    #[test]
    fn test_redis_backend_requires_timeout() {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Redis;
        settings.storage.redis_timeout_ms = 0;
        assert_matches!(validate_settings(&settings), Err(LocalizationError::Config(_)));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "gestalt_localization=verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(LocalizationError::Config(_)));
    }

    #[test]
    fn test_log_filter_directives_are_accepted() {
        let mut settings = Settings::default();
        settings.logging.level = "warn,gestalt_localization=debug".to_string();
        assert!(validate_settings(&settings).is_ok());
    }
}
