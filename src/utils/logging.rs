//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the localization subsystem.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{LoadError, LocalizationError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender and must be kept alive for the
/// lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| LocalizationError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(dir) if !dir.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(dir, "gestalt-localization.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LocalizationError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a change of the active language
pub fn log_language_change(from: &str, to: &str, persisted: bool) {
    info!(
        from = from,
        to = to,
        persisted = persisted,
        "Active language changed"
    );
}

/// Log the outcome of a render pass
pub fn log_render(language: &str, applied: usize, missing: usize) {
    debug!(
        language = language,
        applied = applied,
        missing = missing,
        "Translations rendered"
    );
}

/// Log a failed dictionary load, with a hint for local-file pages
pub fn log_load_failure(url: &str, error: &LoadError) {
    error!(url = url, error = %error, "Localization error");

    if matches!(error, LoadError::LocalFile { .. }) {
        warn!("Serve the app over http:// or https:// so locales.json can be fetched.");
    }
}

/// Log a storage read/write failure
pub fn log_storage_failure(operation: &str, key: &str, error: &LocalizationError) {
    error!(
        operation = operation,
        key = key,
        error = %error,
        "Localization storage error"
    );
}
