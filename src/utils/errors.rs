//! Error handling for Gestalt localization
//!
//! This module defines the error types used throughout the crate. Only
//! configuration errors ever leave the public entry point; load and storage
//! failures are logged and recovered where they happen.

use thiserror::Error;

/// Main error type for the localization crate
#[derive(Error, Debug)]
pub enum LocalizationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to load translations: {0}")]
    LoadFailed(#[from] LoadError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Dictionary load failures.
///
/// Cloneable because every waiter on a shared load receives the same outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load locales: {status_code}")]
    Status { status_code: u16 },

    #[error("Locales request failed: {cause}")]
    Transport { cause: String },

    #[error("Invalid locales payload: {cause}")]
    Parse { cause: String },

    #[error("Locales cannot be fetched from a local file: {url}")]
    LocalFile { url: String },
}

/// Result type alias for localization operations
pub type Result<T> = std::result::Result<T, LocalizationError>;

/// Result type alias for dictionary loads
pub type LoadResult<T> = std::result::Result<T, LoadError>;

impl LocalizationError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LocalizationError::Config(_) => false,
            LocalizationError::InvalidSelector { .. } => false,
            LocalizationError::StorageUnavailable(_) => true,
            LocalizationError::LoadFailed(e) => e.is_retryable(),
            LocalizationError::Redis(_) => true,
            LocalizationError::Http(_) => true,
            LocalizationError::Serialization(_) => false,
            LocalizationError::Io(_) => true,
            LocalizationError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LocalizationError::Config(_) => ErrorSeverity::Critical,
            LocalizationError::InvalidSelector { .. } => ErrorSeverity::Critical,
            LocalizationError::UrlParse(_) => ErrorSeverity::Critical,
            LocalizationError::StorageUnavailable(_) => ErrorSeverity::Warning,
            LocalizationError::Redis(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl LoadError {
    /// Whether a later request may succeed where this one failed.
    ///
    /// A `file://` origin never changes during a page lifetime.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LoadError::LocalFile { .. })
    }

    /// HTTP status code, when the failure came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LoadError::Status { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
