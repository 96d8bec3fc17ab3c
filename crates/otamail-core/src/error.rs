//! Error types for the otamail-core library.
//!
//! Parsing and rendering never fail: a field that cannot be found is `None`.
//! These errors cover the surrounding layer (configuration, strict id lookup).

use thiserror::Error;

/// Main error type for the otamail library.
#[derive(Error, Debug)]
pub enum OtamailError {
    /// Platform identifier not present in the registry.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// Template identifier not present in the template catalog.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the otamail library.
pub type Result<T> = std::result::Result<T, OtamailError>;
