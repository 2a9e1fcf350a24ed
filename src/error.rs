//! Error types for the multiverse catalog client
//!
//! This module defines the error hierarchy for the entire crate.
//! All fallible public APIs return `Result<T, Error>` where Error is defined here.
//! The sentinel-returning paginator entry points swallow these errors and log them.

use thiserror::Error;

/// The main error type for the catalog client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Catalog Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid continuation reference '{reference}': {message}")]
    InvalidContinuation { reference: String, message: String },

    #[error("Character has no episode references")]
    EmptyEpisodeList,

    #[error("Failed to resolve episode '{reference}': {message}")]
    EpisodeResolution { reference: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid continuation error
    pub fn continuation(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidContinuation {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create an episode resolution error
    pub fn episode(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EpisodeResolution {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Whether the transport should try the request again
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if this error is a 404 from the catalog
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::HttpStatus { status: 404, .. })
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the catalog client
pub type Result<T> = std::result::Result<T, Error>;
