//! Error types for claude-query-rs

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`QueryError`]
pub type Result<T> = std::result::Result<T, QueryError>;

/// Main error type for claude-query-rs
#[derive(Debug, Error)]
pub enum QueryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Missing API key for the provider
    #[error("Missing API key: set ANTHROPIC_API_KEY or configure a profile")]
    MissingApiKey,

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// API error returned by the service
    #[error("API error: {0}")]
    Api(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model profile not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Streaming protocol error
    #[error("Stream error: {0}")]
    Stream(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl From<String> for QueryError {
    fn from(s: String) -> Self {
        QueryError::Other(s)
    }
}

impl From<&str> for QueryError {
    fn from(s: &str) -> Self {
        QueryError::Other(s.to_string())
    }
}
