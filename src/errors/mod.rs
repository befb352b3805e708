//! Domain-specific error types for the pingmon monitor
//!
//! This module provides structured error types using `thiserror` for
//! precise and ergonomic error handling throughout the application.

use thiserror::Error;

/// Main error type for the pingmon application
#[derive(Error, Debug)]
pub enum PingmonError {
    /// Configuration-related errors (CLI parsing, validation, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Probe execution errors (ping binary missing, probe timed out, etc.)
    #[error("Probe error: {0}")]
    Probe(String),

    /// Publish errors reported by the ingestion backend
    #[error("Publish error: {0}")]
    Publish(String),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Result type using PingmonError
pub type Result<T> = std::result::Result<T, PingmonError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn with_config_context(self, msg: &str) -> Result<T>;
    fn with_probe_context(self, msg: &str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_config_context(self, msg: &str) -> Result<T> {
        self.map_err(|e| PingmonError::Config(format!("{}: {}", msg, e)))
    }

    fn with_probe_context(self, msg: &str) -> Result<T> {
        self.map_err(|e| PingmonError::Probe(format!("{}: {}", msg, e)))
    }
}

// Convenience constructors
impl PingmonError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PingmonError::Config(msg.into())
    }

    pub fn probe<S: Into<String>>(msg: S) -> Self {
        PingmonError::Probe(msg.into())
    }

    pub fn publish<S: Into<String>>(msg: S) -> Self {
        PingmonError::Publish(msg.into())
    }
}
