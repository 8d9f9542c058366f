//! Error handling for domain combination and checking operations.
//!
//! One error type covers input validation, configuration loading and the
//! per-lookup failures that end up in the report's error bucket.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the library.
///
/// Input and configuration variants stop a run before any lookup is made.
/// Lookup variants (`WhoisError`, `Timeout`) are captured per domain and
/// never abort a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainCheckError {
    /// Keyword or flag input that cannot produce a run
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The directory lookup for a domain failed
    #[error("WHOIS error for '{domain}': {message}")]
    WhoisError { domain: String, message: String },

    /// A lookup exceeded the configured per-lookup timeout
    #[error("Timeout after {duration:?} during: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Invalid settings in a config file or environment variable
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Config file could not be read
    #[error("File error at '{path}': {message}")]
    FileError { path: String, message: String },
}

impl DomainCheckError {
    /// Create a new invalid input error.
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error belongs to a single lookup rather than the whole run.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::WhoisError { .. } | Self::Timeout { .. })
    }
}

impl From<toml::de::Error> for DomainCheckError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}
