//! Error types for the Scout client core.

use thiserror::Error;

/// A shared error type for the Scout client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. No variant is fatal to the
/// process; every failure is recoverable at the level of the UI action that
/// triggered it.
#[derive(Error, Debug, Clone)]
pub enum ScoutError {
    /// Missing or malformed input, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials rejected by the remote service
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport failure, timeout, or non-success response
    #[error("Network error: {0}")]
    Network(String),

    /// A retried operation failed on every attempt of its budget
    #[error("Retry budget exhausted after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        last: Box<ScoutError>,
    },

    /// Navigation requested a screen outside the closed set
    #[error("Unknown screen: '{0}'")]
    InvalidScreen(String),

    /// Persistence read/write or serialization failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ScoutError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an InvalidScreen error
    pub fn invalid_screen(name: impl Into<String>) -> Self {
        Self::InvalidScreen(name.into())
    }

    /// Wraps the last error of an exhausted retry budget
    pub fn retry_exhausted(attempts: u32, last: ScoutError) -> Self {
        Self::RetryExhausted {
            attempts,
            last: Box::new(last),
        }
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a RetryExhausted error
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, Self::RetryExhausted { .. })
    }

    /// Check if this is a Storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(format!("JSON serialization failed: {}", err))
    }
}

/// A type alias for `Result<T, ScoutError>`.
pub type Result<T> = std::result::Result<T, ScoutError>;
