//! Error types for the outreach ledger.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the outreach store.
///
/// Store-side message text is carried verbatim so callers can display it.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Caller supplied neither a phone number nor an email
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store could not be reached (connection refused, DNS, timeout)
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store answered with an error status
    #[error("Query failed (status {status}): {message}")]
    QueryFailed { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Anything else surfaced while awaiting an operation
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::InvalidInput(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
