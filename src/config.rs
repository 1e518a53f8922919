//! Configuration management for the outreach ledger.
//!
//! This module handles loading and validating configuration from environment variables.
//! The binary loads `.env` with `dotenvy` before anything reads the environment;
//! this module only reads the process environment.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use tracing_subscriber::EnvFilter;

/// Default name of the table holding outreach records.
pub const DEFAULT_TABLE: &str = "outreaches";

/// Configuration for the outreach ledger.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST base URL of the store (e.g. `https://<project>.supabase.co/rest/v1`)
    pub store_url: String,

    /// API key sent as both `apikey` and bearer token
    pub store_key: String,

    /// Table holding outreach records (default: "outreaches")
    pub table: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `LEDGER_STORE_URL`: REST base URL of the store
    /// - `LEDGER_STORE_KEY`: API key for the store
    ///
    /// Optional environment variables:
    /// - `LEDGER_TABLE`: Table name (default: "outreaches")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let store_url = env::var("LEDGER_STORE_URL")
            .map_err(|_| ConfigError::MissingVar("LEDGER_STORE_URL".to_string()))?;

        let store_key = env::var("LEDGER_STORE_KEY")
            .map_err(|_| ConfigError::MissingVar("LEDGER_STORE_KEY".to_string()))?;

        if !store_url.starts_with("http://") && !store_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "LEDGER_STORE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if store_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LEDGER_STORE_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let table = env::var("LEDGER_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());
        if table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LEDGER_TABLE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            store_url,
            store_key,
            table,
            request_timeout,
            log_level,
        })
    }

    /// Log filter for the subscriber. `RUST_LOG` wins over `log_level`.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_url: String::new(),
            store_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
