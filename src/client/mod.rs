//! HTTP client for the outreach store's REST table API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client speaks the PostgREST dialect: equality
//! and `or=(...)` filters as query parameters, `order=` for sorting, and
//! `Prefer: return=representation` to get inserted rows back.

mod async_wrapper;
pub use async_wrapper::{AsyncLedgerClient, AsyncLedgerClientImpl};

use crate::config::{Config, DEFAULT_TABLE};
use crate::domain::ContactQuery;
use crate::error::{LedgerError, LedgerResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{NewOutreach, OutreachRecord};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Error body returned by the store (PostgREST shape).
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
}

/// HTTP client for the outreach table.
///
/// Stateless between calls apart from metrics; every method is one request.
#[derive(Clone)]
pub struct LedgerClient {
    /// REST base URL of the store
    base_url: String,

    /// API key, sent as `apikey` and as a bearer token
    api_key: String,

    /// Table holding outreach records
    table: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl LedgerClient {
    /// Create a new LedgerClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.store_url.clone(),
            api_key: config.store_key.clone(),
            table: config.table.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a LedgerClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            table: DEFAULT_TABLE.to_string(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build the table URL with an encoded query string.
    fn build_url(&self, params: &[(String, String)]) -> String {
        let base = self.base_url.trim_end_matches('/');
        let table = self.table.trim_start_matches('/');

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}/{}", base, table)
        } else {
            format!("{}/{}?{}", base, table, query)
        }
    }

    /// Execute a GET request with authentication.
    fn get(&self, params: &[(String, String)]) -> LedgerResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(params);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::error!("GET {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }
        tracing::debug!(metrics = %self.metrics.snapshot(), "store traffic");

        result
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, body: &serde_json::Value) -> LedgerResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(&[]);

        tracing::debug!("POST {}", url);
        tracing::debug!("Request body: {}", body);

        let result = self
            .agent
            .post(&url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .set("Prefer", "return=representation")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }
        tracing::debug!(metrics = %self.metrics.snapshot(), "store traffic");

        result
    }

    /// Map a ureq error to a LedgerError, keeping the store's message text.
    fn map_error(&self, error: ureq::Error) -> LedgerError {
        match error {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                let message = serde_json::from_str::<StoreErrorBody>(&body)
                    .map(|b| b.message)
                    .unwrap_or_else(|_| {
                        if body.trim().is_empty() {
                            format!("HTTP {}", status)
                        } else {
                            body
                        }
                    });
                LedgerError::QueryFailed { status, message }
            }
            ureq::Error::Transport(transport) => {
                LedgerError::StoreUnavailable(transport.to_string())
            }
        }
    }

    /// Read a response body as a list of records.
    fn read_records(response: ureq::Response) -> LedgerResult<Vec<OutreachRecord>> {
        let body = response
            .into_string()
            .map_err(|e| LedgerError::StoreUnavailable(e.to_string()))?;
        serde_json::from_str::<Vec<OutreachRecord>>(&body).map_err(LedgerError::JsonError)
    }

    /// Fetch every record whose phone or email equals the query's values.
    ///
    /// Result order is whatever the store returns.
    pub fn find_by_contact(&self, query: &ContactQuery) -> LedgerResult<Vec<OutreachRecord>> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(query.filter().query_params());

        let response = self.get(&params)?;
        let records = Self::read_records(response)?;

        self.metrics.record_lookup(records.len());
        Ok(records)
    }

    /// Insert one record and return it as stored.
    ///
    /// No uniqueness check is made; calling this twice creates two rows.
    pub fn insert_outreach(&self, outreach: &NewOutreach) -> LedgerResult<OutreachRecord> {
        let body = serde_json::to_value(outreach).map_err(LedgerError::JsonError)?;
        let response = self.post(&body)?;

        let record = Self::read_records(response)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                LedgerError::Unknown("Store returned no row for the inserted record".to_string())
            })?;

        tracing::info!("Outreach record created with id: {}", record.id);
        self.metrics.record_append();
        Ok(record)
    }

    /// Fetch the whole ledger, most recent first.
    pub fn list_outreaches(&self) -> LedgerResult<Vec<OutreachRecord>> {
        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];

        let response = self.get(&params)?;
        let records = Self::read_records(response)?;

        self.metrics.record_listed(records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = LedgerClient::with_base_url(
            "https://example.supabase.co/rest/v1".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client.build_url(&[]),
            "https://example.supabase.co/rest/v1/outreaches"
        );

        let client_with_slash = LedgerClient::with_base_url(
            "https://example.supabase.co/rest/v1/".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client_with_slash.build_url(&[("phone".to_string(), "eq.555 0100".to_string())]),
            "https://example.supabase.co/rest/v1/outreaches?phone=eq.555%200100"
        );
    }

    #[test]
    fn test_build_url_encodes_or_group() {
        let client = LedgerClient::with_base_url(
            "https://example.supabase.co/rest/v1".to_string(),
            "test-key".to_string(),
        );
        let query = ContactQuery::new(Some("555-0200"), Some("a@x.com")).unwrap();

        let url = client.build_url(&query.filter().query_params());
        assert_eq!(
            url,
            "https://example.supabase.co/rest/v1/outreaches?or=%28phone.eq.555-0200%2Cemail.eq.%22a%40x.com%22%29"
        );
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            store_url: "https://example.supabase.co/rest/v1".to_string(),
            store_key: "anon-key".to_string(),
            table: "cold_calls".to_string(),
            request_timeout: 5,
            log_level: "error".to_string(),
        };

        let client = LedgerClient::new(&config);
        assert_eq!(client.base_url, "https://example.supabase.co/rest/v1");
        assert_eq!(client.api_key, "anon-key");
        assert_eq!(client.table, "cold_calls");
    }
}
