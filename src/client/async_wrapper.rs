//! Async wrapper around synchronous LedgerClient.
//!
//! This module provides an async interface to the synchronous LedgerClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::LedgerClient;
use crate::domain::ContactQuery;
use crate::error::{LedgerError, LedgerResult};
use crate::metrics::Metrics;
use crate::models::{NewOutreach, OutreachRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Async store operations.
#[async_trait]
pub trait AsyncLedgerClient: Send + Sync {
    async fn find_by_contact(&self, query: &ContactQuery) -> LedgerResult<Vec<OutreachRecord>>;
    async fn insert_outreach(&self, outreach: &NewOutreach) -> LedgerResult<OutreachRecord>;
    async fn list_outreaches(&self) -> LedgerResult<Vec<OutreachRecord>>;
}

/// Async wrapper around synchronous LedgerClient.
#[derive(Clone)]
pub struct AsyncLedgerClientImpl {
    client: Arc<LedgerClient>,
}

impl AsyncLedgerClientImpl {
    pub fn new(client: LedgerClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Counters of the wrapped client, shared with it.
    pub fn metrics(&self) -> Metrics {
        self.client.metrics().clone()
    }
}

fn join_error(e: tokio::task::JoinError) -> LedgerError {
    LedgerError::Unknown(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncLedgerClient for AsyncLedgerClientImpl {
    async fn find_by_contact(&self, query: &ContactQuery) -> LedgerResult<Vec<OutreachRecord>> {
        let client = self.client.clone();
        let query = query.clone();

        tokio::task::spawn_blocking(move || client.find_by_contact(&query))
            .await
            .map_err(join_error)?
    }

    async fn insert_outreach(&self, outreach: &NewOutreach) -> LedgerResult<OutreachRecord> {
        let client = self.client.clone();
        let outreach = outreach.clone();

        tokio::task::spawn_blocking(move || client.insert_outreach(&outreach))
            .await
            .map_err(join_error)?
    }

    async fn list_outreaches(&self) -> LedgerResult<Vec<OutreachRecord>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_outreaches())
            .await
            .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        let config = Config {
            store_url: "http://127.0.0.1:9".to_string(),
            store_key: "test_key".to_string(),
            request_timeout: 2,
            ..Config::default()
        };
        let async_client = AsyncLedgerClientImpl::new(LedgerClient::new(&config));

        let metrics = async_client.metrics();

        let result = async_client.list_outreaches().await;
        assert!(matches!(result, Err(LedgerError::StoreUnavailable(_))));

        let snap = metrics.snapshot();
        assert_eq!(snap.http_requests, 1);
        assert_eq!(snap.http_errors, 1);
        assert_eq!(snap.records_listed, 0);
    }
}
