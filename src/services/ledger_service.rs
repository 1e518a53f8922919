//! Outreach ledger service.
//!
//! The three ledger operations: lookup by contact, append, and list. Lookup and
//! append are deliberately separate calls (check-then-act); nothing here makes
//! the pair atomic, and no operation is retried.

use crate::domain::ContactQuery;
use crate::error::LedgerResult;
use crate::models::{NewOutreach, OutreachRecord};
use crate::repositories::OutreachRepository;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Result of a contact lookup.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LookupOutcome {
    /// Whether any record matched
    pub found: bool,

    /// Matching records, in store order
    pub entries: Vec<OutreachRecord>,
}

impl LookupOutcome {
    fn from_entries(entries: Vec<OutreachRecord>) -> Self {
        Self {
            found: !entries.is_empty(),
            entries,
        }
    }
}

/// Ledger service trait for business operations.
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Find records matching the phone OR the email.
    ///
    /// Empty strings count as absent. If both are absent this returns
    /// `LedgerError::InvalidInput` without contacting the store.
    async fn lookup(&self, phone: Option<&str>, email: Option<&str>) -> LedgerResult<LookupOutcome>;

    /// Append a record. Performs no validation and no duplicate check.
    async fn append(&self, phone: Option<&str>, email: Option<&str>) -> LedgerResult<OutreachRecord>;

    /// The whole ledger, most recent first.
    async fn list_all(&self) -> LedgerResult<Vec<OutreachRecord>>;
}

/// Default implementation of LedgerService.
pub struct LedgerServiceImpl {
    repository: Arc<dyn OutreachRepository>,
}

impl LedgerServiceImpl {
    /// Create a new ledger service.
    pub fn new(repository: Arc<dyn OutreachRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LedgerService for LedgerServiceImpl {
    async fn lookup(&self, phone: Option<&str>, email: Option<&str>) -> LedgerResult<LookupOutcome> {
        let query = ContactQuery::new(phone, email)?;

        tracing::debug!(
            phone = query.phone().is_some(),
            email = query.email().is_some(),
            "Looking up contact"
        );

        let entries = self.repository.find_matching(&query).await?;
        tracing::info!("Lookup matched {} record(s)", entries.len());

        Ok(LookupOutcome::from_entries(entries))
    }

    async fn append(&self, phone: Option<&str>, email: Option<&str>) -> LedgerResult<OutreachRecord> {
        let outreach = NewOutreach::from_contact(phone, email);
        if !outreach.has_contact() {
            tracing::warn!("Appending an outreach record with no contact value");
        }

        self.repository.insert(&outreach).await
    }

    async fn list_all(&self) -> LedgerResult<Vec<OutreachRecord>> {
        let mut records = self.repository.list_recent_first().await?;
        // Stable: ties keep store order.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AsyncLedgerClient, AsyncLedgerClientImpl, LedgerClient};
    use crate::config::Config;
    use crate::error::LedgerError;
    use crate::repositories::StoreOutreachRepository;

    fn unreachable_service() -> LedgerServiceImpl {
        let config = Config {
            store_url: "http://127.0.0.1:9".to_string(),
            store_key: "key".to_string(),
            request_timeout: 1,
            ..Config::default()
        };
        let client = Arc::new(AsyncLedgerClientImpl::new(LedgerClient::new(&config)))
            as Arc<dyn AsyncLedgerClient>;
        let repo = Arc::new(StoreOutreachRepository::new(client)) as Arc<dyn OutreachRepository>;
        LedgerServiceImpl::new(repo)
    }

    #[tokio::test]
    async fn test_lookup_rejects_empty_input_before_store() {
        let service = unreachable_service();

        // An unreachable store would yield StoreUnavailable if it were contacted.
        let result = service.lookup(Some(""), None).await;
        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let service = unreachable_service();

        let result = service.lookup(Some("555-0100"), None).await;
        assert!(matches!(result, Err(LedgerError::StoreUnavailable(_))));
    }
}
