use crate::client::AsyncLedgerClient;
use crate::domain::ContactQuery;
use crate::error::LedgerResult;
use crate::models::{NewOutreach, OutreachRecord};
use crate::repositories::traits::OutreachRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Outreach repository backed by the remote store.
///
/// This repository delegates all operations to the AsyncLedgerClient; filtering
/// and ordering happen store-side.
pub struct StoreOutreachRepository {
    client: Arc<dyn AsyncLedgerClient>,
}

impl StoreOutreachRepository {
    /// Create a new StoreOutreachRepository with the given client.
    pub fn new(client: Arc<dyn AsyncLedgerClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OutreachRepository for StoreOutreachRepository {
    async fn find_matching(&self, query: &ContactQuery) -> LedgerResult<Vec<OutreachRecord>> {
        self.client.find_by_contact(query).await
    }

    async fn insert(&self, outreach: &NewOutreach) -> LedgerResult<OutreachRecord> {
        self.client.insert_outreach(outreach).await
    }

    async fn list_recent_first(&self) -> LedgerResult<Vec<OutreachRecord>> {
        self.client.list_outreaches().await
    }
}
