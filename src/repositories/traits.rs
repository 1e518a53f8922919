use crate::domain::ContactQuery;
use crate::error::LedgerResult;
use crate::models::{NewOutreach, OutreachRecord};
use async_trait::async_trait;

/// Repository for the outreach ledger.
///
/// Provides abstraction over record storage and retrieval,
/// enabling different implementations (remote store, in-memory mock).
#[async_trait]
pub trait OutreachRepository: Send + Sync {
    /// Every record whose phone or email equals a supplied query value.
    async fn find_matching(&self, query: &ContactQuery) -> LedgerResult<Vec<OutreachRecord>>;

    /// Append one record. The store assigns `id` and `created_at`.
    async fn insert(&self, outreach: &NewOutreach) -> LedgerResult<OutreachRecord>;

    /// Every record, most recent `created_at` first.
    async fn list_recent_first(&self) -> LedgerResult<Vec<OutreachRecord>>;
}
