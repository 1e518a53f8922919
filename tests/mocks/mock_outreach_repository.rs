use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use outreach_ledger::domain::{ContactQuery, RecordId};
use outreach_ledger::error::{LedgerError, LedgerResult};
use outreach_ledger::models::{NewOutreach, OutreachRecord};
use outreach_ledger::repositories::OutreachRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory outreach table for testing.
///
/// Assigns sequential IDs and strictly increasing `created_at` values, the way
/// an identity column and `now()` default would.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockOutreachRepository {
    records: Arc<Mutex<Vec<OutreachRecord>>>,
    next_id: Arc<Mutex<u64>>,
    clock: Arc<Mutex<DateTime<Utc>>>,
    unavailable: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockOutreachRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
            clock: Arc::new(Mutex::new(
                Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
            )),
            unavailable: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a row directly, bypassing call counting.
    pub fn seed(&self, phone: Option<&str>, email: Option<&str>) -> OutreachRecord {
        let record = self.make_record(phone.map(str::to_string), email.map(str::to_string));
        self.records.lock().unwrap().push(record.clone());
        record
    }

    /// Seed a row with an explicit timestamp.
    pub fn seed_at(&self, phone: Option<&str>, created_at: DateTime<Utc>) -> OutreachRecord {
        let mut record = self.make_record(phone.map(str::to_string), None);
        record.created_at = created_at;
        self.records.lock().unwrap().push(record.clone());
        record
    }

    /// Make every subsequent call fail as if the store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn make_record(&self, phone: Option<String>, email: Option<String>) -> OutreachRecord {
        let mut next_id = self.next_id.lock().unwrap();
        let id = RecordId::new(next_id.to_string()).unwrap();
        *next_id += 1;

        let mut clock = self.clock.lock().unwrap();
        *clock += Duration::seconds(1);

        OutreachRecord {
            id,
            phone,
            email,
            created_at: *clock,
        }
    }

    fn track_call(&self, method: &str) -> LedgerResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.unavailable.lock().unwrap() {
            return Err(LedgerError::StoreUnavailable(
                "Connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MockOutreachRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutreachRepository for MockOutreachRepository {
    async fn find_matching(&self, query: &ContactQuery) -> LedgerResult<Vec<OutreachRecord>> {
        self.track_call("find_matching")?;

        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn insert(&self, outreach: &NewOutreach) -> LedgerResult<OutreachRecord> {
        self.track_call("insert")?;

        let record = self.make_record(outreach.phone.clone(), outreach.email.clone());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_recent_first(&self) -> LedgerResult<Vec<OutreachRecord>> {
        self.track_call("list_recent_first")?;

        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
