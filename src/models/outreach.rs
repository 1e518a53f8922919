//! Outreach record model.

use crate::domain::contact_query::present;
use crate::domain::RecordId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// One row of the outreach ledger.
///
/// `id` and `created_at` are assigned by the store on insert and never change.
/// The ledger is append-only; records are never updated or deleted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutreachRecord {
    /// Store-assigned identifier
    pub id: RecordId,

    /// Phone number exactly as entered (nullable column)
    #[serde(default)]
    pub phone: Option<String>,

    /// Email exactly as entered (nullable column)
    #[serde(default)]
    pub email: Option<String>,

    /// Insertion time, assigned by the store
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

/// Accepts `timestamptz` values (RFC 3339) and offset-less `timestamp`
/// values, which are read as UTC.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| de::Error::custom(format!("invalid created_at timestamp: {}", raw)))
}

impl OutreachRecord {
    /// Human-readable contact summary, e.g. `Phone: 555-0100 | Email: a@x.com`.
    pub fn contact_summary(&self) -> String {
        let phone = self.phone.as_deref().filter(|p| !p.is_empty());
        let email = self.email.as_deref().filter(|e| !e.is_empty());

        match (phone, email) {
            (Some(p), Some(e)) => format!("Phone: {} | Email: {}", p, e),
            (Some(p), None) => format!("Phone: {}", p),
            (None, Some(e)) => format!("Email: {}", e),
            (None, None) => "—".to_string(),
        }
    }
}

/// Insert payload for a new outreach record.
///
/// Absent fields serialize as JSON `null` so the store keeps the column null
/// rather than storing an empty string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct NewOutreach {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewOutreach {
    /// Build an insert payload from raw caller input; empty strings become null.
    pub fn from_contact(phone: Option<&str>, email: Option<&str>) -> Self {
        Self {
            phone: present(phone),
            email: present(email),
        }
    }

    /// Whether at least one contact value is present.
    pub fn has_contact(&self) -> bool {
        self.phone.is_some() || self.email.is_some()
    }
}
