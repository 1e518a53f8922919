//! Presence-aware contact lookup.
//!
//! A lookup is an exact-equality match on phone OR email, built only from the
//! fields the caller actually supplied. An empty input is absent, never a value
//! to compare against, so a record whose phone is null or empty cannot match a
//! query that left the phone blank.

use super::errors::ValidationError;
use crate::models::OutreachRecord;

/// Characters that end a value inside a PostgREST logical group.
const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\'];

/// Store-side filter derived from a [`ContactQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
    /// `phone = value`
    Phone(String),
    /// `email = value`
    Email(String),
    /// `phone = phone OR email = email`
    Either { phone: String, email: String },
}

impl ContactFilter {
    /// Render the filter as PostgREST query parameters (unencoded).
    ///
    /// ```
    /// use outreach_ledger::domain::ContactFilter;
    ///
    /// let filter = ContactFilter::Phone("555-0100".to_string());
    /// assert_eq!(
    ///     filter.query_params(),
    ///     vec![("phone".to_string(), "eq.555-0100".to_string())]
    /// );
    /// ```
    pub fn query_params(&self) -> Vec<(String, String)> {
        match self {
            ContactFilter::Phone(phone) => vec![("phone".to_string(), format!("eq.{}", phone))],
            ContactFilter::Email(email) => vec![("email".to_string(), format!("eq.{}", email))],
            ContactFilter::Either { phone, email } => vec![(
                "or".to_string(),
                format!(
                    "(phone.eq.{},email.eq.{})",
                    quote_group_value(phone),
                    quote_group_value(email)
                ),
            )],
        }
    }
}

/// Quote a value for use inside an `or=(...)` group when it contains reserved
/// characters or whitespace.
fn quote_group_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| RESERVED.contains(&c) || c.is_whitespace());
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// A validated "have we contacted this person?" query.
///
/// Inputs are kept exactly as entered (no trimming, no normalization).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    filter: ContactFilter,
}

impl ContactQuery {
    /// Build a query from raw caller input.
    ///
    /// `None` and `""` both mean the field was not supplied.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingContact` if both fields are absent.
    pub fn new(phone: Option<&str>, email: Option<&str>) -> Result<Self, ValidationError> {
        let filter = match (present(phone), present(email)) {
            (Some(phone), Some(email)) => ContactFilter::Either { phone, email },
            (Some(phone), None) => ContactFilter::Phone(phone),
            (None, Some(email)) => ContactFilter::Email(email),
            (None, None) => return Err(ValidationError::MissingContact),
        };
        Ok(Self { filter })
    }

    pub fn phone(&self) -> Option<&str> {
        match &self.filter {
            ContactFilter::Phone(phone) | ContactFilter::Either { phone, .. } => Some(phone),
            ContactFilter::Email(_) => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match &self.filter {
            ContactFilter::Email(email) | ContactFilter::Either { email, .. } => Some(email),
            ContactFilter::Phone(_) => None,
        }
    }

    /// The store filter for this query. Absent fields contribute no term.
    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    /// In-process evaluation of [`ContactQuery::filter`] against a record.
    pub fn matches(&self, record: &OutreachRecord) -> bool {
        let phone_hit = self.phone().is_some() && self.phone() == record.phone.as_deref();
        let email_hit = self.email().is_some() && self.email() == record.email.as_deref();
        phone_hit || email_hit
    }
}

/// Collapse empty input into absence.
pub(crate) fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
