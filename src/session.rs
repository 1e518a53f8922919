//! Caller-side session state.
//!
//! The ledger service is stateless; whatever a caller remembers between calls
//! (last check result, last history snapshot, status line) lives here. Each new
//! result replaces the previous one wholesale. One ledger call runs at a time
//! per session: the state lock is held for the duration of the call.

use crate::domain::ValidationError;
use crate::error::LedgerError;
use crate::models::{NewOutreach, OutreachRecord};
use crate::services::{LedgerService, LookupOutcome};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

pub const ADDED_MESSAGE: &str = "Successfully added to database!";

/// A failed session operation, with a display-ready message.
///
/// The message is the operation context followed by the ledger error text,
/// unmodified.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SessionError {
    message: String,
    #[source]
    source: LedgerError,
}

impl SessionError {
    fn new(context: &str, source: LedgerError) -> Self {
        let message = match &source {
            LedgerError::InvalidInput(msg) => msg.clone(),
            other => format!("{}: {}", context, other),
        };
        Self { message, source }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying ledger error.
    pub fn ledger_error(&self) -> &LedgerError {
        &self.source
    }
}

/// What the session currently remembers.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionState {
    pub last_check: Option<LookupOutcome>,
    pub history: Vec<OutreachRecord>,
    pub message: Option<String>,
}

/// Outcome of a check-then-act logging attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutcome {
    /// Matches exist; nothing was inserted.
    AlreadyContacted(LookupOutcome),
    /// A new record was appended.
    Added(OutreachRecord),
}

/// One caller's view of the ledger.
pub struct OutreachSession {
    service: Arc<dyn LedgerService>,
    state: Mutex<SessionState>,
}

impl OutreachSession {
    pub fn new(service: Arc<dyn LedgerService>) -> Self {
        Self {
            service,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Copy of the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Check whether a contact has already been reached.
    pub async fn check(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<LookupOutcome, SessionError> {
        let mut state = self.state.lock().await;
        state.last_check = None;
        state.message = None;

        match self.service.lookup(phone, email).await {
            Ok(outcome) => {
                state.last_check = Some(outcome.clone());
                Ok(outcome)
            }
            Err(e) => Err(Self::fail(&mut state, "Error checking database", e)),
        }
    }

    /// Append a contact to the ledger without checking for duplicates.
    ///
    /// At least one of phone or email must be non-empty; this is checked here,
    /// before the service is called.
    pub async fn add(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<OutreachRecord, SessionError> {
        let mut state = self.state.lock().await;
        self.add_locked(&mut state, phone, email).await
    }

    /// Look the contact up and append it only if nothing matched.
    ///
    /// The lookup and the insert are separate store calls; a concurrent writer
    /// elsewhere can slip a matching row in between. With `allow_duplicate` the
    /// record is appended even when matches exist.
    pub async fn check_and_add(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
        allow_duplicate: bool,
    ) -> Result<LogOutcome, SessionError> {
        let mut state = self.state.lock().await;
        state.message = None;

        let outcome = match self.service.lookup(phone, email).await {
            Ok(outcome) => outcome,
            Err(e) => {
                state.last_check = None;
                return Err(Self::fail(&mut state, "Error checking database", e));
            }
        };

        if outcome.found && !allow_duplicate {
            tracing::info!(
                "Contact already logged ({} match(es)); skipping insert",
                outcome.entries.len()
            );
            state.last_check = Some(outcome.clone());
            return Ok(LogOutcome::AlreadyContacted(outcome));
        }

        self.add_locked(&mut state, phone, email)
            .await
            .map(LogOutcome::Added)
    }

    /// Load the full ledger, most recent first.
    pub async fn history(&self) -> Result<Vec<OutreachRecord>, SessionError> {
        let mut state = self.state.lock().await;
        state.message = None;

        match self.service.list_all().await {
            Ok(records) => {
                state.history = records.clone();
                Ok(records)
            }
            Err(e) => Err(Self::fail(&mut state, "Error loading history", e)),
        }
    }

    async fn add_locked(
        &self,
        state: &mut SessionState,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<OutreachRecord, SessionError> {
        state.message = None;

        if !NewOutreach::from_contact(phone, email).has_contact() {
            let e = LedgerError::from(ValidationError::MissingContact);
            return Err(Self::fail(state, "Error adding to database", e));
        }

        match self.service.append(phone, email).await {
            Ok(record) => {
                state.last_check = None;
                state.message = Some(ADDED_MESSAGE.to_string());
                Ok(record)
            }
            Err(e) => Err(Self::fail(state, "Error adding to database", e)),
        }
    }

    fn fail(state: &mut SessionState, context: &str, e: LedgerError) -> SessionError {
        let err = SessionError::new(context, e);
        tracing::error!("{}", err);
        state.message = Some(err.message().to_string());
        err
    }
}
