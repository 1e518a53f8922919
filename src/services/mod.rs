//! Application service layer.
//!
//! Services contain business logic and sit between callers (session, MCP
//! handlers) and the data access layer. They hold no state between calls.

mod ledger_service;

pub use ledger_service::{LedgerService, LedgerServiceImpl, LookupOutcome};
