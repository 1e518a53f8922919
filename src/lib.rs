//! Outreach Ledger - a shared log of who has already been cold-contacted.
//!
//! Given a phone number and/or email, the ledger answers "has anyone reached
//! this person yet?" and records new outreach. Records live in a remote
//! PostgREST-style table; this crate is the client, the business rules, and an
//! MCP server on top.
//!
//! # Architecture
//!
//! - **domain**: Record IDs and the presence-aware contact query
//! - **models**: The stored record and the insert payload
//! - **client**: HTTP client for the store's table API
//! - **repositories**: Storage abstraction over the client
//! - **services**: Lookup / append / list business operations
//! - **session**: Caller-held state between operations
//! - **server**: MCP protocol server
//! - **config**, **error**, **metrics**: ambient plumbing

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod session;

pub use client::LedgerClient;
pub use config::Config;
pub use domain::{ContactFilter, ContactQuery, RecordId, ValidationError};
pub use error::{ConfigError, LedgerError, LedgerResult};
pub use metrics::{HttpTimer, Metrics, MetricsSnapshot};
pub use models::{NewOutreach, OutreachRecord};
pub use server::OutreachMcpServer;
pub use services::{LedgerService, LedgerServiceImpl, LookupOutcome};
pub use session::{LogOutcome, OutreachSession, SessionError, SessionState};
