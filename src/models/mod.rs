//! Data models for the outreach ledger.
//!
//! This module contains the record shape stored in the outreach table and the
//! insert payload sent to the store.

pub mod outreach;

pub use outreach::{NewOutreach, OutreachRecord};
