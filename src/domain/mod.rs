//! Domain value objects and types.
//!
//! Record identity and the presence-aware contact query that decides which
//! stored records count as "already contacted".

pub mod contact_query;
pub mod errors;
pub mod record_id;

pub use contact_query::{ContactFilter, ContactQuery};
pub use errors::ValidationError;
pub use record_id::RecordId;
