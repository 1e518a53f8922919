mod store_outreach_repository;
mod traits;

pub use store_outreach_repository::StoreOutreachRepository;
pub use traits::OutreachRepository;
