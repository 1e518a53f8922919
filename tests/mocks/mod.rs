mod mock_outreach_repository;

pub use mock_outreach_repository::MockOutreachRepository;
