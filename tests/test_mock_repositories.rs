mod mocks;

use mocks::MockOutreachRepository;
use outreach_ledger::domain::ContactQuery;
use outreach_ledger::models::NewOutreach;
use outreach_ledger::repositories::OutreachRepository;
use tokio_test::{assert_err, assert_ok, block_on};

#[test]
fn test_mock_repository_insert_assigns_identity_and_time() {
    let repo = MockOutreachRepository::new();

    let first = assert_ok!(block_on(
        repo.insert(&NewOutreach::from_contact(Some("555-0100"), None))
    ));
    let second = assert_ok!(block_on(
        repo.insert(&NewOutreach::from_contact(None, Some("a@x.com")))
    ));

    assert_ne!(first.id, second.id);
    assert!(second.created_at > first.created_at);
    assert_eq!(repo.get_call_count("insert"), 2);
}

#[test]
fn test_mock_repository_find_matching_uses_query_semantics() {
    let repo = MockOutreachRepository::new();
    repo.seed(Some("555-0100"), None);
    repo.seed(None, Some("a@x.com"));
    repo.seed(Some(""), Some("b@x.com"));

    let query = ContactQuery::new(Some("555-0100"), Some("a@x.com")).unwrap();
    let found = assert_ok!(block_on(repo.find_matching(&query)));
    assert_eq!(found.len(), 2);

    let query = ContactQuery::new(None, Some("b@x.com")).unwrap();
    let found = assert_ok!(block_on(repo.find_matching(&query)));
    assert_eq!(found.len(), 1);
}

#[test]
fn test_mock_repository_unavailable() {
    let repo = MockOutreachRepository::new();
    repo.set_unavailable(true);

    assert_err!(block_on(repo.list_recent_first()));
    assert_eq!(repo.get_call_count("list_recent_first"), 1);
    assert_eq!(repo.len(), 0);
}
