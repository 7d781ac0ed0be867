//! Contact inbox repository tests against a real Postgres.
//!
//! Run with: `cargo test -p wellstore-db --test message_test` (needs Docker)

mod helpers;

use helpers::setup_test_db;
use wellstore_core::models::{CreateMessageRequest, MessageStatus, MessageStatusCounts};
use wellstore_core::AppError;
use wellstore_db::MessageRepository;

fn request(subject: &str) -> CreateMessageRequest {
    CreateMessageRequest {
        name: " Ada ".to_string(),
        email: "ada@example.com".to_string(),
        subject: subject.to_string(),
        body: "Where is my tea?".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_get_message() {
    let db = setup_test_db().await;
    let messages = MessageRepository::new(db.pool.clone());

    let created = messages.create_message(&request("Order")).await.unwrap();
    assert_eq!(created.status, MessageStatus::New);
    assert_eq!(created.name, "Ada");

    let fetched = messages.get_message(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.subject, "Order");

    let missing = messages.get_message(uuid::Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_status_follows_workflow() {
    let db = setup_test_db().await;
    let messages = MessageRepository::new(db.pool.clone());
    let id = messages.create_message(&request("Order")).await.unwrap().id;

    let read = messages.update_status(id, MessageStatus::Read).await.unwrap();
    assert_eq!(read.status, MessageStatus::Read);

    let replied = messages
        .update_status(id, MessageStatus::Replied)
        .await
        .unwrap();
    assert_eq!(replied.status, MessageStatus::Replied);

    let err = messages
        .update_status(id, MessageStatus::New)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidStatusTransition { .. }));

    // Rejected transitions leave the row untouched
    let current = messages.get_message(id).await.unwrap().unwrap();
    assert_eq!(current.status, MessageStatus::Replied);

    let archived = messages
        .update_status(id, MessageStatus::Archived)
        .await
        .unwrap();
    assert_eq!(archived.status, MessageStatus::Archived);
    assert!(archived.updated_at >= archived.created_at);
}

#[tokio::test]
async fn test_same_status_update_is_noop() {
    let db = setup_test_db().await;
    let messages = MessageRepository::new(db.pool.clone());
    let created = messages.create_message(&request("Order")).await.unwrap();

    let same = messages
        .update_status(created.id, MessageStatus::New)
        .await
        .unwrap();

    assert_eq!(same.status, MessageStatus::New);
    assert_eq!(same.updated_at, created.updated_at);
}

#[tokio::test]
async fn test_update_status_of_missing_message() {
    let db = setup_test_db().await;
    let messages = MessageRepository::new(db.pool.clone());

    let err = messages
        .update_status(uuid::Uuid::new_v4(), MessageStatus::Read)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_filters_by_status_and_paginates() {
    let db = setup_test_db().await;
    let messages = MessageRepository::new(db.pool.clone());

    let mut ids = Vec::new();
    for subject in ["One", "Two", "Three"] {
        ids.push(messages.create_message(&request(subject)).await.unwrap().id);
    }
    messages
        .update_status(ids[0], MessageStatus::Archived)
        .await
        .unwrap();

    let all = messages.list_messages(None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 3);

    let fresh = messages
        .list_messages(Some(MessageStatus::New), 50, 0)
        .await
        .unwrap();
    assert_eq!(fresh.len(), 2);
    assert!(fresh.iter().all(|m| m.status == MessageStatus::New));

    let archived = messages
        .list_messages(Some(MessageStatus::Archived), 50, 0)
        .await
        .unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].id, ids[0]);

    let page = messages.list_messages(None, 2, 2).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_counts_cover_every_status() {
    let db = setup_test_db().await;
    let messages = MessageRepository::new(db.pool.clone());

    assert_eq!(
        messages.count_by_status().await.unwrap(),
        MessageStatusCounts::default()
    );

    let first = messages.create_message(&request("One")).await.unwrap().id;
    messages.create_message(&request("Two")).await.unwrap();
    messages
        .update_status(first, MessageStatus::Read)
        .await
        .unwrap();

    assert_eq!(
        messages.count_by_status().await.unwrap(),
        MessageStatusCounts {
            new: 1,
            read: 1,
            replied: 0,
            archived: 0,
            total: 2,
        }
    );
}
