//! Conversation uniqueness, message ordering and read state against a real
//! database.

mod common;

use marketplace_db::models::message::NewAttachment;
use marketplace_db::repositories::{ConversationRepo, MessageRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_or_create_reuses_pair(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (_, provider) = common::provider(&pool, "pedro").await;

    let first = ConversationRepo::find_or_create(&pool, client.id, provider.id, None)
        .await
        .unwrap();
    let second = ConversationRepo::find_or_create(&pool, client.id, provider.id, None)
        .await
        .unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.conversation.id, second.conversation.id);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM conversations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_starts_create_one_row(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (_, provider) = common::provider(&pool, "pedro").await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let pool = pool.clone();
        let (client_id, provider_id) = (client.id, provider.id);
        handles.push(tokio::spawn(async move {
            ConversationRepo::find_or_create(&pool, client_id, provider_id, Some("Hi"))
                .await
                .unwrap()
        }));
    }

    let mut ids = Vec::new();
    let mut created = 0;
    for handle in handles {
        let started = handle.await.unwrap();
        ids.push(started.conversation.id);
        if started.created {
            created += 1;
        }
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(created, 1);

    // Only the creating call appended its initial message.
    let messages = MessageRepo::list_for_conversation(&pool, ids[0]).await.unwrap();
    assert_eq!(messages.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_initial_message_only_on_create(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (_, provider) = common::provider(&pool, "pedro").await;

    let started = ConversationRepo::find_or_create(&pool, client.id, provider.id, Some("Hello"))
        .await
        .unwrap();
    ConversationRepo::find_or_create(&pool, client.id, provider.id, Some("Hello again"))
        .await
        .unwrap();

    let messages = MessageRepo::list_for_conversation(&pool, started.conversation.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message.content, "Hello");
    assert_eq!(messages[0].message.sender_id, client.id);
    assert!(!messages[0].message.is_read);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_exchange_read_state(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (provider_user, provider) = common::provider(&pool, "pedro").await;

    let conversation =
        ConversationRepo::find_or_create(&pool, client.id, provider.id, Some("Hello"))
            .await
            .unwrap()
            .conversation;
    let id = conversation.id;

    // Client wrote once: one unread for the provider, none for the client.
    assert_eq!(ConversationRepo::unread_count(&pool, id, client.id).await.unwrap(), 1);
    assert_eq!(ConversationRepo::unread_count(&pool, id, provider_user.id).await.unwrap(), 0);

    MessageRepo::append(&pool, id, provider_user.id, "Hi", &[])
        .await
        .unwrap();

    // Unread counts are keyed by the sender being counted.
    assert_eq!(ConversationRepo::unread_count(&pool, id, provider_user.id).await.unwrap(), 1);
    assert_eq!(ConversationRepo::unread_count(&pool, id, client.id).await.unwrap(), 1);

    // The client reads the provider's messages.
    let marked = ConversationRepo::mark_read(&pool, id, provider_user.id).await.unwrap();
    assert_eq!(marked, 1);
    assert_eq!(ConversationRepo::unread_count(&pool, id, provider_user.id).await.unwrap(), 0);
    // The client's own message stays unread for the provider.
    assert_eq!(ConversationRepo::unread_count(&pool, id, client.id).await.unwrap(), 1);

    let again = ConversationRepo::mark_read(&pool, id, provider_user.id).await.unwrap();
    assert_eq!(again, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overview_unread_is_viewer_relative(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (provider_user, provider) = common::provider(&pool, "pedro").await;

    let id = ConversationRepo::find_or_create(&pool, client.id, provider.id, Some("Hello"))
        .await
        .unwrap()
        .conversation
        .id;

    let for_provider = ConversationRepo::overview(&pool, provider_user.id, id)
        .await
        .unwrap()
        .unwrap();
    let for_client = ConversationRepo::overview(&pool, client.id, id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(for_provider.unread_count, 1);
    assert_eq!(for_client.unread_count, 0);
    assert_eq!(for_client.last_message_content.as_deref(), Some("Hello"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_bumps_recency_and_reorders_listing(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (_, first_provider) = common::provider(&pool, "first").await;
    let (_, second_provider) = common::provider(&pool, "second").await;

    let older = ConversationRepo::find_or_create(&pool, client.id, first_provider.id, None)
        .await
        .unwrap()
        .conversation;
    let newer = ConversationRepo::find_or_create(&pool, client.id, second_provider.id, None)
        .await
        .unwrap()
        .conversation;

    let listed = ConversationRepo::list_for_user(&pool, client.id, 10, 0).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    MessageRepo::append(&pool, older.id, client.id, "Ping", &[])
        .await
        .unwrap();

    let bumped = ConversationRepo::find_by_id(&pool, older.id).await.unwrap().unwrap();
    assert!(bumped.updated_at >= older.updated_at);
    assert!(bumped.updated_at >= newer.updated_at);

    let listed = ConversationRepo::list_for_user(&pool, client.id, 10, 0).await.unwrap();
    assert_eq!(listed[0].id, older.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provider_sees_conversation_in_listing(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (provider_user, provider) = common::provider(&pool, "pedro").await;
    ConversationRepo::find_or_create(&pool, client.id, provider.id, None)
        .await
        .unwrap();

    assert_eq!(ConversationRepo::count_for_user(&pool, provider_user.id).await.unwrap(), 1);
    assert_eq!(ConversationRepo::count_for_user(&pool, client.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_messages_ascending_with_attachments(pool: PgPool) {
    let client = common::client(&pool, "carla").await;
    let (provider_user, provider) = common::provider(&pool, "pedro").await;
    let id = ConversationRepo::find_or_create(&pool, client.id, provider.id, None)
        .await
        .unwrap()
        .conversation
        .id;

    let attachments = vec![
        NewAttachment {
            file: "uploads/quote.pdf".to_string(),
            file_name: "quote.pdf".to_string(),
        },
        NewAttachment {
            file: "uploads/site.jpg".to_string(),
            file_name: "site.jpg".to_string(),
        },
    ];
    MessageRepo::append(&pool, id, client.id, "First", &attachments)
        .await
        .unwrap();
    MessageRepo::append(&pool, id, provider_user.id, "Second", &[])
        .await
        .unwrap();
    MessageRepo::append(&pool, id, client.id, "Third", &[])
        .await
        .unwrap();

    let listed = MessageRepo::list_for_conversation(&pool, id).await.unwrap();
    let contents: Vec<_> = listed.iter().map(|m| m.message.content.as_str()).collect();
    assert_eq!(contents, vec!["First", "Second", "Third"]);
    assert_eq!(listed[0].attachments.len(), 2);
    assert_eq!(listed[0].attachments[0].file_name, "quote.pdf");
    assert!(listed[1].attachments.is_empty());
}
