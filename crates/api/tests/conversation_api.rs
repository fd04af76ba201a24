//! HTTP-level tests for conversations, messages and read state.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

/// Start a conversation as `token` with `provider_id`, returning its id.
async fn start(pool: &PgPool, token: &str, provider_id: i64, message: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = json!({ "provider_id": provider_id, "message": message });
    let response = post_json_auth(app, "/api/v1/conversations/start", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Starting conversations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn start_is_find_or_create(pool: PgPool) {
    let client = common::client(&pool, "client").await;
    let (_, profile) = common::provider(&pool, "electrician").await;
    let token = common::token_for(&client);

    let id = start(&pool, &token, profile.id, "Hello").await;

    let app = common::build_test_app(pool);
    let body = json!({ "provider_id": profile.id });
    let response = post_json_auth(app, "/api/v1/conversations/start", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["side"], "client_side");
    assert_eq!(json["counterpart"]["username"], "electrician");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn start_validates_target(pool: PgPool) {
    let (provider_user, profile) = common::provider(&pool, "solo").await;
    let token = common::token_for(&provider_user);

    let app = common::build_test_app(pool.clone());
    let body = json!({ "provider_id": profile.id });
    let response = post_json_auth(app, "/api/v1/conversations/start", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/conversations/start", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = json!({ "provider_id": 999_999 });
    let response = post_json_auth(app, "/api/v1/conversations/start", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn participants_send_and_outsiders_are_forbidden(pool: PgPool) {
    let client = common::client(&pool, "client").await;
    let outsider = common::client(&pool, "outsider").await;
    let (provider_user, profile) = common::provider(&pool, "painter").await;
    let id = start(&pool, &common::token_for(&client), profile.id, "Hi").await;
    let uri = format!("/api/v1/conversations/{id}/messages");

    let app = common::build_test_app(pool.clone());
    let body = json!({
        "content": "Quote attached",
        "attachments": [{ "file": "uploads/q.pdf", "file_name": "q.pdf" }],
    });
    let token = common::token_for(&provider_user);
    let response = post_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["sender_id"], provider_user.id);
    assert_eq!(json["attachments"][0]["file_name"], "q.pdf");

    let app = common::build_test_app(pool.clone());
    let body = json!({ "content": "Let me in" });
    let token = common::token_for(&outsider);
    let response = post_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/conversations/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let body = json!({ "content": "   " });
    let token = common::token_for(&client);
    let response = post_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_conversation_is_404(pool: PgPool) {
    let client = common::client(&pool, "client").await;

    let app = common::build_test_app(pool);
    let token = common::token_for(&client);
    let response = get_auth(app, "/api/v1/conversations/424242/messages", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Read state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_read_clears_only_counterpart_messages(pool: PgPool) {
    let client = common::client(&pool, "client").await;
    let (provider_user, profile) = common::provider(&pool, "mason").await;
    let client_token = common::token_for(&client);
    let provider_token = common::token_for(&provider_user);

    let id = start(&pool, &client_token, profile.id, "First").await;
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/conversations/{id}/messages");
    post_json_auth(app, &uri, json!({ "content": "Second" }), &client_token).await;

    let unread_uri = format!("/api/v1/conversations/{id}/unread-count");
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &unread_uri, &provider_token).await).await;
    assert_eq!(json["count"], 2);

    // Listing messages does not mark anything read.
    let app = common::build_test_app(pool.clone());
    let messages = body_json(get_auth(app, &uri, &provider_token).await).await;
    assert_eq!(messages.as_array().unwrap().len(), 2);
    assert_eq!(messages[0]["content"], "First");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &unread_uri, &provider_token).await).await;
    assert_eq!(json["count"], 2);

    // The sender's own messages never count as unread for them.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &unread_uri, &client_token).await).await;
    assert_eq!(json["count"], 0);

    let read_uri = format!("/api/v1/conversations/{id}/read");
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json_auth(app, &read_uri, json!({}), &provider_token).await).await;
    assert_eq!(json["marked_read"], 2);

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json_auth(app, &read_uri, json!({}), &provider_token).await).await;
    assert_eq!(json["marked_read"], 0);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &unread_uri, &provider_token).await).await;
    assert_eq!(json["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_shows_counterpart_per_side(pool: PgPool) {
    let client = common::client(&pool, "client").await;
    let (provider_user, profile) = common::provider(&pool, "roofer").await;
    start(&pool, &common::token_for(&client), profile.id, "Leaky roof").await;

    let app = common::build_test_app(pool);
    let token = common::token_for(&provider_user);
    let json = body_json(get_auth(app, "/api/v1/conversations", &token).await).await;

    assert_eq!(json["count"], 1);
    let conversation = &json["results"][0];
    assert_eq!(conversation["side"], "provider_side");
    assert_eq!(conversation["counterpart"]["user_id"], client.id);
    assert_eq!(conversation["unread_count"], 1);
    assert_eq!(conversation["last_message"]["content"], "Leaky roof");
}
