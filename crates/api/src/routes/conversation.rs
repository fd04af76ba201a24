//! Route definitions for the `/conversations` resource.
//!
//! All endpoints require authentication; per-conversation endpoints also
//! require the caller to be one of the two participants.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::conversation;
use crate::state::AppState;

/// Routes mounted at `/conversations`.
///
/// ```text
/// GET    /                          -> list_conversations
/// POST   /start                     -> start_conversation
/// GET    /{id}                      -> get_conversation
/// GET    /{id}/messages             -> list_messages
/// POST   /{id}/messages             -> send_message
/// POST   /{id}/read                 -> mark_read
/// GET    /{id}/unread-count         -> unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(conversation::list_conversations))
        .route("/start", post(conversation::start_conversation))
        .route("/{id}", get(conversation::get_conversation))
        .route(
            "/{id}/messages",
            get(conversation::list_messages).post(conversation::send_message),
        )
        .route("/{id}/read", post(conversation::mark_read))
        .route("/{id}/unread-count", get(conversation::unread_count))
}
