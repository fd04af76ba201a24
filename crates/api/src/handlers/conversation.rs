//! Handlers for the `/conversations` resource.
//!
//! Every operation resolves the caller against the conversation's two
//! participants once, via
//! [`Participants::resolve`](marketplace_core::conversation::Participants::resolve),
//! and works with the resulting side and counterpart from then on. Outsiders
//! get 403.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::conversation::{
    validate_attachment_count, validate_message_content, validate_start, ParticipantSide,
};
use marketplace_core::error::CoreError;
use marketplace_core::notification::{preview, NOTIFICATION_TYPE_MESSAGE};
use marketplace_core::types::{DbId, Timestamp};
use marketplace_db::models::conversation::{Conversation, ConversationOverview};
use marketplace_db::models::message::{MessageWithAttachments, NewAttachment};
use marketplace_db::repositories::{ConversationRepo, MessageRepo, ProviderRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::notify;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /conversations/start`.
#[derive(Debug, Deserialize)]
pub struct StartConversationRequest {
    pub provider_id: Option<DbId>,
    /// Optional first message, only sent when the conversation is new.
    pub message: Option<String>,
}

/// Request body for `POST /conversations/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Vec<NewAttachment>,
}

/// The other participant, as shown to the viewer.
#[derive(Debug, Serialize)]
pub struct Counterpart {
    pub user_id: DbId,
    pub username: String,
    pub full_name: String,
    /// Set when the counterpart is the provider side.
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LastMessage {
    pub id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A conversation from one participant's point of view.
#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    /// Which side the viewer is on.
    pub side: ParticipantSide,
    pub counterpart: Counterpart,
    /// Unread messages sent by the counterpart.
    pub unread_count: i64,
    pub last_message: Option<LastMessage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ConversationView {
    fn for_viewer(overview: ConversationOverview, viewer_id: DbId) -> Result<Self, CoreError> {
        let (side, counterpart_id) = overview.participants().resolve(viewer_id)?;

        let counterpart = match side {
            ParticipantSide::ClientSide => Counterpart {
                user_id: counterpart_id,
                username: overview.provider_username,
                full_name: overview.provider_full_name,
                company_name: Some(overview.provider_company_name),
            },
            ParticipantSide::ProviderSide => Counterpart {
                user_id: counterpart_id,
                username: overview.client_username,
                full_name: overview.client_full_name,
                company_name: None,
            },
        };

        let last_message = match (
            overview.last_message_id,
            overview.last_message_sender_id,
            overview.last_message_content,
            overview.last_message_at,
        ) {
            (Some(id), Some(sender_id), Some(content), Some(created_at)) => Some(LastMessage {
                id,
                sender_id,
                content,
                created_at,
            }),
            _ => None,
        };

        Ok(Self {
            id: overview.id,
            client_id: overview.client_id,
            provider_id: overview.provider_id,
            side,
            counterpart,
            unread_count: overview.unread_count,
            last_message,
            created_at: overview.created_at,
            updated_at: overview.updated_at,
        })
    }
}

/// Load a conversation and resolve the viewer, returning the counterpart id.
async fn load_for_viewer(
    state: &AppState,
    conversation_id: DbId,
    viewer_id: DbId,
) -> AppResult<(Conversation, DbId)> {
    let conversation = ConversationRepo::find_by_id(&state.pool, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id: conversation_id,
        }))?;

    let (_, counterpart_id) = conversation.participants().resolve(viewer_id)?;
    Ok((conversation, counterpart_id))
}

async fn view(
    state: &AppState,
    conversation_id: DbId,
    viewer_id: DbId,
) -> AppResult<ConversationView> {
    let overview = ConversationRepo::overview(&state.pool, viewer_id, conversation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id: conversation_id,
        }))?;
    Ok(ConversationView::for_viewer(overview, viewer_id)?)
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

/// GET /api/v1/conversations
///
/// The caller's conversations on either side, most recently active first.
pub async fn list_conversations(
    auth: AuthUser,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<ConversationView>>> {
    let page = paging.page_request()?;

    let overviews =
        ConversationRepo::list_for_user(&state.pool, auth.user_id, page.limit(), page.offset())
            .await?;
    let count = ConversationRepo::count_for_user(&state.pool, auth.user_id).await?;

    let views = overviews
        .into_iter()
        .map(|o| ConversationView::for_viewer(o, auth.user_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Page::new(views, count, page, &uri)))
}

/// GET /api/v1/conversations/{id}
pub async fn get_conversation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ConversationView>> {
    load_for_viewer(&state, id, auth.user_id).await?;
    Ok(Json(view(&state, id, auth.user_id).await?))
}

/// POST /api/v1/conversations/start
///
/// Find-or-create the conversation between the caller and a provider.
/// Returns 201 when it was created, 200 when an existing one was reused.
pub async fn start_conversation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<StartConversationRequest>,
) -> AppResult<(StatusCode, Json<ConversationView>)> {
    let provider_id = input
        .provider_id
        .ok_or_else(|| CoreError::missing_param("provider_id"))?;

    let message = match input.message.as_deref() {
        Some(m) if !m.trim().is_empty() => Some(validate_message_content(Some(m))?),
        _ => None,
    };

    let provider = ProviderRepo::find_by_id(&state.pool, provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: provider_id,
        }))?;
    validate_start(auth.user_id, provider.user_id)?;

    let started =
        ConversationRepo::find_or_create(&state.pool, auth.user_id, provider.id, message).await?;
    let conversation_id = started.conversation.id;

    let status = if started.created {
        tracing::info!(
            conversation_id,
            provider_id = provider.id,
            user_id = auth.user_id,
            "Conversation started"
        );
        if let Some(content) = message {
            notify(
                &state.pool,
                provider.user_id,
                NOTIFICATION_TYPE_MESSAGE,
                "New message",
                preview(content),
                Some(conversation_id),
            )
            .await;
        }
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(view(&state, conversation_id, auth.user_id).await?)))
}

// ---------------------------------------------------------------------------
// Messages and read state
// ---------------------------------------------------------------------------

/// GET /api/v1/conversations/{id}/messages
///
/// Oldest first. Reading does not mark anything as read.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<MessageWithAttachments>>> {
    load_for_viewer(&state, id, auth.user_id).await?;
    let messages = MessageRepo::list_for_conversation(&state.pool, id).await?;
    Ok(Json(messages))
}

/// POST /api/v1/conversations/{id}/messages
///
/// Appends the message and its attachments and bumps the conversation's
/// recency in one transaction, then notifies the counterpart.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageWithAttachments>)> {
    let (_, counterpart_id) = load_for_viewer(&state, id, auth.user_id).await?;

    let content = validate_message_content(input.content.as_deref())?;
    validate_attachment_count(input.attachments.len())?;
    if input
        .attachments
        .iter()
        .any(|a| a.file.trim().is_empty() || a.file_name.trim().is_empty())
    {
        return Err(AppError::Core(CoreError::Validation(
            "Each attachment needs a file and a file_name".to_string(),
        )));
    }

    let message =
        MessageRepo::append(&state.pool, id, auth.user_id, content, &input.attachments).await?;

    tracing::info!(
        conversation_id = id,
        message_id = message.message.id,
        user_id = auth.user_id,
        attachments = message.attachments.len(),
        "Message sent"
    );

    notify(
        &state.pool,
        counterpart_id,
        NOTIFICATION_TYPE_MESSAGE,
        "New message",
        preview(content),
        Some(id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /api/v1/conversations/{id}/read
///
/// Mark every unread message from the counterpart as read. Idempotent; a
/// repeated call reports `0`.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let (_, counterpart_id) = load_for_viewer(&state, id, auth.user_id).await?;
    let marked = ConversationRepo::mark_read(&state.pool, id, counterpart_id).await?;

    tracing::info!(
        conversation_id = id,
        user_id = auth.user_id,
        marked,
        "Conversation marked read"
    );
    Ok(Json(serde_json::json!({ "marked_read": marked })))
}

/// GET /api/v1/conversations/{id}/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let (_, counterpart_id) = load_for_viewer(&state, id, auth.user_id).await?;
    let count = ConversationRepo::unread_count(&state.pool, id, counterpart_id).await?;
    Ok(Json(serde_json::json!({ "count": count })))
}
