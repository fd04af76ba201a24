//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever touch
//! the caller's own notifications.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::types::DbId;
use marketplace_db::models::notification::Notification;
use marketplace_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
}

/// GET /api/v1/notifications
///
/// Newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<NotificationQuery>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<Notification>>> {
    let page = paging.page_request()?;
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        unread_only,
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = NotificationRepo::count_for_user(&state.pool, auth.user_id, unread_only).await?;

    Ok(Json(Page::new(notifications, count, page, &uri)))
}

/// POST /api/v1/notifications/{id}/read
///
/// Returns 204 on success, or 404 if the notification does not belong to
/// the caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "marked_read": count })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "count": count })))
}
