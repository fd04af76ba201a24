//! Handlers for the `/favorites` resource.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::notification::NOTIFICATION_TYPE_FAVORITE;
use marketplace_core::types::{DbId, Timestamp};
use marketplace_db::models::favorite::ToggleOutcome;
use marketplace_db::models::provider::ProviderSummary;
use marketplace_db::repositories::{FavoriteRepo, ProviderRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::notify;
use crate::state::AppState;

/// Request body for `POST /favorites/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub provider_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub status: ToggleOutcome,
}

/// A favorite with the provider it points at.
#[derive(Debug, Serialize)]
pub struct FavoriteView {
    pub id: DbId,
    pub provider: ProviderSummary,
    pub created_at: Timestamp,
}

/// GET /api/v1/favorites
///
/// The caller's favorites, most recent first.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FavoriteView>>> {
    let favorites = FavoriteRepo::list_for_user(&state.pool, auth.user_id).await?;

    let ids: Vec<DbId> = favorites.iter().map(|f| f.provider_id).collect();
    let mut providers: HashMap<DbId, ProviderSummary> =
        ProviderRepo::summaries_by_ids(&state.pool, &ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

    let views = favorites
        .into_iter()
        .filter_map(|f| {
            providers.remove(&f.provider_id).map(|provider| FavoriteView {
                id: f.id,
                provider,
                created_at: f.created_at,
            })
        })
        .collect();

    Ok(Json(views))
}

/// POST /api/v1/favorites/toggle
///
/// Add the provider to the caller's favorites, or remove it if present.
pub async fn toggle_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ToggleFavoriteRequest>,
) -> AppResult<Json<ToggleFavoriteResponse>> {
    let provider_id = input
        .provider_id
        .ok_or_else(|| CoreError::missing_param("provider_id"))?;

    let provider = ProviderRepo::find_by_id(&state.pool, provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: provider_id,
        }))?;

    let status = FavoriteRepo::toggle(&state.pool, auth.user_id, provider.id).await?;
    tracing::info!(provider_id, user_id = auth.user_id, ?status, "Favorite toggled");

    if status == ToggleOutcome::Added {
        notify(
            &state.pool,
            provider.user_id,
            NOTIFICATION_TYPE_FAVORITE,
            "New favorite",
            "Someone added you to their favorites",
            Some(provider.id),
        )
        .await;
    }

    Ok(Json(ToggleFavoriteResponse { status }))
}
