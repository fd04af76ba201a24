//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_db::models::user::{UpdateUser, UserResponse};
use marketplace_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/v1/users/me
///
/// Update the caller's own profile fields. Absent fields are left unchanged.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(UserResponse::from(&user)))
}
