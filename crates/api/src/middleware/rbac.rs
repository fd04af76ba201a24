//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Use these in handlers to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use marketplace_core::error::CoreError;
use marketplace_core::roles::{ROLE_ADMIN, ROLE_PROVIDER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `provider` role. Rejects with 403 Forbidden otherwise.
///
/// Only checks the token's role claim; handlers still load the provider
/// profile and report a missing one as a validation error.
pub struct RequireProvider(pub AuthUser);

impl FromRequestParts<AppState> for RequireProvider {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_PROVIDER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Provider role required".into(),
            )));
        }
        Ok(RequireProvider(user))
    }
}
