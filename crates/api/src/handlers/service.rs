//! Handlers for the `/services` resource (provider service offerings).
//!
//! Listing and detail are public. Writes are limited to the provider that
//! owns the service.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::service::{validate_price, validate_price_type, validate_title};
use marketplace_core::types::DbId;
use marketplace_db::models::provider::Provider;
use marketplace_db::models::service::{
    CreateService, ProviderService, ServiceFilter, UpdateService,
};
use marketplace_db::repositories::ServiceRepo;

use super::provider::require_provider;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// GET /api/v1/services
///
/// Filters: `provider_id`, `subcategory`, `is_available`, `price_type`.
pub async fn list_services(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<ServiceFilter>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<ProviderService>>> {
    let page = paging.page_request()?;

    let services = ServiceRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = ServiceRepo::count(&state.pool, &filter).await?;

    Ok(Json(Page::new(services, count, page, &uri)))
}

/// GET /api/v1/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProviderService>> {
    Ok(Json(find_service(&state, id).await?))
}

/// GET /api/v1/services/mine
pub async fn my_services(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProviderService>>> {
    let provider = require_provider(&state.pool, auth.user_id).await?;
    let services = ServiceRepo::list_for_provider(&state.pool, provider.id).await?;
    Ok(Json(services))
}

/// POST /api/v1/services
pub async fn create_service(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<ProviderService>)> {
    let provider = require_provider(&state.pool, auth.user_id).await?;

    validate_title(&input.title)?;
    validate_price(input.price)?;
    if let Some(price_type) = input.price_type.as_deref() {
        validate_price_type(price_type)?;
    }

    let service = ServiceRepo::create(&state.pool, provider.id, &input).await?;

    tracing::info!(
        service_id = service.id,
        provider_id = provider.id,
        "Service created"
    );
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/v1/services/{id}
pub async fn update_service(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<ProviderService>> {
    let provider = require_provider(&state.pool, auth.user_id).await?;
    let service = find_service(&state, id).await?;
    ensure_owner(&provider, &service)?;

    if let Some(title) = input.title.as_deref() {
        validate_title(title)?;
    }
    validate_price(input.price)?;
    if let Some(price_type) = input.price_type.as_deref() {
        validate_price_type(price_type)?;
    }

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;

    tracing::info!(service_id = id, provider_id = provider.id, "Service updated");
    Ok(Json(service))
}

/// DELETE /api/v1/services/{id}
pub async fn delete_service(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let provider = require_provider(&state.pool, auth.user_id).await?;
    let service = find_service(&state, id).await?;
    ensure_owner(&provider, &service)?;

    ServiceRepo::delete(&state.pool, id).await?;

    tracing::info!(service_id = id, provider_id = provider.id, "Service deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_service(state: &AppState, id: DbId) -> AppResult<ProviderService> {
    ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))
}

fn ensure_owner(provider: &Provider, service: &ProviderService) -> Result<(), CoreError> {
    if service.provider_id != provider.id {
        return Err(CoreError::Forbidden(
            "You can only modify your own services".to_string(),
        ));
    }
    Ok(())
}
