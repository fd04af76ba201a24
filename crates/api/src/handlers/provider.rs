//! Handlers for the `/providers` resource: listing, profile, and discovery.
//!
//! Discovery endpoints take their parameters as raw strings so that a
//! missing or non-numeric value is reported as a validation error with a
//! readable message rather than a generic query rejection.

use std::collections::HashMap;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::Json;
use marketplace_core::discovery::{require_id, validate_coordinates, NearbyQuery};
use marketplace_core::error::CoreError;
use marketplace_core::geo::{rank_nearby, BoundingBox};
use marketplace_core::types::DbId;
use marketplace_db::models::provider::{Provider, ProviderFilter, ProviderSummary, UpdateProvider};
use marketplace_db::models::review::{Review, ReviewFilter};
use marketplace_db::models::service::ProviderService;
use marketplace_db::repositories::{FavoriteRepo, ProviderRepo, ReviewRepo, ServiceRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Number of recent reviews embedded in the provider detail.
const RECENT_REVIEWS: i64 = 5;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /providers/by-category`.
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category_id: Option<String>,
}

/// Query parameters for `GET /providers/by-subcategory`.
#[derive(Debug, Deserialize)]
pub struct SubcategoryParams {
    pub subcategory_id: Option<String>,
}

/// Query parameters for `GET /providers/nearby`.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    /// Kilometres; defaults to 10.
    pub radius: Option<String>,
}

/// A nearby-search hit: the provider summary plus its distance.
#[derive(Debug, Serialize)]
pub struct NearbyProvider {
    #[serde(flatten)]
    pub provider: ProviderSummary,
    /// Great-circle distance from the query point, informational only.
    pub distance_km: f64,
}

/// Response for `GET /providers/{id}`.
#[derive(Debug, Serialize)]
pub struct ProviderDetail {
    #[serde(flatten)]
    pub provider: ProviderSummary,
    pub services: Vec<ProviderService>,
    pub recent_reviews: Vec<Review>,
    /// Whether the authenticated caller has favorited this provider.
    /// Always `false` for anonymous callers.
    pub is_favorited: bool,
}

/// Load the provider profile owned by `user_id`, or fail with "not a provider".
pub(crate) async fn require_provider(pool: &sqlx::PgPool, user_id: DbId) -> AppResult<Provider> {
    ProviderRepo::find_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_a_provider()))
}

// ---------------------------------------------------------------------------
// Listing and detail
// ---------------------------------------------------------------------------

/// GET /api/v1/providers
///
/// Paginated provider summaries filtered by `is_verified`, `is_featured` and
/// a substring `search` over username, names and company name.
pub async fn list_providers(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<ProviderFilter>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<ProviderSummary>>> {
    let page = paging.page_request()?;

    let providers = ProviderRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = ProviderRepo::count(&state.pool, &filter).await?;

    Ok(Json(Page::new(providers, count, page, &uri)))
}

/// GET /api/v1/providers/{id}
pub async fn get_provider(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProviderDetail>> {
    let provider = ProviderRepo::find_summary(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id,
        }))?;

    let services = ServiceRepo::list_for_provider(&state.pool, id).await?;
    let recent_reviews = ReviewRepo::list(
        &state.pool,
        &ReviewFilter {
            provider: Some(id),
            service: None,
        },
        RECENT_REVIEWS,
        0,
    )
    .await?;

    let is_favorited = match auth {
        Some(auth) => FavoriteRepo::exists(&state.pool, auth.user_id, id).await?,
        None => false,
    };

    Ok(Json(ProviderDetail {
        provider,
        services,
        recent_reviews,
        is_favorited,
    }))
}

// ---------------------------------------------------------------------------
// Own profile
// ---------------------------------------------------------------------------

/// GET /api/v1/providers/me
pub async fn get_my_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Provider>> {
    let provider = require_provider(&state.pool, auth.user_id).await?;
    Ok(Json(provider))
}

/// PUT /api/v1/providers/me
///
/// Update company name, address and location. Coordinates are validated
/// against their degree ranges; absent fields keep their current value.
pub async fn update_my_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProvider>,
) -> AppResult<Json<Provider>> {
    let provider = require_provider(&state.pool, auth.user_id).await?;

    validate_coordinates(
        input.latitude.or(provider.latitude).unwrap_or_default(),
        input.longitude.or(provider.longitude).unwrap_or_default(),
    )?;

    let updated = ProviderRepo::update(&state.pool, provider.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: provider.id,
        }))?;

    tracing::info!(provider_id = updated.id, user_id = auth.user_id, "Provider profile updated");
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// GET /api/v1/providers/by-category?category_id=
///
/// Distinct providers with at least one service in the category.
pub async fn by_category(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<CategoryParams>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<ProviderSummary>>> {
    let category_id = require_id("category_id", params.category_id.as_deref())?;
    let page = paging.page_request()?;

    let providers =
        ProviderRepo::list_by_category(&state.pool, category_id, page.limit(), page.offset())
            .await?;
    let count = ProviderRepo::count_by_category(&state.pool, category_id).await?;

    Ok(Json(Page::new(providers, count, page, &uri)))
}

/// GET /api/v1/providers/by-subcategory?subcategory_id=
///
/// Distinct providers with at least one service in the subcategory.
pub async fn by_subcategory(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<SubcategoryParams>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<ProviderSummary>>> {
    let subcategory_id = require_id("subcategory_id", params.subcategory_id.as_deref())?;
    let page = paging.page_request()?;

    let providers = ProviderRepo::list_by_subcategory(
        &state.pool,
        subcategory_id,
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = ProviderRepo::count_by_subcategory(&state.pool, subcategory_id).await?;

    Ok(Json(Page::new(providers, count, page, &uri)))
}

/// GET /api/v1/providers/nearby?latitude=&longitude=&radius=
///
/// Bounding-box prefilter in SQL, then ranking in memory according to the
/// configured [`DistanceMode`]. Only the requested page of summaries is
/// loaded.
///
/// [`DistanceMode`]: marketplace_core::geo::DistanceMode
pub async fn nearby(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<NearbyParams>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<NearbyProvider>>> {
    let query = NearbyQuery::parse(
        params.latitude.as_deref(),
        params.longitude.as_deref(),
        params.radius.as_deref(),
    )?;
    let page = paging.page_request()?;
    let mode = state.config.distance_mode;

    let bbox = BoundingBox::around(query.center, query.radius_km);
    let candidates = ProviderRepo::locations_in_box(&state.pool, &bbox).await?;
    let ranked = rank_nearby(
        query.center,
        query.radius_km,
        mode,
        candidates.iter().map(|c| (c.id, c.point())),
    );

    let window = page.slice(&ranked);
    let ids: Vec<DbId> = window.iter().map(|r| r.key).collect();
    let mut summaries: HashMap<DbId, ProviderSummary> =
        ProviderRepo::summaries_by_ids(&state.pool, &ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

    let results: Vec<NearbyProvider> = window
        .iter()
        .filter_map(|r| {
            summaries.remove(&r.key).map(|provider| NearbyProvider {
                provider,
                distance_km: r.distance_km,
            })
        })
        .collect();

    tracing::debug!(
        latitude = query.center.latitude,
        longitude = query.center.longitude,
        radius_km = query.radius_km,
        mode = %mode,
        candidates = candidates.len(),
        matched = ranked.len(),
        "Nearby search"
    );

    let count = i64::try_from(ranked.len()).unwrap_or(i64::MAX);
    Ok(Json(Page::new(results, count, page, &uri)))
}
