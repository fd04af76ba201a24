//! Handlers for the `/reviews` resource.
//!
//! Creating a review derives its overall rating and refreshes the provider's
//! cached average in the same transaction (see `ReviewRepo::create`).

use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::notification::{preview, NOTIFICATION_TYPE_REVIEW};
use marketplace_core::rating::{validate_comment, SubRatings};
use marketplace_db::models::review::{CreateReview, Review, ReviewFilter};
use marketplace_db::repositories::{ProviderRepo, ReviewRepo, ServiceRepo};

use super::provider::require_provider;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireProvider;
use crate::notifications::notify;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// POST /api/v1/reviews
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let ratings = SubRatings::new(
        input.quality_rating,
        input.punctuality_rating,
        input.value_rating,
    )?;
    validate_comment(&input.comment)?;

    let provider = ProviderRepo::find_by_id(&state.pool, input.provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: input.provider_id,
        }))?;

    if provider.user_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot review yourself".to_string(),
        )));
    }

    if let Some(service_id) = input.service_id {
        let belongs = ServiceRepo::find_by_id(&state.pool, service_id)
            .await?
            .is_some_and(|s| s.provider_id == provider.id);
        if !belongs {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Service {service_id} does not belong to provider {}",
                provider.id
            ))));
        }
    }

    let review = ReviewRepo::create(
        &state.pool,
        auth.user_id,
        provider.id,
        input.service_id,
        ratings,
        input.comment.trim(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Provider",
        id: provider.id,
    }))?;

    tracing::info!(
        review_id = review.id,
        provider_id = provider.id,
        user_id = auth.user_id,
        overall_rating = review.overall_rating,
        "Review created"
    );

    notify(
        &state.pool,
        provider.user_id,
        NOTIFICATION_TYPE_REVIEW,
        "New review",
        preview(&review.comment),
        Some(review.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/reviews?provider=&service=
///
/// Newest first.
pub async fn list_reviews(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<ReviewFilter>,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<Review>>> {
    let page = paging.page_request()?;

    let reviews = ReviewRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = ReviewRepo::count(&state.pool, &filter).await?;

    Ok(Json(Page::new(reviews, count, page, &uri)))
}

/// GET /api/v1/reviews/mine
///
/// Reviews written by the caller.
pub async fn my_reviews(
    auth: AuthUser,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<Review>>> {
    let page = paging.page_request()?;

    let reviews =
        ReviewRepo::list_by_client(&state.pool, auth.user_id, page.limit(), page.offset()).await?;
    let count = ReviewRepo::count_by_client(&state.pool, auth.user_id).await?;

    Ok(Json(Page::new(reviews, count, page, &uri)))
}

/// GET /api/v1/reviews/received
///
/// Reviews about the caller's provider profile.
pub async fn received_reviews(
    RequireProvider(auth): RequireProvider,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<Review>>> {
    let page = paging.page_request()?;
    let provider = require_provider(&state.pool, auth.user_id).await?;
    let filter = ReviewFilter {
        provider: Some(provider.id),
        service: None,
    };

    let reviews = ReviewRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let count = ReviewRepo::count(&state.pool, &filter).await?;

    Ok(Json(Page::new(reviews, count, page, &uri)))
}
