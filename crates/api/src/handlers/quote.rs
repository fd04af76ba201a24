//! Handlers for the `/quotes` resource (quote requests).
//!
//! Clients ask a provider for a quote; the addressed provider moves the
//! request through its statuses.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::quote::{validate_budget, validate_quote_status, validate_subject};
use marketplace_core::types::DbId;
use marketplace_db::models::quote::{CreateQuoteRequest, QuoteRequest, QuoteScope};
use marketplace_db::repositories::{ProviderRepo, QuoteRequestRepo, ServiceRepo};
use serde::Deserialize;

use super::provider::require_provider;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Request body for `POST /quotes/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct QuoteStatusRequest {
    pub status: String,
}

/// POST /api/v1/quotes
pub async fn create_quote(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuoteRequest>,
) -> AppResult<(StatusCode, Json<QuoteRequest>)> {
    validate_subject(&input.subject)?;
    validate_budget(input.budget)?;

    let provider = ProviderRepo::find_by_id(&state.pool, input.provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: input.provider_id,
        }))?;
    if provider.user_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot request a quote from yourself".to_string(),
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

    let quote = QuoteRequestRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        quote_id = quote.id,
        provider_id = provider.id,
        user_id = auth.user_id,
        "Quote requested"
    );
    Ok((StatusCode::CREATED, Json(quote)))
}

/// GET /api/v1/quotes
///
/// Admins see all requests, providers the ones addressed to them, clients
/// the ones they sent.
pub async fn list_quotes(
    auth: AuthUser,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<QuoteRequest>>> {
    let page = paging.page_request()?;

    let scope = if auth.is_admin() {
        QuoteScope::All
    } else {
        match ProviderRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(provider) => QuoteScope::ReceivedBy {
                provider_id: provider.id,
            },
            None => QuoteScope::SentBy {
                client_id: auth.user_id,
            },
        }
    };

    let quotes = QuoteRequestRepo::list(&state.pool, scope, page.limit(), page.offset()).await?;
    let count = QuoteRequestRepo::count(&state.pool, scope).await?;

    Ok(Json(Page::new(quotes, count, page, &uri)))
}

/// POST /api/v1/quotes/{id}/status
///
/// Only the provider the request is addressed to may change its status.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<QuoteStatusRequest>,
) -> AppResult<Json<QuoteRequest>> {
    validate_quote_status(&input.status)?;
    let provider = require_provider(&state.pool, auth.user_id).await?;

    let quote = QuoteRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuoteRequest",
            id,
        }))?;
    if quote.provider_id != provider.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the addressed provider can update this quote request".to_string(),
        )));
    }

    let quote = QuoteRequestRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuoteRequest",
            id,
        }))?;

    tracing::info!(
        quote_id = id,
        status = %quote.status,
        provider_id = provider.id,
        "Quote status updated"
    );
    Ok(Json(quote))
}
