//! Handlers for the `/disputes` resource.
//!
//! Visibility: admins see every dispute, a provider sees disputes filed
//! against them, a client sees disputes they opened. Status changes are
//! admin-only.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::dispute::{
    validate_dispute_status, validate_dispute_title, validate_evidence,
};
use marketplace_core::error::CoreError;
use marketplace_core::notification::NOTIFICATION_TYPE_DISPUTE;
use marketplace_core::types::DbId;
use marketplace_db::models::dispute::{CreateDispute, Dispute, DisputeEvidence, DisputeScope};
use marketplace_db::repositories::{DisputeRepo, ProviderRepo, ServiceRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::notifications::notify;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Request body for `POST /disputes/{id}/evidence`.
#[derive(Debug, Deserialize)]
pub struct EvidenceRequest {
    pub description: Option<String>,
    /// Opaque reference to an already-stored file.
    pub file: Option<String>,
}

/// Request body for `POST /disputes/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct DisputeStatusRequest {
    pub status: Option<String>,
    #[serde(default)]
    pub resolution_note: String,
}

#[derive(Debug, Serialize)]
pub struct DisputeDetail {
    #[serde(flatten)]
    pub dispute: Dispute,
    pub evidence: Vec<DisputeEvidence>,
}

/// Load a dispute the caller may see, returning it with the provider's user id.
async fn load_visible(
    state: &AppState,
    id: DbId,
    auth: &AuthUser,
) -> AppResult<(Dispute, DbId)> {
    let dispute = DisputeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dispute",
            id,
        }))?;
    let provider = ProviderRepo::find_by_id(&state.pool, dispute.provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: dispute.provider_id,
        }))?;

    let involved = dispute.client_id == auth.user_id || provider.user_id == auth.user_id;
    if !involved && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a party to this dispute".to_string(),
        )));
    }
    Ok((dispute, provider.user_id))
}

/// POST /api/v1/disputes
pub async fn create_dispute(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDispute>,
) -> AppResult<(StatusCode, Json<Dispute>)> {
    validate_dispute_title(&input.title)?;
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "description must not be empty".to_string(),
        )));
    }

    let provider = ProviderRepo::find_by_id(&state.pool, input.provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: input.provider_id,
        }))?;
    if provider.user_id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot open a dispute against yourself".to_string(),
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

    let dispute = DisputeRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(
        dispute_id = dispute.id,
        provider_id = provider.id,
        user_id = auth.user_id,
        "Dispute opened"
    );

    notify(
        &state.pool,
        provider.user_id,
        NOTIFICATION_TYPE_DISPUTE,
        "New dispute",
        dispute.title.clone(),
        Some(dispute.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(dispute)))
}

/// GET /api/v1/disputes
pub async fn list_disputes(
    auth: AuthUser,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<Dispute>>> {
    let page = paging.page_request()?;

    let scope = if auth.is_admin() {
        DisputeScope::All
    } else {
        match ProviderRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(provider) => DisputeScope::ReceivedBy {
                provider_id: provider.id,
            },
            None => DisputeScope::OpenedBy {
                client_id: auth.user_id,
            },
        }
    };

    let disputes = DisputeRepo::list(&state.pool, scope, page.limit(), page.offset()).await?;
    let count = DisputeRepo::count(&state.pool, scope).await?;

    Ok(Json(Page::new(disputes, count, page, &uri)))
}

/// GET /api/v1/disputes/{id}
pub async fn get_dispute(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DisputeDetail>> {
    let (dispute, _) = load_visible(&state, id, &auth).await?;
    let evidence = DisputeRepo::list_evidence(&state.pool, id).await?;
    Ok(Json(DisputeDetail { dispute, evidence }))
}

/// POST /api/v1/disputes/{id}/evidence
pub async fn add_evidence(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EvidenceRequest>,
) -> AppResult<(StatusCode, Json<DisputeEvidence>)> {
    validate_evidence(input.description.as_deref(), input.file.as_deref())?;
    load_visible(&state, id, &auth).await?;

    let evidence = DisputeRepo::add_evidence(
        &state.pool,
        id,
        auth.user_id,
        input.description.as_deref().unwrap_or_default().trim(),
        input.file.as_deref().unwrap_or_default().trim(),
    )
    .await?;

    tracing::info!(
        dispute_id = id,
        evidence_id = evidence.id,
        user_id = auth.user_id,
        "Evidence added"
    );
    Ok((StatusCode::CREATED, Json(evidence)))
}

/// POST /api/v1/disputes/{id}/status
///
/// Admin-only. Notifies both parties of the new status.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DisputeStatusRequest>,
) -> AppResult<Json<Dispute>> {
    let status = validate_dispute_status(input.status.as_deref())?;
    let (_, provider_user_id) = load_visible(&state, id, &admin).await?;

    let dispute = DisputeRepo::update_status(&state.pool, id, status, input.resolution_note.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dispute",
            id,
        }))?;

    tracing::info!(
        dispute_id = id,
        status,
        user_id = admin.user_id,
        "Dispute status updated"
    );

    let content = format!("Dispute \"{}\" is now {status}", dispute.title);
    for user_id in [dispute.client_id, provider_user_id] {
        notify(
            &state.pool,
            user_id,
            NOTIFICATION_TYPE_DISPUTE,
            "Dispute updated",
            content.clone(),
            Some(dispute.id),
        )
        .await;
    }

    Ok(Json(dispute))
}
