//! Handlers for the `/reports` resource.
//!
//! Any authenticated user may file a report. Admins see every report and
//! move them through review; everyone else sees their own.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::report::{validate_reason, validate_report_status, validate_report_target};
use marketplace_core::types::DbId;
use marketplace_db::models::report::{CreateReport, Report};
use marketplace_db::repositories::ReportRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Request body for `POST /reports/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ReportStatusRequest {
    pub status: Option<String>,
    #[serde(default)]
    pub admin_notes: String,
}

/// POST /api/v1/reports
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<Report>)> {
    validate_report_target(
        &input.kind,
        input.reported_user_id,
        input.reported_provider_id,
        input.reported_review_id,
    )?;
    validate_reason(&input.reason)?;

    let report = ReportRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        report_id = report.id,
        kind = %report.kind,
        user_id = auth.user_id,
        "Report filed"
    );
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/reports
pub async fn list_reports(
    auth: AuthUser,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(paging): Query<PageParams>,
) -> AppResult<Json<Page<Report>>> {
    let page = paging.page_request()?;
    let reporter = (!auth.is_admin()).then_some(auth.user_id);

    let reports = ReportRepo::list(&state.pool, reporter, page.limit(), page.offset()).await?;
    let count = ReportRepo::count(&state.pool, reporter).await?;

    Ok(Json(Page::new(reports, count, page, &uri)))
}

/// POST /api/v1/reports/{id}/status
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReportStatusRequest>,
) -> AppResult<Json<Report>> {
    let status = validate_report_status(input.status.as_deref())?;

    let report = ReportRepo::update_status(&state.pool, id, status, input.admin_notes.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;

    tracing::info!(report_id = id, status, user_id = admin.user_id, "Report status updated");
    Ok(Json(report))
}
