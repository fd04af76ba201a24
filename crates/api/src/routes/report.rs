use axum::routing::{get, post};
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /                          -> list_reports
/// POST   /                          -> create_report
/// POST   /{id}/status               -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report::list_reports).post(report::create_report))
        .route("/{id}/status", post(report::update_status))
}
