//! Route definitions for the `/disputes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dispute;
use crate::state::AppState;

/// Routes mounted at `/disputes`.
///
/// ```text
/// GET    /                          -> list_disputes
/// POST   /                          -> create_dispute
/// GET    /{id}                      -> get_dispute
/// POST   /{id}/evidence             -> add_evidence
/// POST   /{id}/status               -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(dispute::list_disputes).post(dispute::create_dispute),
        )
        .route("/{id}", get(dispute::get_dispute))
        .route("/{id}/evidence", post(dispute::add_evidence))
        .route("/{id}/status", post(dispute::update_status))
}
