use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quote;
use crate::state::AppState;

/// Routes mounted at `/quotes`.
///
/// ```text
/// GET    /                          -> list_quotes
/// POST   /                          -> create_quote
/// POST   /{id}/status               -> update_status (addressed provider)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quote::list_quotes).post(quote::create_quote))
        .route("/{id}/status", post(quote::update_status))
}
