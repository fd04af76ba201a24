use axum::routing::{get, post};
use axum::Router;

use crate::handlers::favorite;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// GET    /                          -> list_favorites
/// POST   /toggle                    -> toggle_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorite::list_favorites))
        .route("/toggle", post(favorite::toggle_favorite))
}
