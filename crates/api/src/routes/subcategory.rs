//! Route definitions for the `/subcategories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/subcategories`.
///
/// ```text
/// GET    /                          -> list_subcategories (?category=&search=)
/// POST   /                          -> create_subcategory (admin)
/// GET    /{id}                      -> get_subcategory
/// PUT    /{id}                      -> update_subcategory (admin)
/// DELETE /{id}                      -> delete_subcategory (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list_subcategories).post(category::create_subcategory),
        )
        .route(
            "/{id}",
            get(category::get_subcategory)
                .put(category::update_subcategory)
                .delete(category::delete_subcategory),
        )
}
