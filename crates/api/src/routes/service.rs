//! Route definitions for the `/services` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /                          -> list_services
/// POST   /                          -> create_service (provider)
/// GET    /mine                      -> my_services (provider)
/// GET    /{id}                      -> get_service
/// PUT    /{id}                      -> update_service (owner)
/// DELETE /{id}                      -> delete_service (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(service::list_services).post(service::create_service),
        )
        .route("/mine", get(service::my_services))
        .route(
            "/{id}",
            get(service::get_service)
                .put(service::update_service)
                .delete(service::delete_service),
        )
}
