//! Route definitions for the `/providers` resource.
//!
//! Listing, detail and discovery are public; `/me` requires a provider
//! profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::provider;
use crate::state::AppState;

/// Routes mounted at `/providers`.
///
/// ```text
/// GET    /                          -> list_providers
/// GET    /me                        -> get_my_profile
/// PUT    /me                        -> update_my_profile
/// GET    /by-category               -> by_category (?category_id=)
/// GET    /by-subcategory            -> by_subcategory (?subcategory_id=)
/// GET    /nearby                    -> nearby (?latitude=&longitude=&radius=)
/// GET    /{id}                      -> get_provider
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(provider::list_providers))
        .route(
            "/me",
            get(provider::get_my_profile).put(provider::update_my_profile),
        )
        .route("/by-category", get(provider::by_category))
        .route("/by-subcategory", get(provider::by_subcategory))
        .route("/nearby", get(provider::nearby))
        .route("/{id}", get(provider::get_provider))
}
