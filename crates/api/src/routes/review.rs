//! Route definitions for the `/reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /                          -> list_reviews (?provider=&service=)
/// POST   /                          -> create_review
/// GET    /mine                      -> my_reviews
/// GET    /received                  -> received_reviews (provider)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list_reviews).post(review::create_review))
        .route("/mine", get(review::my_reviews))
        .route("/received", get(review::received_reviews))
}
