pub mod auth;
pub mod category;
pub mod conversation;
pub mod dispute;
pub mod favorite;
pub mod health;
pub mod notification;
pub mod provider;
pub mod quote;
pub mod report;
pub mod review;
pub mod service;
pub mod subcategory;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
///
/// /users/me                                        get, update own profile
///
/// /categories                                      list, create (admin)
/// /categories/{id}                                 get, update, delete (admin)
/// /subcategories                                   list, create (admin)
/// /subcategories/{id}                              get, update, delete (admin)
///
/// /services                                        list, create (provider)
/// /services/mine                                   own services
/// /services/{id}                                   get, update, delete (owner)
///
/// /providers                                       list (public)
/// /providers/me                                    get, update own profile
/// /providers/by-category                           discovery by category
/// /providers/by-subcategory                        discovery by subcategory
/// /providers/nearby                                proximity search
/// /providers/{id}                                  detail
///
/// /reviews                                         list, create
/// /reviews/mine                                    reviews written
/// /reviews/received                                reviews received (provider)
///
/// /conversations                                   list
/// /conversations/start                             find-or-create
/// /conversations/{id}                              detail
/// /conversations/{id}/messages                     list, send
/// /conversations/{id}/read                         mark read
/// /conversations/{id}/unread-count                 unread count
///
/// /favorites                                       list
/// /favorites/toggle                                add or remove
///
/// /disputes                                        list, create
/// /disputes/{id}                                   detail with evidence
/// /disputes/{id}/evidence                          add evidence
/// /disputes/{id}/status                            change status (admin)
///
/// /notifications                                   list
/// /notifications/read-all                          mark all read
/// /notifications/unread-count                      unread count
/// /notifications/{id}/read                         mark one read
///
/// /reports                                         list, create
/// /reports/{id}/status                             change status (admin)
///
/// /quotes                                          list, create
/// /quotes/{id}/status                              change status (provider)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/categories", category::router())
        .nest("/subcategories", subcategory::router())
        .nest("/services", service::router())
        .nest("/providers", provider::router())
        .nest("/reviews", review::router())
        .nest("/conversations", conversation::router())
        .nest("/favorites", favorite::router())
        .nest("/disputes", dispute::router())
        .nest("/notifications", notification::router())
        .nest("/reports", report::router())
        .nest("/quotes", quote::router())
}
