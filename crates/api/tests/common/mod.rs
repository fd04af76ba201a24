//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use marketplace_api::auth::jwt::{generate_access_token, JwtConfig};
use marketplace_api::config::ServerConfig;
use marketplace_api::router::build_app_router;
use marketplace_api::state::AppState;
use marketplace_core::geo::DistanceMode;
use marketplace_core::roles::{ROLE_ADMIN, ROLE_CLIENT, ROLE_PROVIDER};
use marketplace_db::models::category::{CreateCategory, CreateSubcategory};
use marketplace_db::models::provider::{Provider, UpdateProvider};
use marketplace_db::models::service::CreateService;
use marketplace_db::models::user::{CreateUser, User};
use marketplace_db::repositories::{
    CategoryRepo, ProviderRepo, ServiceRepo, SubcategoryRepo, UserRepo,
};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults and planar ranking.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        distance_mode: DistanceMode::Planar,
    }
}

/// Build the full application router over `pool`, using the same middleware
/// stack as the binary.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Body,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = builder
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Body::empty()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Body::from(json.to_string())).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Body::from(json.to_string())).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Body::from(json.to_string())).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), Body::empty()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A signed access token for `user`.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn client(pool: &PgPool, username: &str) -> User {
    create_user(pool, username, ROLE_CLIENT).await
}

pub async fn admin(pool: &PgPool, username: &str) -> User {
    create_user(pool, username, ROLE_ADMIN).await
}

/// A provider-role user and its profile.
pub async fn provider(pool: &PgPool, username: &str) -> (User, Provider) {
    let user = create_user(pool, username, ROLE_PROVIDER).await;
    let profile = ProviderRepo::find_by_user_id(pool, user.id)
        .await
        .unwrap()
        .expect("provider profile created with the user");
    (user, profile)
}

/// A provider placed at `(latitude, longitude)`.
pub async fn located_provider(
    pool: &PgPool,
    username: &str,
    latitude: f64,
    longitude: f64,
) -> (User, Provider) {
    let (user, profile) = provider(pool, username).await;
    let update = UpdateProvider {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..Default::default()
    };
    let profile = ProviderRepo::update(pool, profile.id, &update)
        .await
        .unwrap()
        .unwrap();
    (user, profile)
}

/// A category with one subcategory; returns `(category_id, subcategory_id)`.
pub async fn taxonomy(pool: &PgPool, name: &str) -> (i64, i64) {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            description: None,
            icon: None,
            image_url: None,
        },
    )
    .await
    .unwrap();
    let subcategory = SubcategoryRepo::create(
        pool,
        &CreateSubcategory {
            category_id: category.id,
            name: format!("{name} general"),
            description: None,
            icon: None,
        },
    )
    .await
    .unwrap();
    (category.id, subcategory.id)
}

pub async fn service(pool: &PgPool, provider_id: i64, subcategory_id: i64, title: &str) -> i64 {
    ServiceRepo::create(
        pool,
        provider_id,
        &CreateService {
            subcategory_id,
            title: title.to_string(),
            description: None,
            price: None,
            price_type: None,
            is_available: None,
        },
    )
    .await
    .unwrap()
    .id
}
