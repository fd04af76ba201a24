//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use marketplace_core::roles::{ROLE_CLIENT, ROLE_PROVIDER};
use marketplace_core::types::DbId;
use marketplace_db::models::category::{CreateCategory, CreateSubcategory};
use marketplace_db::models::provider::{Provider, UpdateProvider};
use marketplace_db::models::service::CreateService;
use marketplace_db::models::user::{CreateUser, User};
use marketplace_db::repositories::{
    CategoryRepo, ProviderRepo, ServiceRepo, SubcategoryRepo, UserRepo,
};
use sqlx::PgPool;

pub fn new_user(username: &str, role: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role: role.to_string(),
    }
}

pub async fn client(pool: &PgPool, username: &str) -> User {
    UserRepo::create(pool, &new_user(username, ROLE_CLIENT))
        .await
        .unwrap()
}

/// A provider-role user and the profile created alongside it.
pub async fn provider(pool: &PgPool, username: &str) -> (User, Provider) {
    let user = UserRepo::create(pool, &new_user(username, ROLE_PROVIDER))
        .await
        .unwrap();
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
) -> Provider {
    let (_, profile) = provider(pool, username).await;
    let update = UpdateProvider {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..Default::default()
    };
    ProviderRepo::update(pool, profile.id, &update)
        .await
        .unwrap()
        .unwrap()
}

/// A category with one subcategory; returns `(category_id, subcategory_id)`.
pub async fn taxonomy(pool: &PgPool, name: &str) -> (DbId, DbId) {
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

pub async fn service(pool: &PgPool, provider_id: DbId, subcategory_id: DbId, title: &str) -> DbId {
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
