//! Handlers for the `/categories` and `/subcategories` resources.
//!
//! Reads are public; writes require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use marketplace_core::error::CoreError;
use marketplace_core::types::DbId;
use marketplace_db::models::category::{
    Category, CreateCategory, CreateSubcategory, Subcategory, UpdateCategory, UpdateSubcategory,
};
use marketplace_db::repositories::{CategoryRepo, SubcategoryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query parameters for `GET /categories`.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub search: Option<String>,
}

/// Query parameters for `GET /subcategories`.
#[derive(Debug, Deserialize)]
pub struct SubcategoryQuery {
    /// Restrict to one parent category.
    pub category: Option<DbId>,
    pub search: Option<String>,
}

fn require_name(name: Option<&str>) -> Result<(), CoreError> {
    match name {
        Some(n) if n.trim().is_empty() => Err(CoreError::Validation(
            "name must not be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool, params.search.as_deref()).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// POST /api/v1/categories
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    require_name(Some(&input.name))?;
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, user_id = admin.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    require_name(input.name.as_deref())?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, user_id = admin.user_id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(category_id = id, user_id = admin.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Subcategories
// ---------------------------------------------------------------------------

/// GET /api/v1/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    Query(params): Query<SubcategoryQuery>,
) -> AppResult<Json<Vec<Subcategory>>> {
    let subcategories =
        SubcategoryRepo::list(&state.pool, params.category, params.search.as_deref()).await?;
    Ok(Json(subcategories))
}

/// GET /api/v1/subcategories/{id}
pub async fn get_subcategory(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subcategory>> {
    let subcategory = SubcategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;
    Ok(Json(subcategory))
}

/// POST /api/v1/subcategories
pub async fn create_subcategory(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSubcategory>,
) -> AppResult<(StatusCode, Json<Subcategory>)> {
    require_name(Some(&input.name))?;
    let subcategory = SubcategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        subcategory_id = subcategory.id,
        category_id = subcategory.category_id,
        user_id = admin.user_id,
        "Subcategory created"
    );
    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// PUT /api/v1/subcategories/{id}
pub async fn update_subcategory(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubcategory>,
) -> AppResult<Json<Subcategory>> {
    require_name(input.name.as_deref())?;
    let subcategory = SubcategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }))?;

    tracing::info!(subcategory_id = id, user_id = admin.user_id, "Subcategory updated");
    Ok(Json(subcategory))
}

/// DELETE /api/v1/subcategories/{id}
pub async fn delete_subcategory(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubcategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subcategory",
            id,
        }));
    }

    tracing::info!(subcategory_id = id, user_id = admin.user_id, "Subcategory deleted");
    Ok(StatusCode::NO_CONTENT)
}
