//! Category and subcategory models and DTOs.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
}

/// A row from the `subcategories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategory {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubcategory {
    pub category_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubcategory {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}
