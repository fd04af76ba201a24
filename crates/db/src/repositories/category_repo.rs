//! Repository for the `categories` table.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::repositories::ReviewRepo;

const COLUMNS: &str = "id, name, description, icon, image_url, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, icon, image_url)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories by name, optionally narrowed by a substring over
    /// name and description.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(search.map(|s| format!("%{s}%")))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                icon = COALESCE($4, icon),
                image_url = COALESCE($5, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category and, by cascade, its subcategories, their services
    /// and those services' reviews. Affected provider averages are recomputed
    /// before commit.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let provider_ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT DISTINCT s.provider_id
             FROM provider_services s
             JOIN subcategories sc ON sc.id = s.subcategory_id
             WHERE sc.category_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        ReviewRepo::lock_providers(&mut tx, &provider_ids).await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ReviewRepo::refresh_averages(&mut tx, &provider_ids).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
