//! Repository for the `subcategories` table.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{CreateSubcategory, Subcategory, UpdateSubcategory};
use crate::repositories::ReviewRepo;

const COLUMNS: &str = "id, category_id, name, description, icon, created_at, updated_at";

/// Provides CRUD operations for subcategories.
pub struct SubcategoryRepo;

impl SubcategoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubcategory,
    ) -> Result<Subcategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO subcategories (category_id, name, description, icon)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subcategories WHERE id = $1");
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List subcategories, optionally restricted to one category and/or a
    /// substring over name and description.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
        search: Option<&str>,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subcategories
             WHERE ($1::bigint IS NULL OR category_id = $1)
               AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(category_id)
            .bind(search.map(|s| format!("%{s}%")))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubcategory,
    ) -> Result<Option<Subcategory>, sqlx::Error> {
        let query = format!(
            "UPDATE subcategories SET
                category_id = COALESCE($2, category_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                icon = COALESCE($5, icon)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subcategory and, by cascade, its services and their reviews.
    /// Every provider that offered one of those services gets its average
    /// recomputed in the same transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let provider_ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT DISTINCT provider_id FROM provider_services WHERE subcategory_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        ReviewRepo::lock_providers(&mut tx, &provider_ids).await?;

        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ReviewRepo::refresh_averages(&mut tx, &provider_ids).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
