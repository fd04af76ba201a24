//! Repository for the `favorites` table.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::{Favorite, ToggleOutcome};

const COLUMNS: &str = "id, user_id, provider_id, created_at, updated_at";

/// Provides favorite toggling and listing.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Remove the favorite if present, otherwise add it.
    ///
    /// The insert tolerates a concurrent toggle that already added the row.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        provider_id: DbId,
    ) -> Result<ToggleOutcome, sqlx::Error> {
        let removed = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND provider_id = $2")
            .bind(user_id)
            .bind(provider_id)
            .execute(pool)
            .await?;
        if removed.rows_affected() > 0 {
            return Ok(ToggleOutcome::Removed);
        }

        sqlx::query(
            "INSERT INTO favorites (user_id, provider_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorites_user_provider DO NOTHING",
        )
        .bind(user_id)
        .bind(provider_id)
        .execute(pool)
        .await?;
        Ok(ToggleOutcome::Added)
    }

    /// A user's favorites, most recent first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn exists(
        pool: &PgPool,
        user_id: DbId,
        provider_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND provider_id = $2)",
        )
        .bind(user_id)
        .bind(provider_id)
        .fetch_one(pool)
        .await
    }
}
