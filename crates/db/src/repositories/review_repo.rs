//! Repository for the `reviews` table.
//!
//! Writing a review and refreshing the provider's cached `avg_rating` happen
//! in one transaction. The provider row is locked first so concurrent reviews
//! for the same provider serialize, and each recompute reads the complete
//! committed review set. Deletes that cascade into `reviews` (services,
//! subcategories, categories) use the same lock-then-refresh helpers.

use marketplace_core::rating::SubRatings;
use marketplace_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::review::{Review, ReviewFilter};

const COLUMNS: &str = "id, client_id, provider_id, service_id, quality_rating, \
                       punctuality_rating, value_rating, overall_rating, comment, \
                       is_verified, created_at, updated_at";

/// Provides review creation and listing.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review and recompute the provider's average rating.
    ///
    /// Returns `None` without writing anything if the provider does not exist.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        provider_id: DbId,
        service_id: Option<DbId>,
        ratings: SubRatings,
        comment: &str,
    ) -> Result<Option<Review>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::lock_providers(&mut tx, &[provider_id]).await?.is_empty() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO reviews
                (client_id, provider_id, service_id, quality_rating, punctuality_rating,
                 value_rating, overall_rating, comment)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(client_id)
            .bind(provider_id)
            .bind(service_id)
            .bind(ratings.quality())
            .bind(ratings.punctuality())
            .bind(ratings.value())
            .bind(ratings.overall())
            .bind(comment)
            .fetch_one(&mut *tx)
            .await?;

        Self::refresh_averages(&mut tx, &[provider_id]).await?;

        tx.commit().await?;
        Ok(Some(review))
    }

    /// Lock provider rows in id order, returning the ids that exist.
    ///
    /// Every write that adds or removes reviews takes these locks before
    /// touching `reviews`.
    pub(crate) async fn lock_providers(
        tx: &mut Transaction<'_, Postgres>,
        provider_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM providers WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(provider_ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Recompute `avg_rating` for each provider from its full review set.
    pub(crate) async fn refresh_averages(
        tx: &mut Transaction<'_, Postgres>,
        provider_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE providers p
             SET avg_rating = COALESCE(
                 (SELECT AVG(r.overall_rating) FROM reviews r WHERE r.provider_id = p.id), 0)
             WHERE p.id = ANY($1)",
        )
        .bind(provider_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Reviews matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ReviewFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE ($1::bigint IS NULL OR provider_id = $1)
               AND ($2::bigint IS NULL OR service_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(filter.provider)
            .bind(filter.service)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ReviewFilter) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews
             WHERE ($1::bigint IS NULL OR provider_id = $1)
               AND ($2::bigint IS NULL OR service_id = $2)",
        )
        .bind(filter.provider)
        .bind(filter.service)
        .fetch_one(pool)
        .await
    }

    /// Reviews written by one client, newest first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE client_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(client_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_client(pool: &PgPool, client_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(pool)
            .await
    }
}
