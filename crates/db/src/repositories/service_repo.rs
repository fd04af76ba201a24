//! Repository for the `provider_services` table.

use marketplace_core::service::DEFAULT_PRICE_TYPE;
use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, ProviderService, ServiceFilter, UpdateService};
use crate::repositories::ReviewRepo;

/// Column list for `provider_services` queries. `avg_rating` is derived per
/// read from the reviews scoped to the service.
const COLUMNS: &str = "\
    id, provider_id, subcategory_id, title, description, price, price_type, is_available, \
    (SELECT COALESCE(AVG(r.overall_rating), 0) FROM reviews r \
     WHERE r.service_id = provider_services.id) AS avg_rating, \
    created_at, updated_at";

const FILTER_WHERE: &str = "\
    WHERE ($1::bigint IS NULL OR provider_id = $1) \
      AND ($2::bigint IS NULL OR subcategory_id = $2) \
      AND ($3::bool IS NULL OR is_available = $3) \
      AND ($4::text IS NULL OR price_type = $4)";

/// Provides CRUD operations for provider services.
pub struct ServiceRepo;

impl ServiceRepo {
    pub async fn create(
        pool: &PgPool,
        provider_id: DbId,
        input: &CreateService,
    ) -> Result<ProviderService, sqlx::Error> {
        let query = format!(
            "INSERT INTO provider_services
                (provider_id, subcategory_id, title, description, price, price_type, is_available)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, $6, COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProviderService>(&query)
            .bind(provider_id)
            .bind(input.subcategory_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.price_type.as_deref().unwrap_or(DEFAULT_PRICE_TYPE))
            .bind(input.is_available)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProviderService>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM provider_services WHERE id = $1");
        sqlx::query_as::<_, ProviderService>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ServiceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProviderService>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM provider_services {FILTER_WHERE} \
             ORDER BY id LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, ProviderService>(&query)
            .bind(filter.provider_id)
            .bind(filter.subcategory)
            .bind(filter.is_available)
            .bind(&filter.price_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ServiceFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM provider_services {FILTER_WHERE}");
        sqlx::query_scalar(&query)
            .bind(filter.provider_id)
            .bind(filter.subcategory)
            .bind(filter.is_available)
            .bind(&filter.price_type)
            .fetch_one(pool)
            .await
    }

    /// Every service of one provider, for the provider detail view.
    pub async fn list_for_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Vec<ProviderService>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM provider_services WHERE provider_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProviderService>(&query)
            .bind(provider_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<ProviderService>, sqlx::Error> {
        let query = format!(
            "UPDATE provider_services SET
                subcategory_id = COALESCE($2, subcategory_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                price_type = COALESCE($6, price_type),
                is_available = COALESCE($7, is_available)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProviderService>(&query)
            .bind(id)
            .bind(input.subcategory_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.price_type)
            .bind(input.is_available)
            .fetch_optional(pool)
            .await
    }

    /// Delete a service. Its reviews cascade with it, so the owning
    /// provider's average is recomputed before commit.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let provider_ids: Vec<DbId> =
            sqlx::query_scalar("SELECT provider_id FROM provider_services WHERE id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        ReviewRepo::lock_providers(&mut tx, &provider_ids).await?;

        let result = sqlx::query("DELETE FROM provider_services WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        ReviewRepo::refresh_averages(&mut tx, &provider_ids).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
