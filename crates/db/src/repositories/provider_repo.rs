//! Repository for the `providers` table.
//!
//! Besides plain profile reads and writes this owns the two discovery query
//! shapes: taxonomy filters (distinct providers with a matching service) and
//! the bounding-box prefilter that feeds proximity ranking.

use marketplace_core::geo::BoundingBox;
use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::provider::{
    Provider, ProviderFilter, ProviderLocation, ProviderSummary, UpdateProvider,
};

/// Column list for `providers` queries.
const COLUMNS: &str = "id, user_id, company_name, address, latitude, longitude, avg_rating, \
                       trust_score, is_verified, is_featured, created_at, updated_at";

/// Summary projection. Expects to be followed by a `WHERE` clause.
const SUMMARY_SELECT: &str = "\
    SELECT p.id, p.user_id, u.username, \
           TRIM(CONCAT(u.first_name, ' ', u.last_name)) AS full_name, \
           p.company_name, p.avg_rating, p.trust_score, p.is_verified, p.is_featured, \
           (SELECT COUNT(*) FROM provider_services s \
             WHERE s.provider_id = p.id) AS services_count, \
           (SELECT COUNT(*) FROM reviews r WHERE r.provider_id = p.id) AS reviews_count, \
           p.address, p.latitude, p.longitude \
    FROM providers p \
    JOIN users u ON u.id = p.user_id";

/// Listing filter shared by `list` and `count`.
const FILTER_WHERE: &str = "\
    WHERE ($1::bool IS NULL OR p.is_verified = $1) \
      AND ($2::bool IS NULL OR p.is_featured = $2) \
      AND ($3::text IS NULL \
           OR u.username ILIKE $3 OR u.first_name ILIKE $3 \
           OR u.last_name ILIKE $3 OR p.company_name ILIKE $3)";

/// Providers with at least one service under a category. `EXISTS` keeps
/// each provider once no matter how many services match.
const BY_CATEGORY_WHERE: &str = "\
    WHERE EXISTS ( \
        SELECT 1 FROM provider_services s \
        JOIN subcategories sc ON sc.id = s.subcategory_id \
        WHERE s.provider_id = p.id AND sc.category_id = $1)";

const BY_SUBCATEGORY_WHERE: &str = "\
    WHERE EXISTS ( \
        SELECT 1 FROM provider_services s \
        WHERE s.provider_id = p.id AND s.subcategory_id = $1)";

/// Provides read and update operations for provider profiles.
pub struct ProviderRepo;

impl ProviderRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The provider profile owned by a user, if they have one.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE user_id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProviderSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, ProviderSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Summaries for a set of ids, in ascending id order. Callers that need a
    /// different order re-sort by id.
    pub async fn summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ProviderSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{SUMMARY_SELECT} WHERE p.id = ANY($1) ORDER BY p.id");
        sqlx::query_as::<_, ProviderSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // General listing
    // -----------------------------------------------------------------------

    pub async fn list(
        pool: &PgPool,
        filter: &ProviderFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProviderSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} {FILTER_WHERE} ORDER BY p.id LIMIT $4 OFFSET $5");
        sqlx::query_as::<_, ProviderSummary>(&query)
            .bind(filter.is_verified)
            .bind(filter.is_featured)
            .bind(search_pattern(filter.search.as_deref()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ProviderFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM providers p JOIN users u ON u.id = p.user_id {FILTER_WHERE}"
        );
        sqlx::query_scalar(&query)
            .bind(filter.is_verified)
            .bind(filter.is_featured)
            .bind(search_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Taxonomy filters
    // -----------------------------------------------------------------------

    /// Distinct providers offering at least one service in `category_id`.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProviderSummary>, sqlx::Error> {
        let query =
            format!("{SUMMARY_SELECT} {BY_CATEGORY_WHERE} ORDER BY p.id LIMIT $2 OFFSET $3");
        sqlx::query_as::<_, ProviderSummary>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_category(pool: &PgPool, category_id: DbId) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM providers p {BY_CATEGORY_WHERE}");
        sqlx::query_scalar(&query)
            .bind(category_id)
            .fetch_one(pool)
            .await
    }

    /// Distinct providers offering at least one service in `subcategory_id`.
    pub async fn list_by_subcategory(
        pool: &PgPool,
        subcategory_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProviderSummary>, sqlx::Error> {
        let query =
            format!("{SUMMARY_SELECT} {BY_SUBCATEGORY_WHERE} ORDER BY p.id LIMIT $2 OFFSET $3");
        sqlx::query_as::<_, ProviderSummary>(&query)
            .bind(subcategory_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_subcategory(
        pool: &PgPool,
        subcategory_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM providers p {BY_SUBCATEGORY_WHERE}");
        sqlx::query_scalar(&query)
            .bind(subcategory_id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Proximity prefilter
    // -----------------------------------------------------------------------

    /// Located providers inside `bbox` (inclusive), in ascending id order.
    ///
    /// Providers missing either coordinate never match.
    pub async fn locations_in_box(
        pool: &PgPool,
        bbox: &BoundingBox,
    ) -> Result<Vec<ProviderLocation>, sqlx::Error> {
        sqlx::query_as::<_, ProviderLocation>(
            "SELECT id, latitude, longitude FROM providers
             WHERE latitude IS NOT NULL AND longitude IS NOT NULL
               AND latitude BETWEEN $1 AND $2
               AND longitude BETWEEN $3 AND $4
             ORDER BY id",
        )
        .bind(bbox.min_latitude)
        .bind(bbox.max_latitude)
        .bind(bbox.min_longitude)
        .bind(bbox.max_longitude)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Profile updates
    // -----------------------------------------------------------------------

    /// Update the owner-editable fields. `None` keeps the current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProvider,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!(
            "UPDATE providers SET
                company_name = COALESCE($2, company_name),
                address = COALESCE($3, address),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .bind(&input.company_name)
            .bind(&input.address)
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_optional(pool)
            .await
    }
}

fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"))
}
