//! Repository for the `reports` table.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

const COLUMNS: &str = "id, reporter_id, reported_user_id, reported_provider_id, \
                       reported_review_id, type, reason, status, admin_notes, \
                       created_at, updated_at";

/// Provides report filing and moderation.
pub struct ReportRepo;

impl ReportRepo {
    pub async fn create(
        pool: &PgPool,
        reporter_id: DbId,
        input: &CreateReport,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports
                (reporter_id, reported_user_id, reported_provider_id, reported_review_id,
                 type, reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reporter_id)
            .bind(input.reported_user_id)
            .bind(input.reported_provider_id)
            .bind(input.reported_review_id)
            .bind(&input.kind)
            .bind(&input.reason)
            .fetch_one(pool)
            .await
    }

    /// Reports filed by `reporter_id`, or every report when `None`.
    pub async fn list(
        pool: &PgPool,
        reporter_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ($1::bigint IS NULL OR reporter_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reporter_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, reporter_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports WHERE ($1::bigint IS NULL OR reporter_id = $1)",
        )
        .bind(reporter_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        admin_notes: &str,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = $2, admin_notes = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(status)
            .bind(admin_notes)
            .fetch_optional(pool)
            .await
    }
}
