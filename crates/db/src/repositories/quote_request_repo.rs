//! Repository for the `quote_requests` table.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::quote::{CreateQuoteRequest, QuoteRequest, QuoteScope};

const COLUMNS: &str = "id, client_id, provider_id, service_id, subject, budget, description, \
                       status, created_at, updated_at";

const SCOPE_WHERE: &str = "\
    WHERE ($1::bigint IS NULL OR provider_id = $1) \
      AND ($2::bigint IS NULL OR client_id = $2)";

/// Provides quote request CRUD.
pub struct QuoteRequestRepo;

impl QuoteRequestRepo {
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateQuoteRequest,
    ) -> Result<QuoteRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO quote_requests
                (client_id, provider_id, service_id, subject, budget, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteRequest>(&query)
            .bind(client_id)
            .bind(input.provider_id)
            .bind(input.service_id)
            .bind(&input.subject)
            .bind(input.budget)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuoteRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quote_requests WHERE id = $1");
        sqlx::query_as::<_, QuoteRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        scope: QuoteScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuoteRequest>, sqlx::Error> {
        let (provider_id, client_id) = scope_binds(scope);
        let query = format!(
            "SELECT {COLUMNS} FROM quote_requests {SCOPE_WHERE}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, QuoteRequest>(&query)
            .bind(provider_id)
            .bind(client_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, scope: QuoteScope) -> Result<i64, sqlx::Error> {
        let (provider_id, client_id) = scope_binds(scope);
        let query = format!("SELECT COUNT(*) FROM quote_requests {SCOPE_WHERE}");
        sqlx::query_scalar(&query)
            .bind(provider_id)
            .bind(client_id)
            .fetch_one(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<QuoteRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE quote_requests SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

fn scope_binds(scope: QuoteScope) -> (Option<DbId>, Option<DbId>) {
    match scope {
        QuoteScope::All => (None, None),
        QuoteScope::ReceivedBy { provider_id } => (Some(provider_id), None),
        QuoteScope::SentBy { client_id } => (None, Some(client_id)),
    }
}
