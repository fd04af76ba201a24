//! Repository for the `disputes` and `dispute_evidence` tables.

use marketplace_core::types::DbId;
use sqlx::PgPool;

use crate::models::dispute::{CreateDispute, Dispute, DisputeEvidence, DisputeScope};

const COLUMNS: &str = "id, client_id, provider_id, service_id, title, description, status, \
                       resolution_note, created_at, updated_at";

const EVIDENCE_COLUMNS: &str = "id, dispute_id, user_id, description, file, created_at";

const SCOPE_WHERE: &str = "\
    WHERE ($1::bigint IS NULL OR provider_id = $1) \
      AND ($2::bigint IS NULL OR client_id = $2)";

/// Provides dispute CRUD and evidence management.
pub struct DisputeRepo;

impl DisputeRepo {
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateDispute,
    ) -> Result<Dispute, sqlx::Error> {
        let query = format!(
            "INSERT INTO disputes (client_id, provider_id, service_id, title, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(client_id)
            .bind(input.provider_id)
            .bind(input.service_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dispute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disputes WHERE id = $1");
        sqlx::query_as::<_, Dispute>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Disputes visible under `scope`, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: DisputeScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Dispute>, sqlx::Error> {
        let (provider_id, client_id) = scope_binds(scope);
        let query = format!(
            "SELECT {COLUMNS} FROM disputes {SCOPE_WHERE}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(provider_id)
            .bind(client_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, scope: DisputeScope) -> Result<i64, sqlx::Error> {
        let (provider_id, client_id) = scope_binds(scope);
        let query = format!("SELECT COUNT(*) FROM disputes {SCOPE_WHERE}");
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
        resolution_note: &str,
    ) -> Result<Option<Dispute>, sqlx::Error> {
        let query = format!(
            "UPDATE disputes SET status = $2, resolution_note = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dispute>(&query)
            .bind(id)
            .bind(status)
            .bind(resolution_note)
            .fetch_optional(pool)
            .await
    }

    pub async fn add_evidence(
        pool: &PgPool,
        dispute_id: DbId,
        user_id: DbId,
        description: &str,
        file: &str,
    ) -> Result<DisputeEvidence, sqlx::Error> {
        let query = format!(
            "INSERT INTO dispute_evidence (dispute_id, user_id, description, file)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVIDENCE_COLUMNS}"
        );
        sqlx::query_as::<_, DisputeEvidence>(&query)
            .bind(dispute_id)
            .bind(user_id)
            .bind(description)
            .bind(file)
            .fetch_one(pool)
            .await
    }

    pub async fn list_evidence(
        pool: &PgPool,
        dispute_id: DbId,
    ) -> Result<Vec<DisputeEvidence>, sqlx::Error> {
        let query = format!(
            "SELECT {EVIDENCE_COLUMNS} FROM dispute_evidence WHERE dispute_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, DisputeEvidence>(&query)
            .bind(dispute_id)
            .fetch_all(pool)
            .await
    }
}

/// `(provider_id, client_id)` filter values for a scope.
fn scope_binds(scope: DisputeScope) -> (Option<DbId>, Option<DbId>) {
    match scope {
        DisputeScope::All => (None, None),
        DisputeScope::ReceivedBy { provider_id } => (Some(provider_id), None),
        DisputeScope::OpenedBy { client_id } => (None, Some(client_id)),
    }
}
