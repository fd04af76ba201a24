//! Dispute and evidence models and DTOs.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `disputes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dispute {
    pub id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    pub service_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub resolution_note: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDispute {
    pub provider_id: DbId,
    pub service_id: Option<DbId>,
    pub title: String,
    pub description: String,
}

/// A row from the `dispute_evidence` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DisputeEvidence {
    pub id: DbId,
    pub dispute_id: DbId,
    pub user_id: DbId,
    pub description: String,
    pub file: String,
    pub created_at: Timestamp,
}

/// Whose disputes a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisputeScope {
    All,
    ReceivedBy { provider_id: DbId },
    OpenedBy { client_id: DbId },
}
