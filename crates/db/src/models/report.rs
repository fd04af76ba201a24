//! Report model and DTOs.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub reporter_id: DbId,
    pub reported_user_id: Option<DbId>,
    pub reported_provider_id: Option<DbId>,
    pub reported_review_id: Option<DbId>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
    pub status: String,
    pub admin_notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    #[serde(rename = "type")]
    pub kind: String,
    pub reported_user_id: Option<DbId>,
    pub reported_provider_id: Option<DbId>,
    pub reported_review_id: Option<DbId>,
    pub reason: String,
}
