//! Quote request model and DTO.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quote_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteRequest {
    pub id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    pub service_id: Option<DbId>,
    pub subject: String,
    pub budget: f64,
    pub description: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteRequest {
    pub provider_id: DbId,
    pub service_id: Option<DbId>,
    pub subject: String,
    #[serde(default)]
    pub budget: f64,
    pub description: String,
}

/// Whose quote requests a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteScope {
    All,
    ReceivedBy { provider_id: DbId },
    SentBy { client_id: DbId },
}
