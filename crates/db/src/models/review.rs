//! Review model and DTOs.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub client_id: DbId,
    pub provider_id: DbId,
    pub service_id: Option<DbId>,
    pub quality_rating: i32,
    pub punctuality_rating: i32,
    pub value_rating: i32,
    /// Derived from the three sub-ratings at write time.
    pub overall_rating: f64,
    pub comment: String,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Review payload as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub provider_id: DbId,
    pub service_id: Option<DbId>,
    pub quality_rating: i32,
    pub punctuality_rating: i32,
    pub value_rating: i32,
    pub comment: String,
}

/// Filters for the public review listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewFilter {
    pub provider: Option<DbId>,
    pub service: Option<DbId>,
}
