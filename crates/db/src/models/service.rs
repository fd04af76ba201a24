//! Provider service models and DTOs.

use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `provider_services` with its read-time review average.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProviderService {
    pub id: DbId,
    pub provider_id: DbId,
    pub subcategory_id: DbId,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub price_type: String,
    pub is_available: bool,
    /// Mean `overall_rating` of reviews scoped to this service.
    pub avg_rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub subcategory_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub subcategory_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<String>,
    pub is_available: Option<bool>,
}

/// Equality filters for the public service listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceFilter {
    pub provider_id: Option<DbId>,
    pub subcategory: Option<DbId>,
    pub is_available: Option<bool>,
    pub price_type: Option<String>,
}
