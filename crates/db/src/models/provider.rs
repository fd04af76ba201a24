//! Provider profile models.

use marketplace_core::geo::GeoPoint;
use marketplace_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `providers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    pub user_id: DbId,
    pub company_name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Mean `overall_rating` of all reviews, `0` without reviews.
    pub avg_rating: f64,
    pub trust_score: f64,
    pub is_verified: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Provider list entry joined with user display fields and counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProviderSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub full_name: String,
    pub company_name: String,
    pub avg_rating: f64,
    pub trust_score: f64,
    pub is_verified: bool,
    pub is_featured: bool,
    pub services_count: i64,
    pub reviews_count: i64,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Id and coordinates of a located provider, fed to proximity ranking.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ProviderLocation {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
}

impl ProviderLocation {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Filters for the general provider listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderFilter {
    pub is_verified: Option<bool>,
    pub is_featured: Option<bool>,
    /// Case-insensitive substring over username, names and company name.
    pub search: Option<String>,
}

/// DTO for a provider editing their own profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProvider {
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
