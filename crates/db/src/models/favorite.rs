//! Favorite model.

use marketplace_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub provider_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Outcome of toggling a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
}
