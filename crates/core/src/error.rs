//! Domain error kinds shared by every layer.
//!
//! The HTTP layer maps each variant to a status code; see `AppError` in the
//! api crate.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed parameter, out-of-range rating, self-referential
    /// conversation start.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No usable viewer identity on the request.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity is known but not allowed: non-participant, wrong role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A required query or body parameter was absent.
    pub fn missing_param(name: &str) -> Self {
        CoreError::Validation(format!("{name} parameter is required"))
    }

    /// The caller needs a provider profile for this operation.
    pub fn not_a_provider() -> Self {
        CoreError::Validation("You are not a provider".to_string())
    }
}
