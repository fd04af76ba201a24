//! Quote request status vocabulary and validation.

use crate::error::CoreError;

pub const QUOTE_STATUS_PENDING: &str = "pending";
pub const QUOTE_STATUS_ACCEPTED: &str = "accepted";
pub const QUOTE_STATUS_REJECTED: &str = "rejected";
pub const QUOTE_STATUS_COMPLETED: &str = "completed";

pub const VALID_QUOTE_STATUSES: &[&str] = &[
    QUOTE_STATUS_PENDING,
    QUOTE_STATUS_ACCEPTED,
    QUOTE_STATUS_REJECTED,
    QUOTE_STATUS_COMPLETED,
];

pub const MAX_SUBJECT_LENGTH: usize = 200;

pub fn validate_quote_status(status: &str) -> Result<(), CoreError> {
    if VALID_QUOTE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid quote status '{status}'. Must be one of: {}",
            VALID_QUOTE_STATUSES.join(", ")
        )))
    }
}

pub fn validate_budget(budget: f64) -> Result<(), CoreError> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(CoreError::Validation(format!(
            "budget must be a non-negative number, got {budget}"
        )));
    }
    Ok(())
}

pub fn validate_subject(subject: &str) -> Result<(), CoreError> {
    if subject.trim().is_empty() {
        return Err(CoreError::Validation("subject must not be empty".to_string()));
    }
    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        return Err(CoreError::Validation(format!(
            "subject exceeds maximum length of {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}
