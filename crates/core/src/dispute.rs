//! Dispute status vocabulary.
//!
//! Disputes are opened by a client against a provider. Only staff move them
//! between statuses; any valid status may follow any other.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const DISPUTE_STATUS_OPEN: &str = "open";
pub const DISPUTE_STATUS_UNDER_REVIEW: &str = "under_review";
pub const DISPUTE_STATUS_RESOLVED: &str = "resolved";
pub const DISPUTE_STATUS_CLOSED: &str = "closed";

pub const VALID_DISPUTE_STATUSES: &[&str] = &[
    DISPUTE_STATUS_OPEN,
    DISPUTE_STATUS_UNDER_REVIEW,
    DISPUTE_STATUS_RESOLVED,
    DISPUTE_STATUS_CLOSED,
];

pub const MAX_DISPUTE_TITLE_LENGTH: usize = 100;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate a status supplied to the staff status-update action.
///
/// Absent and unknown values share one message, matching what callers see
/// for both cases.
pub fn validate_dispute_status(status: Option<&str>) -> Result<&str, CoreError> {
    match status {
        Some(s) if VALID_DISPUTE_STATUSES.contains(&s) => Ok(s),
        _ => Err(CoreError::Validation(format!(
            "Valid status is required. Must be one of: {}",
            VALID_DISPUTE_STATUSES.join(", ")
        ))),
    }
}

pub fn validate_dispute_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_DISPUTE_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title exceeds maximum length of {MAX_DISPUTE_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Evidence needs both a description and a file reference.
pub fn validate_evidence(description: Option<&str>, file: Option<&str>) -> Result<(), CoreError> {
    let has_description = description.is_some_and(|d| !d.trim().is_empty());
    let has_file = file.is_some_and(|f| !f.trim().is_empty());
    if !has_description || !has_file {
        return Err(CoreError::Validation(
            "Description and file are required".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_accepted() {
        for s in VALID_DISPUTE_STATUSES {
            assert_eq!(validate_dispute_status(Some(s)).unwrap(), *s);
        }
    }

    #[test]
    fn missing_or_unknown_status_rejected() {
        assert!(validate_dispute_status(None).is_err());
        assert!(validate_dispute_status(Some("escalated")).is_err());
    }

    #[test]
    fn evidence_requires_both_fields() {
        assert!(validate_evidence(Some("photo of damage"), Some("uploads/a.jpg")).is_ok());
        assert!(validate_evidence(Some("photo"), None).is_err());
        assert!(validate_evidence(None, Some("uploads/a.jpg")).is_err());
        assert!(validate_evidence(Some(" "), Some("uploads/a.jpg")).is_err());
    }
}
