//! Abuse report vocabulary and target validation.
//!
//! A report's `type` names what is being reported, and the matching target
//! reference (`reported_user`, `reported_provider` or `reported_review`) must
//! be present.

use crate::error::CoreError;
use crate::types::DbId;

pub const REPORT_TYPE_PROVIDER: &str = "provider";
pub const REPORT_TYPE_REVIEW: &str = "review";
pub const REPORT_TYPE_USER: &str = "user";

pub const VALID_REPORT_TYPES: &[&str] =
    &[REPORT_TYPE_PROVIDER, REPORT_TYPE_REVIEW, REPORT_TYPE_USER];

pub const REPORT_STATUS_PENDING: &str = "pending";
pub const REPORT_STATUS_UNDER_REVIEW: &str = "under_review";
pub const REPORT_STATUS_RESOLVED: &str = "resolved";
pub const REPORT_STATUS_DISMISSED: &str = "dismissed";

pub const VALID_REPORT_STATUSES: &[&str] = &[
    REPORT_STATUS_PENDING,
    REPORT_STATUS_UNDER_REVIEW,
    REPORT_STATUS_RESOLVED,
    REPORT_STATUS_DISMISSED,
];

/// Validate a report type and that its target reference is set.
pub fn validate_report_target(
    report_type: &str,
    reported_user: Option<DbId>,
    reported_provider: Option<DbId>,
    reported_review: Option<DbId>,
) -> Result<(), CoreError> {
    let (field, target) = match report_type {
        REPORT_TYPE_PROVIDER => ("reported_provider", reported_provider),
        REPORT_TYPE_REVIEW => ("reported_review", reported_review),
        REPORT_TYPE_USER => ("reported_user", reported_user),
        other => {
            return Err(CoreError::Validation(format!(
                "Invalid report type '{other}'. Must be one of: {}",
                VALID_REPORT_TYPES.join(", ")
            )))
        }
    };

    if target.is_none() {
        return Err(CoreError::Validation(format!(
            "{field} is required for a '{report_type}' report"
        )));
    }
    Ok(())
}

pub fn validate_report_status(status: Option<&str>) -> Result<&str, CoreError> {
    match status {
        Some(s) if VALID_REPORT_STATUSES.contains(&s) => Ok(s),
        _ => Err(CoreError::Validation(format!(
            "Valid status is required. Must be one of: {}",
            VALID_REPORT_STATUSES.join(", ")
        ))),
    }
}

pub fn validate_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation("reason must not be empty".to_string()));
    }
    Ok(())
}
