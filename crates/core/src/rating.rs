//! Review sub-rating validation and rating aggregation.
//!
//! A review carries three integer sub-ratings in `[1, 5]`. Its
//! `overall_rating` is always derived from them, never client-supplied, and a
//! provider's cached `avg_rating` is the mean of its reviews' overall ratings
//! (or `0` with no reviews).

use crate::error::CoreError;

/// Lowest accepted sub-rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted sub-rating.
pub const MAX_RATING: i32 = 5;

/// Maximum length for a review comment.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Validated quality / punctuality / value ratings for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRatings {
    quality: i32,
    punctuality: i32,
    value: i32,
}

impl SubRatings {
    /// Validate all three sub-ratings. The first out-of-range field is reported.
    pub fn new(quality: i32, punctuality: i32, value: i32) -> Result<Self, CoreError> {
        validate_rating("quality_rating", quality)?;
        validate_rating("punctuality_rating", punctuality)?;
        validate_rating("value_rating", value)?;
        Ok(Self {
            quality,
            punctuality,
            value,
        })
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    pub fn punctuality(&self) -> i32 {
        self.punctuality
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// `(quality + punctuality + value) / 3` with floating division.
    pub fn overall(&self) -> f64 {
        f64::from(self.quality + self.punctuality + self.value) / 3.0
    }
}

/// Validate a single sub-rating against the closed range `[1, 5]`.
pub fn validate_rating(field: &str, value: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )))
    }
}

/// Validate a review comment: non-blank and within the length limit.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    if comment.trim().is_empty() {
        return Err(CoreError::Validation("comment must not be empty".to_string()));
    }
    if comment.len() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}
