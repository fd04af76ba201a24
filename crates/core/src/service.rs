//! Provider service listing rules.

use crate::error::CoreError;

pub const PRICE_TYPE_FIXED: &str = "fixed";
pub const PRICE_TYPE_HOURLY: &str = "hourly";
pub const PRICE_TYPE_DAILY: &str = "daily";
pub const PRICE_TYPE_NEGOTIABLE: &str = "negotiable";
pub const PRICE_TYPE_QUOTE: &str = "quote";

/// Price type used when the provider does not pick one.
pub const DEFAULT_PRICE_TYPE: &str = PRICE_TYPE_QUOTE;

pub const VALID_PRICE_TYPES: &[&str] = &[
    PRICE_TYPE_FIXED,
    PRICE_TYPE_HOURLY,
    PRICE_TYPE_DAILY,
    PRICE_TYPE_NEGOTIABLE,
    PRICE_TYPE_QUOTE,
];

pub const MAX_TITLE_LENGTH: usize = 100;

pub fn validate_price_type(price_type: &str) -> Result<(), CoreError> {
    if VALID_PRICE_TYPES.contains(&price_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid price_type '{price_type}'. Must be one of: {}",
            VALID_PRICE_TYPES.join(", ")
        )))
    }
}

/// Prices are optional but never negative.
pub fn validate_price(price: Option<f64>) -> Result<(), CoreError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(CoreError::Validation(format!(
            "price must be a non-negative number, got {p}"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_price_types_accepted() {
        for t in VALID_PRICE_TYPES {
            assert!(validate_price_type(t).is_ok());
        }
        assert!(validate_price_type("free").is_err());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(validate_price(None).is_ok());
        assert!(validate_price(Some(0.0)).is_ok());
        assert!(validate_price(Some(-1.0)).is_err());
        assert!(validate_price(Some(f64::NAN)).is_err());
    }

    #[test]
    fn title_bounds() {
        assert!(validate_title("Plumbing").is_ok());
        assert!(validate_title(" ").is_err());
        assert!(validate_title(&"t".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }
}
