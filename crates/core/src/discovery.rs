//! Parameter parsing for provider discovery queries.
//!
//! Query-string values arrive as raw strings so that "absent" and
//! "non-numeric" can both be reported as validation errors before any query
//! runs.

use crate::error::CoreError;
use crate::geo::{GeoPoint, DEFAULT_RADIUS_KM};
use crate::types::DbId;

/// Parse a required integer id parameter such as `category_id`.
pub fn require_id(name: &str, raw: Option<&str>) -> Result<DbId, CoreError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::missing_param(name))?;

    raw.parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("{name} must be an integer, got '{raw}'")))
}

/// A validated nearby-search request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl NearbyQuery {
    /// Validate raw `latitude`, `longitude` and optional `radius` values.
    ///
    /// A blank or absent radius falls back to [`DEFAULT_RADIUS_KM`].
    pub fn parse(
        latitude: Option<&str>,
        longitude: Option<&str>,
        radius: Option<&str>,
    ) -> Result<Self, CoreError> {
        let latitude = latitude.map(str::trim).filter(|s| !s.is_empty());
        let longitude = longitude.map(str::trim).filter(|s| !s.is_empty());

        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(CoreError::Validation(
                "latitude and longitude parameters are required".to_string(),
            ));
        };

        let latitude = parse_finite("latitude", latitude)?;
        let longitude = parse_finite("longitude", longitude)?;

        validate_coordinates(latitude, longitude)?;

        let radius_km = match radius.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_finite("radius", raw)?,
            None => DEFAULT_RADIUS_KM,
        };
        if radius_km <= 0.0 {
            return Err(CoreError::Validation(format!(
                "radius must be greater than 0, got {radius_km}"
            )));
        }

        Ok(Self {
            center: GeoPoint::new(latitude, longitude),
            radius_km,
        })
    }
}

/// Check that a coordinate pair is finite and within the valid degree ranges.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}

fn parse_finite(name: &str, raw: &str) -> Result<f64, CoreError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::Validation(format!("Invalid {name}: '{raw}' is not a number")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn require_id_accepts_integers() {
        assert_eq!(require_id("category_id", Some("42")).unwrap(), 42);
        assert_eq!(require_id("category_id", Some(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn require_id_rejects_missing() {
        assert_matches!(
            require_id("category_id", None),
            Err(CoreError::Validation(msg)) if msg == "category_id parameter is required"
        );
        assert_matches!(require_id("subcategory_id", Some("")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn require_id_rejects_garbage() {
        assert_matches!(require_id("category_id", Some("abc")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn nearby_defaults_radius_to_ten() {
        let q = NearbyQuery::parse(Some("38.0"), Some("-9.0"), None).unwrap();
        assert_eq!(q.radius_km, DEFAULT_RADIUS_KM);
        assert_eq!(q.center, GeoPoint::new(38.0, -9.0));
    }

    #[test]
    fn nearby_requires_both_coordinates() {
        assert!(NearbyQuery::parse(None, Some("1"), None).is_err());
        assert!(NearbyQuery::parse(Some("1"), None, None).is_err());
        assert!(NearbyQuery::parse(Some(""), Some("1"), None).is_err());
    }

    #[test]
    fn nearby_rejects_non_numeric() {
        assert_matches!(
            NearbyQuery::parse(Some("north"), Some("1"), None),
            Err(CoreError::Validation(_))
        );
        assert!(NearbyQuery::parse(Some("1"), Some("1"), Some("far")).is_err());
        assert!(NearbyQuery::parse(Some("NaN"), Some("1"), None).is_err());
        assert!(NearbyQuery::parse(Some("inf"), Some("1"), None).is_err());
    }

    #[test]
    fn nearby_rejects_out_of_range() {
        assert!(NearbyQuery::parse(Some("91"), Some("0"), None).is_err());
        assert!(NearbyQuery::parse(Some("0"), Some("-181"), None).is_err());
        assert!(NearbyQuery::parse(Some("0"), Some("0"), Some("0")).is_err());
        assert!(NearbyQuery::parse(Some("0"), Some("0"), Some("-3")).is_err());
    }

    #[test]
    fn coordinates_checked_against_degree_ranges() {
        assert!(validate_coordinates(-8.83, 13.23).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, 180.01).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn nearby_accepts_poles() {
        assert!(NearbyQuery::parse(Some("90"), Some("0"), Some("5")).is_ok());
    }
}
