//! Proximity search geometry.
//!
//! Nearby search is a two-phase operation:
//!
//! 1. A bounding-box prefilter around the query point. The latitude delta is
//!    `radius / 111` degrees; the longitude delta is
//!    `radius / (111 * cos(query_latitude))` degrees. The box is inclusive on
//!    every edge.
//! 2. A ranking of the box survivors. In [`DistanceMode::Planar`] (the legacy
//!    behaviour) survivors are ordered by squared planar distance in degrees
//!    and the box is the only filter. In [`DistanceMode::Haversine`] survivors
//!    are ordered by great-circle distance and anything beyond the radius is
//!    dropped.
//!
//! Both rankings are stable: ties keep candidate order.
//!
//! Near the poles `cos(latitude)` approaches zero and the longitude delta
//! grows without bound, so the box stops filtering by longitude. That is
//! accepted behaviour, not something to correct here.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Kilometres per degree of latitude used by the bounding-box prefilter.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Radius applied when the caller does not provide one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Mean Earth radius for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// How bounding-box survivors are ranked and cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMode {
    /// Squared planar distance in degrees, no cutoff beyond the box.
    #[default]
    Planar,
    /// Great-circle distance with a hard radius cutoff.
    Haversine,
}

impl DistanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMode::Planar => "planar",
            DistanceMode::Haversine => "haversine",
        }
    }
}

impl fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planar" => Ok(DistanceMode::Planar),
            "haversine" => Ok(DistanceMode::Haversine),
            other => Err(format!(
                "Unknown distance mode '{other}'. Expected 'planar' or 'haversine'"
            )),
        }
    }
}

/// Inclusive latitude/longitude rectangle approximating a search circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Build the prefilter box for a query point and radius.
    ///
    /// The longitude delta uses the query latitude, not each candidate's.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let lng_delta = radius_km / (KM_PER_DEGREE * center.latitude.to_radians().cos());

        Self {
            min_latitude: center.latitude - lat_delta,
            max_latitude: center.latitude + lat_delta,
            min_longitude: center.longitude - lng_delta,
            max_longitude: center.longitude + lng_delta,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }
}

/// Squared planar distance in degrees. Only meaningful for ordering.
pub fn planar_distance_sq(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = b.latitude - a.latitude;
    let d_lng = b.longitude - a.longitude;
    d_lat * d_lat + d_lng * d_lng
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` just past 1 for near-antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

/// A candidate that survived ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate<K> {
    pub key: K,
    pub location: GeoPoint,
    /// Great-circle distance from the query point, for display.
    pub distance_km: f64,
}

/// Filter candidates through the bounding box and order them by distance.
///
/// `candidates` should arrive in insertion order (ascending id); that order
/// breaks ties.
pub fn rank_nearby<K, I>(
    center: GeoPoint,
    radius_km: f64,
    mode: DistanceMode,
    candidates: I,
) -> Vec<RankedCandidate<K>>
where
    I: IntoIterator<Item = (K, GeoPoint)>,
{
    let bbox = BoundingBox::around(center, radius_km);

    let mut scored: Vec<(f64, RankedCandidate<K>)> = candidates
        .into_iter()
        .filter(|(_, location)| bbox.contains(*location))
        .filter_map(|(key, location)| {
            let distance_km = haversine_km(center, location);
            let score = match mode {
                DistanceMode::Planar => planar_distance_sq(center, location),
                DistanceMode::Haversine => {
                    if distance_km > radius_km {
                        return None;
                    }
                    distance_km
                }
            };
            Some((
                score,
                RankedCandidate {
                    key,
                    location,
                    distance_km,
                },
            ))
        })
        .collect();

    // `sort_by` is stable, so equal scores keep candidate order.
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, ranked)| ranked).collect()
}
