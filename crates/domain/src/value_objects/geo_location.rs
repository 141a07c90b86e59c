//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A validated latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinates(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for compile-time constants)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Squared planar distance in degrees
    ///
    /// Cheap proximity measure used for matching against city centroids;
    /// not a geodesic distance.
    #[must_use]
    pub fn squared_degree_distance(&self, other: &Self) -> f64 {
        let d_lat = self.latitude - other.latitude;
        let d_lon = self.longitude - other.longitude;
        d_lat.mul_add(d_lat, d_lon * d_lon)
    }

    /// Whether `other` lies strictly within `radius_deg` degrees of this point
    #[must_use]
    pub fn is_within_degrees(&self, other: &Self, radius_deg: f64) -> bool {
        self.squared_degree_distance(other) < radius_deg * radius_deg
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Well-known locations
impl GeoLocation {
    /// London, UK (the pipeline's fallback location)
    #[must_use]
    pub const fn london() -> Self {
        Self::new_unchecked(51.5074, -0.1278)
    }

    /// New York, USA
    #[must_use]
    pub const fn new_york() -> Self {
        Self::new_unchecked(40.7128, -74.006)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(40.7128, -74.006).expect("valid coordinates");
        assert!((loc.latitude() - 40.7128).abs() < f64::EPSILON);
        assert!((loc.longitude() + 74.006).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 181.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_display_uses_four_decimals() {
        let loc = GeoLocation::new(51.50741, -0.12781).expect("valid");
        assert_eq!(loc.to_string(), "51.5074, -0.1278");
    }

    #[test]
    fn test_squared_degree_distance() {
        let a = GeoLocation::new_unchecked(0.0, 0.0);
        let b = GeoLocation::new_unchecked(0.3, 0.4);
        assert!((a.squared_degree_distance(&b) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_is_within_degrees_is_strict() {
        let centre = GeoLocation::new_unchecked(0.0, 0.0);
        let edge = GeoLocation::new_unchecked(0.3, 0.0);
        let inside = GeoLocation::new_unchecked(0.29, 0.0);
        assert!(!centre.is_within_degrees(&edge, 0.3));
        assert!(centre.is_within_degrees(&inside, 0.3));
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::new(48.8566, 2.3522).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        let deserialized: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, deserialized);
    }
}
