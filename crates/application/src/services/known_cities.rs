//! Offline centroids of major cities
//!
//! Last resort of the reverse-geocoding chain before a placeholder name is
//! synthesized.

use domain::{GeoLocation, Place};

/// A city centroid with its matching radius in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownCity {
    pub name: &'static str,
    pub country_code: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_deg: f64,
}

impl KnownCity {
    const fn new(
        name: &'static str,
        country_code: &'static str,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Self {
        Self {
            name,
            country_code,
            latitude,
            longitude,
            radius_deg,
        }
    }

    pub const fn centroid(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }

    /// Whether `location` lies strictly inside this city's radius
    pub fn contains(&self, location: &GeoLocation) -> bool {
        self.centroid().is_within_degrees(location, self.radius_deg)
    }

    /// Name this city at the requested coordinates
    pub fn place_at(&self, location: GeoLocation) -> Place {
        Place::new(self.name, self.country_code, location)
    }
}

pub static KNOWN_CITIES: [KnownCity; 8] = [
    KnownCity::new("New York", "US", 40.7128, -74.0060, 0.5),
    KnownCity::new("Los Angeles", "US", 34.0522, -118.2437, 0.5),
    KnownCity::new("Chicago", "US", 41.8781, -87.6298, 0.3),
    KnownCity::new("London", "GB", 51.5074, -0.1278, 0.3),
    KnownCity::new("Paris", "FR", 48.8566, 2.3522, 0.3),
    KnownCity::new("Tokyo", "JP", 35.6762, 139.6503, 0.5),
    KnownCity::new("Sydney", "AU", -33.8688, 151.2093, 0.3),
    KnownCity::new("Toronto", "CA", 43.6532, -79.3832, 0.3),
];

/// First table entry whose radius contains `location`
pub fn known_city_near(location: &GeoLocation) -> Option<&'static KnownCity> {
    KNOWN_CITIES.iter().find(|city| city.contains(location))
}
