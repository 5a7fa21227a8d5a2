//! Resolved place model for geographic coordinates and display name

use serde::{Deserialize, Serialize};

/// A geocoded destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedPlace {
    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,
    /// Canonical label reported by the geocoder, or the requested text
    pub display_name: String,
}

impl ResolvedPlace {
    /// Create a new place, rejecting out-of-range coordinates
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, display_name: String) -> Option<Self> {
        if !Self::is_valid_coordinate(latitude, longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
            display_name,
        })
    }

    /// Whether the pair lies within the WGS84 latitude/longitude ranges
    #[must_use]
    pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
        (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
