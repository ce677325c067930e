//! Geographic location type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

impl Location {
    /// Create a location from longitude and latitude in degrees
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components are within their geographic ranges.
    ///
    /// NaN fails the range checks and is therefore invalid.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_locations() {
        assert!(Location::new(0.0, 0.0).is_valid());
        assert!(Location::new(180.0, 90.0).is_valid());
        assert!(Location::new(-180.0, -90.0).is_valid());
    }

    #[test]
    fn test_invalid_locations() {
        assert!(!Location::new(180.5, 0.0).is_valid());
        assert!(!Location::new(0.0, -90.1).is_valid());
        assert!(!Location::new(f64::NAN, 0.0).is_valid());
        assert!(!Location::new(0.0, f64::INFINITY).is_valid());
    }
}
