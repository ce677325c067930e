//! Projection helpers for Web Mercator (EPSG:3857)
//!
//! Everything the tile arithmetic needs from the projection: the maximum
//! coordinate of the square world extent, the WGS84 <-> Web Mercator transforms
//! and the validity predicates for projected coordinates.

use crate::Location;
use geo::Point;

/// Web Mercator bounds in meters (EPSG:3857)
pub const EARTH_MERCATOR_MAX: f64 = 20037508.34;
pub const EARTH_MERCATOR_MIN: f64 = -EARTH_MERCATOR_MAX;
pub const EARTH_SIZE_METERS: f64 = EARTH_MERCATOR_MAX - EARTH_MERCATOR_MIN;

/// Maximum latitude that can be represented in Web Mercator
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Precomputed constant: EARTH_MERCATOR_MAX / 180.0
const LON_TO_X_FACTOR: f64 = EARTH_MERCATOR_MAX / 180.0;

/// Precomputed constant: EARTH_MERCATOR_MAX / PI
const Y_FACTOR: f64 = EARTH_MERCATOR_MAX / std::f64::consts::PI;

/// Precomputed constant: 180.0 / EARTH_MERCATOR_MAX
const X_TO_LON_FACTOR: f64 = 180.0 / EARTH_MERCATOR_MAX;

/// Precomputed constant: PI / EARTH_MERCATOR_MAX
const Y_TO_LAT_FACTOR: f64 = std::f64::consts::PI / EARTH_MERCATOR_MAX;

/// Project a location to Web Mercator (x, y) in meters
///
/// Latitudes beyond [`MAX_LATITUDE`] are clamped, so the poles project onto
/// the top and bottom edges of the square world instead of infinity.
#[inline(always)]
pub fn location_to_mercator(location: &Location) -> Point<f64> {
    wgs84_to_mercator(location.lat, location.lon)
}

/// Convert WGS84 (lat, lon) to Web Mercator (x, y) in meters
///
/// # Arguments
/// * `lat` - Latitude in degrees (clamped to ±85.0511)
/// * `lon` - Longitude in degrees (-180 to 180)
///
/// # Returns
/// A `Point<f64>` with x (easting) and y (northing) in meters
#[inline(always)]
pub fn wgs84_to_mercator(lat: f64, lon: f64) -> Point<f64> {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

    let x = lon * LON_TO_X_FACTOR;

    let lat_rad = lat.to_radians();
    let y = (lat_rad.tan() + (1.0 / lat_rad.cos())).ln() * Y_FACTOR;

    Point::new(x, y)
}

/// Convert Web Mercator (x, y) in meters to WGS84 (lat, lon)
///
/// # Returns
/// A tuple of (latitude, longitude) in degrees
#[inline(always)]
pub fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = x * X_TO_LON_FACTOR;
    let lat =
        (std::f64::consts::PI / 2.0 - 2.0 * ((-y * Y_TO_LAT_FACTOR).exp()).atan()).to_degrees();
    (lat, lon)
}

/// Check if a projected coordinate pair is usable at all (no NaN or infinity)
///
/// Finite coordinates outside the world extent are still valid; the tile
/// conversions clamp them.
#[inline(always)]
pub fn is_valid_coordinates(point: &Point<f64>) -> bool {
    point.x().is_finite() && point.y().is_finite()
}

/// Check if a point is within Web Mercator bounds
#[inline(always)]
pub fn is_valid_mercator(point: &Point<f64>) -> bool {
    let x = point.x();
    let y = point.y();
    (EARTH_MERCATOR_MIN..=EARTH_MERCATOR_MAX).contains(&x)
        && (EARTH_MERCATOR_MIN..=EARTH_MERCATOR_MAX).contains(&y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_to_mercator_origin() {
        let point = wgs84_to_mercator(0.0, 0.0);
        assert!((point.x() - 0.0).abs() < 0.01);
        assert!((point.y() - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_wgs84_to_mercator_bounds() {
        let west = wgs84_to_mercator(0.0, -180.0);
        assert!((west.x() - EARTH_MERCATOR_MIN).abs() < 1.0);

        let east = wgs84_to_mercator(0.0, 180.0);
        assert!((east.x() - EARTH_MERCATOR_MAX).abs() < 1.0);

        // Latitude clamping puts the poles on the edge of the square world
        let north = wgs84_to_mercator(90.0, 0.0);
        assert!((north.y() - EARTH_MERCATOR_MAX).abs() < 1.0);
        let south = wgs84_to_mercator(-90.0, 0.0);
        assert!((south.y() - EARTH_MERCATOR_MIN).abs() < 1.0);
    }

    #[test]
    fn test_location_to_mercator_matches_wgs84() {
        let location = Location::new(-0.1278, 51.5074);
        let a = location_to_mercator(&location);
        let b = wgs84_to_mercator(51.5074, -0.1278);
        assert_eq!(a, b);
        assert!(a.x() < 0.0 && a.y() > 0.0);
    }

    #[test]
    fn test_mercator_to_wgs84_roundtrip() {
        let lat = 51.5074;
        let lon = -0.1278;

        let mercator = wgs84_to_mercator(lat, lon);
        let (lat2, lon2) = mercator_to_wgs84(mercator.x(), mercator.y());

        assert!((lat - lat2).abs() < 0.0001);
        assert!((lon - lon2).abs() < 0.0001);
    }

    #[test]
    fn test_is_valid_mercator() {
        assert!(is_valid_mercator(&Point::new(0.0, 0.0)));
        assert!(is_valid_mercator(&Point::new(
            EARTH_MERCATOR_MAX,
            EARTH_MERCATOR_MAX
        )));
        assert!(!is_valid_mercator(&Point::new(
            EARTH_MERCATOR_MAX + 1.0,
            0.0
        )));
    }

    #[test]
    fn test_is_valid_coordinates() {
        assert!(is_valid_coordinates(&Point::new(0.0, 0.0)));
        assert!(is_valid_coordinates(&Point::new(
            3.0 * EARTH_MERCATOR_MAX,
            0.0
        )));
        assert!(!is_valid_coordinates(&Point::new(f64::NAN, 0.0)));
        assert!(!is_valid_coordinates(&Point::new(0.0, f64::INFINITY)));
    }
}
