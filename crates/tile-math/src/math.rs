//! Tile arithmetic at a zoom level
//!
//! Tiles are numbered from the top-left corner of the square Web Mercator
//! world: columns grow eastwards (with x), rows grow southwards (against y).
//!
//! The coordinate to index conversions saturate. A coordinate outside
//! `[-EARTH_MERCATOR_MAX, EARTH_MERCATOR_MAX]` maps to the first or last
//! column/row, and so do infinities. NaN maps to index 0. They never fail.

use crate::utils::{EARTH_MERCATOR_MAX, EARTH_SIZE_METERS};

/// Constrain `value` to `[low, high]`, saturating at the bounds.
///
/// Works for any `PartialOrd` type; an unordered `value` (NaN) is returned
/// unchanged.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, low: T, high: T) -> T {
    if value < low {
        low
    } else if high < value {
        high
    } else {
        value
    }
}

/// Number of tiles along each axis at the given zoom level (`2^zoom`)
#[inline]
pub fn num_tiles_in_zoom(zoom: u32) -> u32 {
    debug_assert!(zoom < u32::BITS, "zoom {zoom} overflows the tile count");
    1 << zoom
}

/// Width (and height) of one tile in Web Mercator meters at the given zoom level
#[inline]
pub fn tile_extent_in_zoom(zoom: u32) -> f64 {
    EARTH_SIZE_METERS / f64::from(num_tiles_in_zoom(zoom))
}

/// Tile column containing the Web Mercator x coordinate, numbered west to east
#[inline]
pub fn mercx_to_tilex(zoom: u32, x: f64) -> u32 {
    to_tile_index(zoom, (x + EARTH_MERCATOR_MAX) / tile_extent_in_zoom(zoom))
}

/// Tile row containing the Web Mercator y coordinate, numbered north to south
#[inline]
pub fn mercy_to_tiley(zoom: u32, y: f64) -> u32 {
    to_tile_index(zoom, (EARTH_MERCATOR_MAX - y) / tile_extent_in_zoom(zoom))
}

/// Truncate a fractional tile position and clamp it into `[0, 2^zoom - 1]`
#[inline]
fn to_tile_index(zoom: u32, position: f64) -> u32 {
    // `as` saturates at the i64 bounds (NaN becomes 0), so there is no overflow
    let max_index = i64::from(num_tiles_in_zoom(zoom)) - 1;
    clamp(position as i64, 0, max_index) as u32
}
