//! The `Tile` value type
//!
//! A tile is a `z/x/y` address in the usual Web Mercator slippy-map scheme.
//! Tiles are plain `Copy` values with a deterministic total order (zoom, then
//! column, then row) so they can key a `BTreeMap` or be sorted. The order is
//! not a spatial locality order.

use crate::math::{mercx_to_tilex, mercy_to_tiley, num_tiles_in_zoom, tile_extent_in_zoom};
use crate::utils::{self, EARTH_MERCATOR_MAX};
use crate::{Location, Result, TileError};
use geo::{Coord, Point, Rect};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest supported zoom level. `2^30` tiles per axis still fit in a `u32`
/// index and a positive `i32`.
pub const MAX_ZOOM: u32 = 30;

/// A tile in the Web Mercator projection
///
/// Field order matters: the derived `Ord` compares `z`, then `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    /// Zoom level
    pub z: u32,
    /// Column, 0 at the west edge
    pub x: u32,
    /// Row, 0 at the north edge
    pub y: u32,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Tile {
    /// Create a tile from explicit indices.
    ///
    /// The values are only checked in debug builds; see [`Tile::try_new`] for
    /// untrusted input.
    ///
    /// Requires `zoom <= 30 && x < 2^zoom && y < 2^zoom`.
    pub fn new(zoom: u32, x: u32, y: u32) -> Self {
        debug_assert!(zoom <= MAX_ZOOM, "zoom {zoom} exceeds {MAX_ZOOM}");
        debug_assert!(x < num_tiles_in_zoom(zoom), "x {x} out of range at zoom {zoom}");
        debug_assert!(y < num_tiles_in_zoom(zoom), "y {y} out of range at zoom {zoom}");
        Self { z: zoom, x, y }
    }

    /// Create a tile from explicit indices, rejecting invalid addresses
    pub fn try_new(zoom: u32, x: u32, y: u32) -> Result<Self> {
        if zoom > MAX_ZOOM {
            return Err(TileError::InvalidZoom(zoom));
        }
        let tile = Self { z: zoom, x, y };
        if !tile.is_valid() {
            return Err(TileError::OutOfRange { zoom, x, y });
        }
        Ok(tile)
    }

    /// Create the tile at `zoom` that contains the location.
    ///
    /// Requires `location.is_valid() && zoom <= 30` (debug-checked only).
    pub fn from_location(zoom: u32, location: &Location) -> Self {
        debug_assert!(location.is_valid(), "invalid location {location:?}");
        Self::from_mercator(zoom, utils::location_to_mercator(location))
    }

    /// Create the tile at `zoom` that contains the Web Mercator coordinates.
    ///
    /// Coordinates outside the projection bounds are clamped onto the nearest
    /// edge tile. Requires finite coordinates and `zoom <= 30` (debug-checked
    /// only).
    pub fn from_mercator(zoom: u32, coordinates: Point<f64>) -> Self {
        debug_assert!(zoom <= MAX_ZOOM, "zoom {zoom} exceeds {MAX_ZOOM}");
        debug_assert!(
            utils::is_valid_coordinates(&coordinates),
            "invalid coordinates {coordinates:?}"
        );
        if !utils::is_valid_mercator(&coordinates) {
            tracing::trace!(
                "Clamping coordinates outside Web Mercator bounds: ({}, {})",
                coordinates.x(),
                coordinates.y()
            );
        }
        Self {
            z: zoom,
            x: mercx_to_tilex(zoom, coordinates.x()),
            y: mercy_to_tiley(zoom, coordinates.y()),
        }
    }

    /// Check whether this tile is valid: zoom in `0..=30` and both indices
    /// below `2^zoom`.
    pub fn is_valid(&self) -> bool {
        if self.z > MAX_ZOOM {
            return false;
        }
        let max = num_tiles_in_zoom(self.z);
        self.x < max && self.y < max
    }

    /// Extent of this tile in Web Mercator meters
    pub fn mercator_bounds(&self) -> Rect<f64> {
        let extent = tile_extent_in_zoom(self.z);
        let west = -EARTH_MERCATOR_MAX + f64::from(self.x) * extent;
        let north = EARTH_MERCATOR_MAX - f64::from(self.y) * extent;
        Rect::new(
            Coord {
                x: west,
                y: north - extent,
            },
            Coord {
                x: west + extent,
                y: north,
            },
        )
    }

    /// Extent of this tile in WGS84 degrees (x = longitude, y = latitude)
    pub fn wgs84_bounds(&self) -> Rect<f64> {
        let bounds = self.mercator_bounds();
        let (south, west) = utils::mercator_to_wgs84(bounds.min().x, bounds.min().y);
        let (north, east) = utils::mercator_to_wgs84(bounds.max().x, bounds.max().y);
        Rect::new(Coord { x: west, y: south }, Coord { x: east, y: north })
    }

    /// Centre of this tile in Web Mercator meters
    pub fn center(&self) -> Point<f64> {
        self.mercator_bounds().center().into()
    }

    /// The tile one zoom level up that contains this one, `None` at zoom 0
    pub fn parent(&self) -> Option<Self> {
        if self.z == 0 {
            return None;
        }
        Some(Self::new(self.z - 1, self.x / 2, self.y / 2))
    }

    /// The four tiles one zoom level down, in NW, NE, SW, SE order.
    ///
    /// Requires `z < 30` (debug-checked only).
    pub fn children(&self) -> [Self; 4] {
        let z = self.z + 1;
        let (x, y) = (self.x * 2, self.y * 2);
        [
            Self::new(z, x, y),
            Self::new(z, x + 1, y),
            Self::new(z, x, y + 1),
            Self::new(z, x + 1, y + 1),
        ]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for Tile {
    type Err = TileError;

    /// Parses the `z/x/y` form produced by `Display`
    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: Option<&str>, name: &str| -> Result<u32> {
            let part = part.ok_or_else(|| TileError::Parse(format!("missing {name} in '{s}'")))?;
            part.trim()
                .parse::<u32>()
                .map_err(|e| TileError::Parse(format!("invalid {name} '{part}' in '{s}': {e}")))
        };

        let mut parts = s.split('/');
        let z = parse(parts.next(), "zoom")?;
        let x = parse(parts.next(), "x")?;
        let y = parse(parts.next(), "y")?;
        if parts.next().is_some() {
            return Err(TileError::Parse(format!(
                "expected 'z/x/y', got too many parts in '{s}'"
            )));
        }
        Self::try_new(z, x, y)
    }
}
