//! Tile Math - Web Mercator slippy-map tile arithmetic
//!
//! This library maps geographic locations and Web Mercator (EPSG:3857) projected
//! coordinates to integer tile addresses at a zoom level, and relates tile
//! addresses back to their spatial extents.
//!
//! # Architecture
//!
//! - **[`math`]**: Free functions for tile counts, tile extents and coordinate to index conversion
//! - **[`utils`]**: Projection helpers (WGS84 <-> Web Mercator) and validity predicates
//! - **[`Tile`]**: Immutable `z/x/y` address with validity rules and a total order
//! - **[`Location`]**: Geographic longitude/latitude pair
//! - **[`TileRange`]**: Block of tiles covering a projected bounding box
//!
//! # Out-of-range input
//!
//! Coordinate conversions saturate: a coordinate outside the projection bounds
//! yields the nearest valid tile index instead of an error. Constructor
//! preconditions are only checked with debug assertions; use
//! [`Tile::try_new`] or [`str::parse`] for untrusted input.

mod location;
pub mod math;
mod range;
mod tile;
pub mod utils;

// Public API exports
pub use location::Location;
pub use math::{clamp, mercx_to_tilex, mercy_to_tiley, num_tiles_in_zoom, tile_extent_in_zoom};
pub use range::{TileRange, TileRangeIter};
pub use tile::{MAX_ZOOM, Tile};

/// Error types for checked tile construction and parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    #[error("Invalid zoom level: {0} (must be between 0 and 30)")]
    InvalidZoom(u32),

    #[error("Tile {zoom}/{x}/{y} is out of range (indices must be below 2^{zoom})")]
    OutOfRange { zoom: u32, x: u32, y: u32 },

    #[error("Invalid tile range at zoom {zoom}: x {min_x}..={max_x}, y {min_y}..={max_y}")]
    InvalidRange {
        zoom: u32,
        min_x: u32,
        max_x: u32,
        min_y: u32,
        max_y: u32,
    },

    #[error("Tile parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, TileError>;
