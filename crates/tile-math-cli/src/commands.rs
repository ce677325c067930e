//! Command handlers and their reports
//!
//! Each handler validates its input, runs the library call and returns a
//! report that prints either as text or as JSON.

use crate::cli::Command;
use crate::error::{CliError, Result};
use geo::{Coord, Point, Rect};
use serde::Serialize;
use std::fmt;
use tile_math::{
    Location, MAX_ZOOM, Tile, TileError, TileRange, num_tiles_in_zoom, tile_extent_in_zoom, utils,
};

/// Upper bound for `cover --list`
pub const MAX_LISTED_TILES: u64 = 1_000_000;

/// Something a command prints
pub trait Report: Serialize + fmt::Display {}

impl<T: Serialize + fmt::Display> Report for T {}

/// Axis-aligned bounds, flattened for output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundsReport {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl From<Rect<f64>> for BoundsReport {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

impl fmt::Display for BoundsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}] - [{:.6}, {:.6}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TileReport {
    pub tile: Tile,
    pub address: String,
    pub mercator_bounds: BoundsReport,
    pub wgs84_bounds: BoundsReport,
}

impl From<Tile> for TileReport {
    fn from(tile: Tile) -> Self {
        Self {
            tile,
            address: tile.to_string(),
            mercator_bounds: tile.mercator_bounds().into(),
            wgs84_bounds: tile.wgs84_bounds().into(),
        }
    }
}

impl fmt::Display for TileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tile:     {}", self.address)?;
        writeln!(f, "mercator: {}", self.mercator_bounds)?;
        write!(f, "wgs84:    {}", self.wgs84_bounds)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    pub zoom: u32,
    pub tiles_per_axis: u32,
    pub tile_extent_meters: f64,
}

impl fmt::Display for CountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zoom {}: {} tiles per axis, {:.6} m per tile",
            self.zoom, self.tiles_per_axis, self.tile_extent_meters
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverReport {
    pub range: TileRange,
    pub tile_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<String>>,
}

impl fmt::Display for CoverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.range;
        write!(
            f,
            "zoom {}: x {}..={}, y {}..={} ({} tiles)",
            r.zoom(),
            r.min_x(),
            r.max_x(),
            r.min_y(),
            r.max_y(),
            self.tile_count
        )?;
        if let Some(tiles) = &self.tiles {
            for tile in tiles {
                write!(f, "\n{tile}")?;
            }
        }
        Ok(())
    }
}

/// Run a command and render its report
pub fn run(command: Command, json: bool) -> Result<String> {
    tracing::debug!("Running {:?}", command);
    match command {
        Command::Locate { lon, lat, zoom } => render(&locate(lon, lat, zoom)?, json),
        Command::Mercator { x, y, zoom } => render(&mercator(x, y, zoom)?, json),
        Command::Bounds { tile } => render(&TileReport::from(tile), json),
        Command::Count { zoom } => render(&count(zoom)?, json),
        Command::Cover {
            min_x,
            min_y,
            max_x,
            max_y,
            zoom,
            list,
        } => {
            let rect = Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y });
            render(&cover(rect, zoom, list)?, json)
        }
    }
}

fn render(report: &impl Report, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

/// Zoom is validated by clap already; this guards direct callers
fn check_zoom(zoom: u32) -> Result<()> {
    if zoom > MAX_ZOOM {
        return Err(TileError::InvalidZoom(zoom).into());
    }
    Ok(())
}

pub fn locate(lon: f64, lat: f64, zoom: u32) -> Result<TileReport> {
    let location = Location::new(lon, lat);
    if !location.is_valid() {
        return Err(CliError::InvalidLocation { lon, lat });
    }
    check_zoom(zoom)?;
    Ok(Tile::from_location(zoom, &location).into())
}

pub fn mercator(x: f64, y: f64, zoom: u32) -> Result<TileReport> {
    let point = Point::new(x, y);
    if !utils::is_valid_coordinates(&point) {
        return Err(CliError::InvalidCoordinates { x, y });
    }
    check_zoom(zoom)?;
    Ok(Tile::from_mercator(zoom, point).into())
}

pub fn count(zoom: u32) -> Result<CountReport> {
    check_zoom(zoom)?;
    Ok(CountReport {
        zoom,
        tiles_per_axis: num_tiles_in_zoom(zoom),
        tile_extent_meters: tile_extent_in_zoom(zoom),
    })
}

pub fn cover(rect: Rect<f64>, zoom: u32, list: bool) -> Result<CoverReport> {
    for corner in [rect.min(), rect.max()] {
        if !utils::is_valid_coordinates(&corner.into()) {
            return Err(CliError::InvalidCoordinates {
                x: corner.x,
                y: corner.y,
            });
        }
    }
    check_zoom(zoom)?;
    let range = TileRange::covering(zoom, rect);
    let tile_count = range.len();

    let tiles = if list {
        if tile_count > MAX_LISTED_TILES {
            return Err(CliError::TooManyTiles(tile_count));
        }
        Some(range.iter().map(|tile| tile.to_string()).collect())
    } else {
        None
    };

    Ok(CoverReport {
        range,
        tile_count,
        tiles,
    })
}
