use clap::{Parser, Subcommand};
use tile_math::{MAX_ZOOM, Tile};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Tile Math - Inspect Web Mercator slippy-map tile addresses
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[clap(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[clap(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tile containing a WGS84 location
    Locate {
        /// Longitude in degrees (-180 to 180)
        #[clap(long, allow_hyphen_values = true)]
        lon: f64,

        /// Latitude in degrees (-90 to 90)
        #[clap(long, allow_hyphen_values = true)]
        lat: f64,

        #[clap(short, long, value_parser = zoom_parser())]
        zoom: u32,
    },

    /// Tile containing a Web Mercator coordinate (clamped to the world)
    Mercator {
        /// Easting in meters
        #[clap(short, long, allow_hyphen_values = true)]
        x: f64,

        /// Northing in meters
        #[clap(short, long, allow_hyphen_values = true)]
        y: f64,

        #[clap(short, long, value_parser = zoom_parser())]
        zoom: u32,
    },

    /// Web Mercator and WGS84 extent of a tile
    Bounds {
        /// Tile address as z/x/y
        #[clap(value_name = "Z/X/Y")]
        tile: Tile,
    },

    /// Tiles per axis and tile size at a zoom level
    Count {
        #[clap(value_parser = zoom_parser())]
        zoom: u32,
    },

    /// Tiles covering a Web Mercator bounding box
    Cover {
        #[clap(long, allow_hyphen_values = true)]
        min_x: f64,

        #[clap(long, allow_hyphen_values = true)]
        min_y: f64,

        #[clap(long, allow_hyphen_values = true)]
        max_x: f64,

        #[clap(long, allow_hyphen_values = true)]
        max_y: f64,

        #[clap(short, long, value_parser = zoom_parser())]
        zoom: u32,

        /// List every tile instead of only the range
        #[clap(long, default_value = "false")]
        list: bool,
    },
}

/// Zoom levels accepted on the command line (0-30)
fn zoom_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(MAX_ZOOM))
}
