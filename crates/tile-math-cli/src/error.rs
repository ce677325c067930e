use tile_math::TileError;

/// Errors reported to the user by the command-line front end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Tile(#[from] TileError),

    #[error("Invalid location: lon {lon}, lat {lat} (must be within ±180 and ±90 degrees)")]
    InvalidLocation { lon: f64, lat: f64 },

    #[error("Invalid coordinates: ({x}, {y}) (must be finite)")]
    InvalidCoordinates { x: f64, y: f64 },

    #[error("Refusing to list {0} tiles (limit is {limit})", limit = crate::commands::MAX_LISTED_TILES)]
    TooManyTiles(u64),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
