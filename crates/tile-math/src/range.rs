//! Rectangular blocks of tiles covering a bounding box

use crate::math::{mercx_to_tilex, mercy_to_tiley};
use crate::{MAX_ZOOM, Result, Tile, TileError, num_tiles_in_zoom};
use geo::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive block of tiles `min_x..=max_x` by `min_y..=max_y` at one zoom level
///
/// A range always holds at least one tile: `min <= max < 2^zoom` on both axes.
/// The fields are private so that only [`TileRange::new`] and
/// [`TileRange::covering`] can build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTileRange"))]
pub struct TileRange {
    zoom: u32,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

/// Unchecked wire form, validated through `TileRange::new` on deserialization
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTileRange {
    zoom: u32,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileRange> for TileRange {
    type Error = TileError;

    fn try_from(raw: RawTileRange) -> Result<Self> {
        Self::new(raw.zoom, raw.min_x, raw.max_x, raw.min_y, raw.max_y)
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TileRange {
    /// Create a range from inclusive tile index bounds.
    ///
    /// Fails for a zoom above 30, for inverted bounds and for indices outside
    /// the zoom level.
    pub fn new(zoom: u32, min_x: u32, max_x: u32, min_y: u32, max_y: u32) -> Result<Self> {
        if zoom > MAX_ZOOM {
            return Err(TileError::InvalidZoom(zoom));
        }
        let n = num_tiles_in_zoom(zoom);
        if min_x > max_x || min_y > max_y || max_x >= n || max_y >= n {
            return Err(TileError::InvalidRange {
                zoom,
                min_x,
                max_x,
                min_y,
                max_y,
            });
        }
        Ok(Self {
            zoom,
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Tiles at `zoom` whose extents touch the Web Mercator rectangle.
    ///
    /// The rectangle is clamped to the world like the point conversions, so a
    /// box larger than the world yields every tile. A rectangle edge lying
    /// exactly on a tile boundary includes the tile beyond it.
    pub fn covering(zoom: u32, rect: Rect<f64>) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("range::covering");
        debug_assert!(zoom <= MAX_ZOOM, "zoom {zoom} exceeds {MAX_ZOOM}");

        // Rows grow southwards, so the northern edge gives the first row
        let range = Self {
            zoom,
            min_x: mercx_to_tilex(zoom, rect.min().x),
            max_x: mercx_to_tilex(zoom, rect.max().x),
            min_y: mercy_to_tiley(zoom, rect.max().y),
            max_y: mercy_to_tiley(zoom, rect.min().y),
        };
        tracing::debug!(
            "Tile range at zoom {}: x {}..={}, y {}..={} ({} tiles)",
            zoom,
            range.min_x,
            range.max_x,
            range.min_y,
            range.max_y,
            range.len()
        );
        range
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn min_x(&self) -> u32 {
        self.min_x
    }

    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    pub fn min_y(&self) -> u32 {
        self.min_y
    }

    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    /// Number of columns in the range
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Number of rows in the range
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Number of tiles in the range (`4^30` at most, so `u64`)
    pub fn len(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Always `false`; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the tile is at this zoom level and inside the block
    pub fn contains(&self, tile: &Tile) -> bool {
        tile.z == self.zoom
            && (self.min_x..=self.max_x).contains(&tile.x)
            && (self.min_y..=self.max_y).contains(&tile.y)
    }

    /// Iterate the tiles in `Tile` order: column by column, rows within a column
    pub fn iter(&self) -> TileRangeIter {
        TileRangeIter {
            range: *self,
            x: self.min_x,
            y: self.min_y,
            done: false,
        }
    }
}

impl IntoIterator for TileRange {
    type Item = Tile;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &TileRange {
    type Item = Tile;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tiles of a [`TileRange`]
#[derive(Debug, Clone)]
pub struct TileRangeIter {
    range: TileRange,
    x: u32,
    y: u32,
    done: bool,
}

impl TileRangeIter {
    fn remaining(&self) -> u64 {
        if self.done {
            return 0;
        }
        let full_columns = u64::from(self.range.max_x - self.x);
        let rows_left_in_column = u64::from(self.range.max_y - self.y + 1);
        full_columns * u64::from(self.range.height()) + rows_left_in_column
    }
}

impl Iterator for TileRangeIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let tile = Tile::new(self.range.zoom, self.x, self.y);

        if self.y < self.range.max_y {
            self.y += 1;
        } else if self.x < self.range.max_x {
            self.x += 1;
            self.y = self.range.min_y;
        } else {
            self.done = true;
        }

        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for TileRangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{EARTH_MERCATOR_MAX, EARTH_MERCATOR_MIN};
    use geo::Coord;

    fn world() -> Rect<f64> {
        Rect::new(
            Coord {
                x: EARTH_MERCATOR_MIN,
                y: EARTH_MERCATOR_MIN,
            },
            Coord {
                x: EARTH_MERCATOR_MAX,
                y: EARTH_MERCATOR_MAX,
            },
        )
    }

    #[test]
    fn test_world_range_has_all_tiles() {
        for zoom in 0..=6 {
            let range = TileRange::covering(zoom, world());
            assert_eq!(range.len(), 4u64.pow(zoom));
            assert_eq!(range.iter().count() as u64, range.len());
            assert!(!range.is_empty());
        }
        assert_eq!(TileRange::covering(30, world()).len(), 1u64 << 60);
    }

    #[test]
    fn test_oversized_box_is_clamped() {
        let huge = Rect::new(
            Coord {
                x: EARTH_MERCATOR_MIN * 10.0,
                y: EARTH_MERCATOR_MIN * 10.0,
            },
            Coord {
                x: EARTH_MERCATOR_MAX * 10.0,
                y: EARTH_MERCATOR_MAX * 10.0,
            },
        );
        assert_eq!(TileRange::covering(2, huge), TileRange::covering(2, world()));
    }

    #[test]
    fn test_small_box_inside_one_tile() {
        let tile = Tile::new(12, 2200, 1400);
        let center = tile.center();
        let rect = Rect::new(
            Coord {
                x: center.x() - 1.0,
                y: center.y() - 1.0,
            },
            Coord {
                x: center.x() + 1.0,
                y: center.y() + 1.0,
            },
        );
        let range = TileRange::covering(12, rect);
        assert_eq!(range.len(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![tile]);
    }

    #[test]
    fn test_north_edge_maps_to_first_row() {
        // North-west quadrant of the world at zoom 2
        let rect = Rect::new(
            Coord {
                x: EARTH_MERCATOR_MIN + 1.0,
                y: 1.0,
            },
            Coord {
                x: -1.0,
                y: EARTH_MERCATOR_MAX - 1.0,
            },
        );
        let range = TileRange::covering(2, rect);
        assert_eq!((range.min_x, range.max_x), (0, 1));
        assert_eq!((range.min_y, range.max_y), (0, 1));
        assert_eq!((range.width(), range.height()), (2, 2));
    }

    #[test]
    fn test_iteration_order_and_size_hint() {
        let range = TileRange::new(3, 1, 2, 4, 6).unwrap();
        let mut iter = range.iter();
        assert_eq!(iter.size_hint(), (6, Some(6)));
        iter.next();
        assert_eq!(iter.size_hint(), (5, Some(5)));

        let tiles: Vec<Tile> = range.into_iter().collect();
        assert_eq!(tiles.len(), 6);
        assert!(tiles.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(tiles.first(), Some(&Tile::new(3, 1, 4)));
        assert_eq!(tiles.last(), Some(&Tile::new(3, 2, 6)));
        assert!(tiles.iter().all(|t| range.contains(t)));
    }

    #[test]
    fn test_new_rejects_malformed_bounds() {
        assert_eq!(
            TileRange::new(3, 2, 1, 0, 0),
            Err(TileError::InvalidRange {
                zoom: 3,
                min_x: 2,
                max_x: 1,
                min_y: 0,
                max_y: 0
            })
        );
        assert!(matches!(
            TileRange::new(3, 0, 0, 5, 4),
            Err(TileError::InvalidRange { .. })
        ));
        // 2^3 = 8 tiles per axis, so index 8 is past the edge
        assert!(matches!(
            TileRange::new(3, 0, 8, 0, 0),
            Err(TileError::InvalidRange { .. })
        ));
        assert!(matches!(
            TileRange::new(3, 0, 0, 0, 8),
            Err(TileError::InvalidRange { .. })
        ));
        assert_eq!(TileRange::new(31, 0, 0, 0, 0), Err(TileError::InvalidZoom(31)));
    }

    #[test]
    fn test_new_single_tile() {
        let range = TileRange::new(3, 7, 7, 7, 7).unwrap();
        assert_eq!(range.len(), 1);
        assert!(!range.is_empty());
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![Tile::new(3, 7, 7)]);
        assert_eq!(
            (range.zoom(), range.min_x(), range.max_x(), range.min_y(), range.max_y()),
            (3, 7, 7, 7, 7)
        );
    }

    #[test]
    fn test_contains() {
        let range = TileRange::new(3, 1, 2, 4, 6).unwrap();
        assert!(range.contains(&Tile::new(3, 2, 5)));
        assert!(!range.contains(&Tile::new(3, 0, 5)));
        assert!(!range.contains(&Tile::new(3, 2, 7)));
        assert!(!range.contains(&Tile::new(4, 2, 5)));
    }
}
