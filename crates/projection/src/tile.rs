//! Mercator transform for a single tile of the zoom/x/y grid.

use geo_common::{GeoBBox, GeoError, GeoResult, TileCoord};
use serde::Serialize;
use std::fmt;
use tracing::trace;

use crate::mercator::{lat2merc_scaled, lon2merc_scaled, merc2lat, merc2lon};
use crate::transform::CoordinateTransformer;

/// Tile size in pixels (standard Web Mercator tile)
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Number of tiles along one axis at `zoom`, as a float.
///
/// Infinite once `2^zoom` leaves the `f64` range.
fn world_tiles(zoom: u32) -> f64 {
    i32::try_from(zoom).map_or(f64::INFINITY, |zoom| 2f64.powi(zoom))
}

/// Transform from geographic coordinates to pixels of one tile.
///
/// Pixel (0, 0) is the north-west corner of the tile. The geographic box of
/// the tile is cached and rebuilt by every setter that changes the tile id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileTransform {
    zoom: u32,
    tile_x: u32,
    tile_y: u32,
    tile_width: u32,
    tile_height: u32,
    bbox: GeoBBox,
}

impl TileTransform {
    /// Create a 256x256 tile transform for `zoom/x/y`.
    ///
    /// Indices outside `[0, 2^zoom)` are accepted and describe an area
    /// beyond the regular grid.
    pub fn new(zoom: u32, x: u32, y: u32) -> Self {
        Self::with_size(zoom, x, y, DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE)
    }

    /// Create a tile transform with a custom raster size.
    pub fn with_size(zoom: u32, x: u32, y: u32, tile_width: u32, tile_height: u32) -> Self {
        let mut tile = Self {
            zoom,
            tile_x: x,
            tile_y: y,
            tile_width,
            tile_height,
            bbox: GeoBBox::new(0.0, 0.0, 0.0, 0.0),
        };
        tile.rebuild();
        tile
    }

    pub fn from_coord(coord: TileCoord) -> Self {
        Self::new(coord.z, coord.x, coord.y)
    }

    /// Tile at `zoom` that contains the point, clamped into the grid.
    ///
    /// Fails when the tile index does not fit in `u32` (possible from zoom
    /// 33 on) or the point is not finite.
    pub fn containing(lon: f64, lat: f64, zoom: u32) -> GeoResult<TileCoord> {
        let n = world_tiles(zoom);
        let max = n - 1.0;
        let index = |scaled: f64| {
            let index = scaled.floor().clamp(0.0, max);
            if !index.is_finite() || index > u64::MAX as f64 {
                return None;
            }
            u32::try_from(index as u64).ok()
        };

        match (index(lon2merc_scaled(lon, n)), index(lat2merc_scaled(lat, n))) {
            (Some(x), Some(y)) => Ok(TileCoord::new(zoom, x, y)),
            _ => Err(GeoError::TileIndexOverflow { lon, lat, zoom }),
        }
    }

    fn rebuild(&mut self) {
        let n = world_tiles(self.zoom);
        let x = f64::from(self.tile_x);
        let y = f64::from(self.tile_y);
        self.bbox = GeoBBox::new(
            merc2lon(x, n),
            merc2lat(y, n),
            merc2lon(x + 1.0, n),
            merc2lat(y + 1.0, n),
        );
        trace!(tile = %self, bbox = %self.bbox, "Rebuilt tile bounds");
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom;
        self.rebuild();
    }

    pub fn set_tile_x(&mut self, x: u32) {
        self.tile_x = x;
        self.rebuild();
    }

    pub fn set_tile_y(&mut self, y: u32) {
        self.tile_y = y;
        self.rebuild();
    }

    /// Move to another tile, rebuilding the bounds once.
    pub fn set_tile(&mut self, coord: TileCoord) {
        self.zoom = coord.z;
        self.tile_x = coord.x;
        self.tile_y = coord.y;
        self.rebuild();
    }

    /// Change the raster size. The geographic bounds do not depend on it.
    pub fn set_tile_size(&mut self, tile_width: u32, tile_height: u32) {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn tile_x(&self) -> u32 {
        self.tile_x
    }

    pub fn tile_y(&self) -> u32 {
        self.tile_y
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn coord(&self) -> TileCoord {
        TileCoord::new(self.zoom, self.tile_x, self.tile_y)
    }

    /// Geographic bounds of the tile (west, north, east, south).
    pub fn bbox(&self) -> GeoBBox {
        self.bbox
    }

    /// Western longitude.
    pub fn lon1(&self) -> f64 {
        self.bbox.lon1
    }

    /// Northern latitude.
    pub fn lat1(&self) -> f64 {
        self.bbox.lat1
    }

    /// Eastern longitude.
    pub fn lon2(&self) -> f64 {
        self.bbox.lon2
    }

    /// Southern latitude.
    pub fn lat2(&self) -> f64 {
        self.bbox.lat2
    }
}

impl From<TileCoord> for TileTransform {
    fn from(coord: TileCoord) -> Self {
        Self::from_coord(coord)
    }
}

impl fmt::Display for TileTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.zoom, self.tile_x, self.tile_y)
    }
}

impl CoordinateTransformer for TileTransform {
    fn x(&self, lon: f64) -> f64 {
        let absx = lon2merc_scaled(lon, world_tiles(self.zoom));
        (absx - f64::from(self.tile_x)) * f64::from(self.tile_width)
    }

    fn y(&self, lat: f64) -> f64 {
        let absy = lat2merc_scaled(lat, world_tiles(self.zoom));
        (absy - f64::from(self.tile_y)) * f64::from(self.tile_height)
    }
}
