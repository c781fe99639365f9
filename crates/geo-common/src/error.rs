//! Error types for the mercator workspace.

use thiserror::Error;

use crate::{BboxParseError, TileParseError};

/// Result type alias using GeoError.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors raised around the coordinate transforms.
///
/// The transforms themselves never fail; these cover parsing, the
/// optional fail-fast constructors and point-to-tile lookup.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid bbox: {0}")]
    InvalidBbox(#[from] BboxParseError),

    #[error("Invalid tile: {0}")]
    InvalidTile(#[from] TileParseError),

    #[error("Degenerate bbox {bbox}: {reason}")]
    DegenerateBbox { bbox: String, reason: &'static str },

    #[error("Invalid raster dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No tile at zoom {zoom} with u32 indices contains ({lon}, {lat})")]
    TileIndexOverflow { lon: f64, lat: f64, zoom: u32 },
}
