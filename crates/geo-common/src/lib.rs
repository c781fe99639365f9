//! Common value types shared by the projection crate and the probe CLI.

pub mod bbox;
pub mod error;
pub mod tile;

pub use bbox::{BboxParseError, GeoBBox};
pub use error::{GeoError, GeoResult};
pub use tile::{TileCoord, TileParseError};
