//! Spherical Mercator transforms from WGS84 coordinates to raster pixels.
//!
//! Two independent transforms share the [`CoordinateTransformer`] capability:
//!
//! - [`ViewportTransform`] fits an arbitrary bounding box into a fixed-size
//!   image, keeping the aspect ratio and centering the leftover space.
//! - [`TileTransform`] addresses one tile of the zoom/x/y grid.
//!
//! The projection math lives in [`mercator`] and is implemented from scratch.

pub mod mercator;
pub mod tile;
pub mod transform;
pub mod viewport;

pub use tile::{TileTransform, DEFAULT_TILE_SIZE};
pub use transform::CoordinateTransformer;
pub use viewport::ViewportTransform;
