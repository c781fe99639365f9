//! Fit a geographic bounding box into a fixed-size Mercator raster.
//!
//! A [`ViewportTransform`] is built from a *defining* bounding box and a
//! pixel size. It picks the largest uniform scale at which the whole box
//! still fits on the raster and centers the box on the axis that is left
//! under-filled. The area actually covered by the raster, the *visible*
//! bounding box, is therefore never smaller than the defining box and is
//! larger whenever the aspect ratios of box and raster differ.

use geo_common::{GeoBBox, GeoError, GeoResult};
use serde::Serialize;
use tracing::{debug, trace};

use crate::mercator::{lat2merc, lat2merc_scaled, lon2merc, lon2merc_scaled, merc2lat, merc2lon};
use crate::transform::CoordinateTransformer;

/// Mercator transform for a raster showing a given bounding box.
///
/// Immutable once built. Pixel (0, 0) is the top-left corner of the raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportTransform {
    width: u32,
    height: u32,
    /// Normalized input box
    defining: GeoBBox,
    /// Side length in pixels of the whole projected world at this scale
    world_size: f64,
    /// Projected position of the raster's top-left pixel, in world pixels
    sx: f64,
    sy: f64,
}

impl ViewportTransform {
    /// Build the transform for `bbox` on a `width` x `height` raster.
    ///
    /// Coordinates of `bbox` may come in any order; they are normalized so
    /// that west <= east and north >= south. A box with zero extent on one
    /// axis is scaled by the other axis alone; a box collapsed to a point
    /// divides by zero on both and yields a non-finite scale. Use
    /// [`try_new`](Self::try_new) to reject such input instead.
    pub fn new(bbox: GeoBBox, width: u32, height: u32) -> Self {
        let defining = bbox.normalized();
        let w = f64::from(width);
        let h = f64::from(height);

        // Span of the box on the unit world
        let xs = lon2merc(defining.lon2) - lon2merc(defining.lon1);
        let ys = lat2merc(defining.lat2) - lat2merc(defining.lat1);

        // Smaller ratio wins so that nothing gets cropped
        let world_size = (w / xs).min(h / ys);

        let mut sx = lon2merc_scaled(defining.lon1, world_size);
        let mut sy = lat2merc_scaled(defining.lat1, world_size);

        let dx = lon2merc_scaled(defining.lon2, world_size) - sx;
        let dy = lat2merc_scaled(defining.lat2, world_size) - sy;
        if dx < w {
            sx -= (w - dx) / 2.0;
        }
        if dy < h {
            sy -= (h - dy) / 2.0;
        }

        trace!(
            bbox = %defining,
            width,
            height,
            world_size,
            sx,
            sy,
            "Built viewport transform"
        );

        Self {
            width,
            height,
            defining,
            world_size,
            sx,
            sy,
        }
    }

    /// Same as [`new`](Self::new), taking the box as west, north, east, south.
    pub fn from_coords(lon1: f64, lat1: f64, lon2: f64, lat2: f64, width: u32, height: u32) -> Self {
        Self::new(GeoBBox::new(lon1, lat1, lon2, lat2), width, height)
    }

    /// Like [`new`](Self::new), but rejects a zero-sized raster and boxes
    /// without area or with non-finite coordinates.
    pub fn try_new(bbox: GeoBBox, width: u32, height: u32) -> GeoResult<Self> {
        if width == 0 || height == 0 {
            debug!(width, height, "Rejecting empty raster");
            return Err(GeoError::InvalidDimensions { width, height });
        }

        let normalized = bbox.normalized();
        if normalized.is_degenerate() {
            let reason = if normalized.as_array().iter().any(|v| !v.is_finite()) {
                "coordinates must be finite"
            } else if normalized.lon_span() == 0.0 {
                "longitude span is zero"
            } else {
                "latitude span is zero"
            };
            debug!(bbox = %bbox, reason, "Rejecting degenerate bbox");
            return Err(GeoError::DegenerateBbox {
                bbox: bbox.to_string(),
                reason,
            });
        }

        Ok(Self::new(bbox, width, height))
    }

    /// Geographic position of a pixel; inverse of [`x`](CoordinateTransformer::x)/[`y`](CoordinateTransformer::y).
    pub fn pixel_to_geo(&self, px: f64, py: f64) -> (f64, f64) {
        (
            merc2lon(px + self.sx, self.world_size),
            merc2lat(py + self.sy, self.world_size),
        )
    }

    /// The normalized box this transform was built from.
    pub fn defining_bbox(&self) -> GeoBBox {
        self.defining
    }

    /// The box covered by the whole raster. Contains the defining box.
    pub fn visible_bbox(&self) -> GeoBBox {
        let (lon1, lat1) = self.pixel_to_geo(0.0, 0.0);
        let (lon2, lat2) = self.pixel_to_geo(f64::from(self.width), f64::from(self.height));
        GeoBBox::new(lon1, lat1, lon2, lat2)
    }

    /// Fractional slippy-map zoom whose `tile_size` grid has the same scale.
    pub fn zoom_level(&self, tile_size: u32) -> f64 {
        (self.world_size / f64::from(tile_size)).log2()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Western longitude of the defining box.
    pub fn lon1(&self) -> f64 {
        self.defining.lon1
    }

    /// Northern latitude of the defining box.
    pub fn lat1(&self) -> f64 {
        self.defining.lat1
    }

    /// Eastern longitude of the defining box.
    pub fn lon2(&self) -> f64 {
        self.defining.lon2
    }

    /// Southern latitude of the defining box.
    pub fn lat2(&self) -> f64 {
        self.defining.lat2
    }

    pub fn sx(&self) -> f64 {
        self.sx
    }

    pub fn sy(&self) -> f64 {
        self.sy
    }

    pub fn world_size(&self) -> f64 {
        self.world_size
    }
}

impl CoordinateTransformer for ViewportTransform {
    fn x(&self, lon: f64) -> f64 {
        lon2merc_scaled(lon, self.world_size) - self.sx
    }

    fn y(&self, lat: f64) -> f64 {
        lat2merc_scaled(lat, self.world_size) - self.sy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_world_size_uses_smaller_ratio() {
        let t = ViewportTransform::from_coords(-10.0, 50.0, 10.0, 40.0, 200, 100);
        let xs = lon2merc(10.0) - lon2merc(-10.0);
        let ys = lat2merc(40.0) - lat2merc(50.0);
        let expected = (200.0 / xs).min(100.0 / ys);
        assert!((t.world_size() - expected).abs() < EPS);
    }

    #[test]
    fn test_whole_world_square() {
        let t = ViewportTransform::from_coords(
            -180.0,
            crate::mercator::MAX_LATITUDE,
            180.0,
            -crate::mercator::MAX_LATITUDE,
            256,
            256,
        );
        assert!((t.world_size() - 256.0).abs() < EPS);
        assert!(t.sx().abs() < EPS);
        assert!(t.sy().abs() < EPS);
        assert!(t.zoom_level(256).abs() < EPS);
    }

    #[test]
    fn test_pixel_to_geo_inverts_projection() {
        let t = ViewportTransform::from_coords(5.0, 56.0, 15.0, 47.0, 640, 480);
        let (px, py) = t.project(9.5, 51.25);
        let (lon, lat) = t.pixel_to_geo(px, py);
        assert!((lon - 9.5).abs() < 1e-9);
        assert!((lat - 51.25).abs() < 1e-9);
    }

    #[test]
    fn test_try_new_rejects_degenerate_input() {
        let bbox = GeoBBox::new(-10.0, 50.0, 10.0, 40.0);
        assert!(matches!(
            ViewportTransform::try_new(bbox, 0, 100),
            Err(GeoError::InvalidDimensions { width: 0, height: 100 })
        ));

        let flat = GeoBBox::new(-10.0, 45.0, 10.0, 45.0);
        match ViewportTransform::try_new(flat, 100, 100) {
            Err(GeoError::DegenerateBbox { reason, .. }) => {
                assert_eq!(reason, "latitude span is zero")
            }
            other => panic!("expected DegenerateBbox, got {:?}", other),
        }

        let nan = GeoBBox::new(f64::NAN, 45.0, 10.0, 40.0);
        assert!(ViewportTransform::try_new(nan, 100, 100).is_err());

        assert!(ViewportTransform::try_new(bbox, 200, 100).is_ok());
    }

    #[test]
    fn test_new_keeps_silent_arithmetic() {
        let point = ViewportTransform::from_coords(5.0, 45.0, 5.0, 45.0, 100, 100);
        assert!(!point.world_size().is_finite());
        assert!(!point.sx().is_finite());

        // Only the latitude span constrains the scale
        let line = ViewportTransform::from_coords(5.0, 50.0, 5.0, 40.0, 100, 100);
        let ys = lat2merc(40.0) - lat2merc(50.0);
        assert!((line.world_size() - 100.0 / ys).abs() < EPS);
        assert!((line.x(5.0) - 50.0).abs() < EPS);
    }
}
