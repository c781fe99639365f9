//! Geographic to pixel transform capability.

/// Maps longitude/latitude in degrees to pixel coordinates on some raster.
///
/// Implemented by [`ViewportTransform`](crate::ViewportTransform) and
/// [`TileTransform`](crate::TileTransform). Drawing code can take either one
/// through `&dyn CoordinateTransformer` or a generic parameter.
pub trait CoordinateTransformer {
    /// Pixel x for a longitude.
    fn x(&self, lon: f64) -> f64;

    /// Pixel y for a latitude.
    fn y(&self, lat: f64) -> f64;

    /// Pixel position `(x, y)` for a point.
    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (self.x(lon), self.y(lat))
    }
}

impl<T: CoordinateTransformer + ?Sized> CoordinateTransformer for &T {
    fn x(&self, lon: f64) -> f64 {
        (**self).x(lon)
    }

    fn y(&self, lat: f64) -> f64 {
        (**self).y(lat)
    }
}
