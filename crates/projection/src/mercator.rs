//! Spherical (Web) Mercator projection on the WGS84 sphere.
//!
//! Coordinates are expressed on a square "world" whose side is `world_size`
//! units long: longitude -180° maps to x = 0, the north edge of the
//! projection (about 85.0511°N) maps to y = 0, and y grows southward. The
//! unscaled variants use a unit world (`world_size = 1`).
//!
//! No clamping is applied. Latitudes beyond [`MAX_LATITUDE`] project outside
//! the world square (the poles themselves only as far as `tan` allows in
//! floating point), and the inverse functions accept any input, which makes
//! it possible to address tiles outside the regular grid.

use std::f64::consts::PI;

/// Latitude where the Mercator world square ends: `atan(sinh(π))` in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Longitude to x on the unit world.
#[inline]
pub fn lon2merc(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Latitude to y on the unit world.
#[inline]
pub fn lat2merc(lat: f64) -> f64 {
    let phi = lat.to_radians();
    (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / PI) / 2.0
}

/// Longitude to x on a world of `world_size` units.
#[inline]
pub fn lon2merc_scaled(lon: f64, world_size: f64) -> f64 {
    lon2merc(lon) * world_size
}

/// Latitude to y on a world of `world_size` units.
#[inline]
pub fn lat2merc_scaled(lat: f64, world_size: f64) -> f64 {
    lat2merc(lat) * world_size
}

/// Inverse of [`lon2merc_scaled`].
#[inline]
pub fn merc2lon(x: f64, world_size: f64) -> f64 {
    x / world_size * 360.0 - 180.0
}

/// Inverse of [`lat2merc_scaled`].
#[inline]
pub fn merc2lat(y: f64, world_size: f64) -> f64 {
    (PI * (1.0 - 2.0 * y / world_size))
        .sinh()
        .atan()
        .to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_unit_world_corners() {
        assert!((lon2merc(-180.0)).abs() < EPS);
        assert!((lon2merc(180.0) - 1.0).abs() < EPS);
        assert!((lat2merc(0.0) - 0.5).abs() < EPS);
        assert!((lat2merc(MAX_LATITUDE)).abs() < EPS);
        assert!((lat2merc(-MAX_LATITUDE) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_inverse_of_world_edges() {
        assert!((merc2lat(0.0, 256.0) - MAX_LATITUDE).abs() < EPS);
        assert!((merc2lat(256.0, 256.0) + MAX_LATITUDE).abs() < EPS);
        assert!((merc2lon(128.0, 256.0)).abs() < EPS);
    }

    #[test]
    fn test_roundtrip() {
        for world_size in [1.0, 256.0, 1_048_576.0, 0.37] {
            for lon in [-180.0, -97.5, -0.001, 0.0, 13.4, 179.99] {
                let back = merc2lon(lon2merc_scaled(lon, world_size), world_size);
                assert!((back - lon).abs() < 1e-9, "lon {} -> {}", lon, back);
            }
            for lat in [-85.0, -45.0, -0.5, 0.0, 38.5, 52.52, 85.0] {
                let back = merc2lat(lat2merc_scaled(lat, world_size), world_size);
                assert!((back - lat).abs() < 1e-9, "lat {} -> {}", lat, back);
            }
        }
    }

    #[test]
    fn test_pole_is_not_clamped() {
        assert!(lat2merc(89.0) < 0.0);
        assert!(lat2merc(-89.0) > 1.0);
        assert!(lat2merc(90.0) < lat2merc(89.0));
    }

    #[test]
    fn test_y_grows_southward() {
        assert!(lat2merc(50.0) < lat2merc(40.0));
    }
}
