//! Geographic bounding box in west/north/east/south order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geographic bounding box in degrees.
///
/// Components follow raster order: `lon1`/`lat1` is the top-left
/// (north-west) corner and `lon2`/`lat2` the bottom-right (south-east)
/// corner. Nothing is validated on construction; use [`GeoBBox::normalized`]
/// to get a box that honours that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBBox {
    /// Western longitude
    pub lon1: f64,
    /// Northern latitude
    pub lat1: f64,
    /// Eastern longitude
    pub lon2: f64,
    /// Southern latitude
    pub lat2: f64,
}

impl GeoBBox {
    /// Create a new bounding box from west, north, east, south.
    pub fn new(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Self {
        Self {
            lon1,
            lat1,
            lon2,
            lat2,
        }
    }

    /// Copy of this box with `lon1 <= lon2` and `lat1 >= lat2`.
    pub fn normalized(&self) -> Self {
        let (lon1, lon2) = if self.lon1 > self.lon2 {
            (self.lon2, self.lon1)
        } else {
            (self.lon1, self.lon2)
        };
        let (lat1, lat2) = if self.lat1 < self.lat2 {
            (self.lat2, self.lat1)
        } else {
            (self.lat1, self.lat2)
        };
        Self {
            lon1,
            lat1,
            lon2,
            lat2,
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.lon1 <= self.lon2 && self.lat1 >= self.lat2
    }

    /// Longitude extent in degrees (east minus west).
    pub fn lon_span(&self) -> f64 {
        self.lon2 - self.lon1
    }

    /// Latitude extent in degrees (north minus south).
    pub fn lat_span(&self) -> f64 {
        self.lat1 - self.lat2
    }

    /// True when either span is zero or any component is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        self.as_array().iter().any(|v| !v.is_finite())
            || self.lon_span() == 0.0
            || self.lat_span() == 0.0
    }

    /// Check if `other` lies completely inside this box (edges included).
    pub fn contains(&self, other: &GeoBBox) -> bool {
        self.contains_approx(other, 0.0)
    }

    /// Like [`contains`](Self::contains), allowing each edge to miss by `eps` degrees.
    pub fn contains_approx(&self, other: &GeoBBox, eps: f64) -> bool {
        self.lon1 <= other.lon1 + eps
            && self.lon2 >= other.lon2 - eps
            && self.lat1 >= other.lat1 - eps
            && self.lat2 <= other.lat2 + eps
    }

    /// Check if a point is contained within this box.
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon1 && lon <= self.lon2 && lat <= self.lat1 && lat >= self.lat2
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.lon1, self.lat1, self.lon2, self.lat2]
    }

    /// Generate a cache key fragment for this bbox (quantized to avoid floating point issues).
    pub fn cache_key(&self) -> String {
        format!(
            "{:.6}_{:.6}_{:.6}_{:.6}",
            self.lon1, self.lat1, self.lon2, self.lat2
        )
    }
}

impl fmt::Display for GeoBBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.lon1, self.lat1, self.lon2, self.lat2)
    }
}

/// Parses `"lon1,lat1,lon2,lat2"` (west, north, east, south).
impl FromStr for GeoBBox {
    type Err = BboxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'lon1,lat1,lon2,lat2'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
