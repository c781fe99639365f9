//! Slippy-map tile addressing (zoom/x/y quad-tree).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tile coordinate (z/x/y).
///
/// Rows count from the north edge (XYZ scheme). No range check is made;
/// indices outside `[0, 2^z)` address tiles beyond the usual grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at this zoom, `2^z`.
    pub fn grid_size(&self) -> u64 {
        1u64.checked_shl(self.z).unwrap_or(u64::MAX)
    }

    /// True when both indices are inside the `2^z x 2^z` grid.
    pub fn is_valid(&self) -> bool {
        let n = self.grid_size();
        u64::from(self.x) < n && u64::from(self.y) < n
    }

    /// Generate a cache key string.
    pub fn cache_key(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }

    /// Get the parent tile (zoom - 1).
    pub fn parent(&self) -> Option<TileCoord> {
        if self.z == 0 {
            return None;
        }
        Some(TileCoord {
            z: self.z - 1,
            x: self.x / 2,
            y: self.y / 2,
        })
    }

    /// Get the four children tiles (zoom + 1), in NW, NE, SW, SE order.
    ///
    /// Returns `None` when a child index or the zoom would not fit in `u32`.
    pub fn children(&self) -> Option<[TileCoord; 4]> {
        let z = self.z.checked_add(1)?;
        let x = self.x.checked_mul(2)?;
        let y = self.y.checked_mul(2)?;
        let x1 = x.checked_add(1)?;
        let y1 = y.checked_add(1)?;
        Some([
            TileCoord { z, x, y },
            TileCoord { z, x: x1, y },
            TileCoord { z, x, y: y1 },
            TileCoord { z, x: x1, y: y1 },
        ])
    }

    /// Convert between XYZ and TMS row numbering (TMS counts from the south edge).
    ///
    /// Returns `None` for rows outside the grid.
    pub fn flip_y(&self) -> Option<TileCoord> {
        let max = self.grid_size().checked_sub(1)?;
        let y = max.checked_sub(u64::from(self.y))?;
        Some(TileCoord {
            z: self.z,
            x: self.x,
            y: u32::try_from(y).ok()?,
        })
    }
}

/// Space separated `"z x y"`, the identity used in log lines.
impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.z, self.x, self.y)
    }
}

/// Parses `"z/x/y"` or `"z x y"`.
impl FromStr for TileCoord {
    type Err = TileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = if s.contains('/') {
            s.split('/').map(str::trim).collect()
        } else {
            s.split_whitespace().collect()
        };
        if parts.len() != 3 {
            return Err(TileParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| TileParseError::InvalidNumber(part.to_string()))
        };

        Ok(TileCoord {
            z: parse(parts[0])?,
            x: parse(parts[1])?,
            y: parse(parts[2])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TileParseError {
    #[error("Invalid tile format: {0}. Expected 'z/x/y'")]
    InvalidFormat(String),

    #[error("Invalid tile index: {0}")]
    InvalidNumber(String),
}
