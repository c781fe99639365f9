//! Batch job files.
//!
//! A job file lists viewports and tiles to evaluate in one run:
//!
//! ```yaml
//! tile_size: 256
//! viewports:
//!   - name: europe
//!     bbox: { lon1: -10, lat1: 50, lon2: 10, lat2: 40 }
//!     width: 200
//!     height: 100
//!     points: [[0.0, 45.0]]
//! tiles:
//!   - tile: "3/4/2"
//!     points: [[13.4, 52.5]]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use geo_common::{GeoBBox, TileCoord};
use serde::{Deserialize, Deserializer};
use tracing::info;

use projection::DEFAULT_TILE_SIZE;

/// Root of a YAML job file.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Raster size for tile entries that do not set their own
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default)]
    pub viewports: Vec<ViewportJob>,
    #[serde(default)]
    pub tiles: Vec<TileJob>,
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportJob {
    #[serde(default)]
    pub name: Option<String>,
    pub bbox: GeoBBox,
    pub width: u32,
    pub height: u32,
    /// `[lon, lat]` pairs to project
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileJob {
    /// Tile id as `"z/x/y"`
    #[serde(deserialize_with = "deserialize_tile")]
    pub tile: TileCoord,
    #[serde(default)]
    pub tile_width: Option<u32>,
    #[serde(default)]
    pub tile_height: Option<u32>,
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

fn deserialize_tile<'de, D>(deserializer: D) -> Result<TileCoord, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl JobConfig {
    /// Load a job from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {:?}", path))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse job file: {:?}", path))?;

        info!(
            viewports = config.viewports.len(),
            tiles = config.tiles.len(),
            "Loaded job from {:?}",
            path
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
