//! JSON reports for evaluated transforms.

use anyhow::{Context, Result};
use geo_common::{GeoBBox, TileCoord};
use projection::{CoordinateTransformer, TileTransform, ViewportTransform};
use serde::Serialize;

use crate::config::{JobConfig, TileJob, ViewportJob};

/// A projected point and whether it falls on the raster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointReport {
    pub lon: f64,
    pub lat: f64,
    pub x: f64,
    pub y: f64,
    pub inside: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewportReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: u32,
    pub height: u32,
    pub world_size: f64,
    pub sx: f64,
    pub sy: f64,
    pub zoom_level: f64,
    pub defining: GeoBBox,
    pub visible: GeoBBox,
    pub points: Vec<PointReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileReport {
    /// `"z x y"` identity
    pub tile: String,
    pub key: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub bbox: GeoBBox,
    pub points: Vec<PointReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocateReport {
    pub lon: f64,
    pub lat: f64,
    pub tile: TileCoord,
    pub key: String,
    pub bbox: GeoBBox,
    /// Position inside the tile
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobReport {
    Viewport(ViewportReport),
    Tile(TileReport),
}

/// How the far raster edges count when deciding whether a point is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edges {
    /// `[0, width] x [0, height]`: a fitted viewport includes its border.
    Closed,
    /// `[0, width) x [0, height)`: the east and south edges belong to the
    /// neighbouring tile.
    HalfOpen,
}

impl Edges {
    fn contains(self, x: f64, y: f64, width: u32, height: u32) -> bool {
        let w = f64::from(width);
        let h = f64::from(height);
        match self {
            Edges::Closed => (0.0..=w).contains(&x) && (0.0..=h).contains(&y),
            Edges::HalfOpen => (0.0..w).contains(&x) && (0.0..h).contains(&y),
        }
    }
}

/// Project points with any transform onto a `width` x `height` raster.
pub fn project_points(
    transform: &dyn CoordinateTransformer,
    points: &[(f64, f64)],
    width: u32,
    height: u32,
    edges: Edges,
) -> Vec<PointReport> {
    points
        .iter()
        .map(|&(lon, lat)| {
            let (x, y) = transform.project(lon, lat);
            PointReport {
                lon,
                lat,
                x,
                y,
                inside: edges.contains(x, y, width, height),
            }
        })
        .collect()
}

pub fn viewport_report(
    name: Option<String>,
    bbox: GeoBBox,
    width: u32,
    height: u32,
    points: &[(f64, f64)],
) -> Result<ViewportReport> {
    let transform = ViewportTransform::try_new(bbox, width, height)
        .with_context(|| format!("Cannot fit {} into {}x{}", bbox, width, height))?;

    Ok(ViewportReport {
        name,
        width,
        height,
        world_size: transform.world_size(),
        sx: transform.sx(),
        sy: transform.sy(),
        zoom_level: transform.zoom_level(projection::DEFAULT_TILE_SIZE),
        defining: transform.defining_bbox(),
        visible: transform.visible_bbox(),
        points: project_points(&transform, points, width, height, Edges::Closed),
    })
}

pub fn tile_report(
    coord: TileCoord,
    tile_width: u32,
    tile_height: u32,
    points: &[(f64, f64)],
) -> TileReport {
    let transform = TileTransform::with_size(coord.z, coord.x, coord.y, tile_width, tile_height);
    if !coord.is_valid() {
        tracing::warn!(tile = %coord, "Tile lies outside the regular grid");
    }

    TileReport {
        tile: transform.to_string(),
        key: coord.cache_key(),
        tile_width,
        tile_height,
        bbox: transform.bbox(),
        points: project_points(&transform, points, tile_width, tile_height, Edges::HalfOpen),
    }
}

pub fn locate_report(lon: f64, lat: f64, zoom: u32) -> Result<LocateReport> {
    let tile = TileTransform::containing(lon, lat, zoom)
        .with_context(|| format!("Cannot locate ({}, {}) at zoom {}", lon, lat, zoom))?;
    let transform = TileTransform::from_coord(tile);
    let (x, y) = transform.project(lon, lat);
    Ok(LocateReport {
        lon,
        lat,
        tile,
        key: tile.cache_key(),
        bbox: transform.bbox(),
        x,
        y,
    })
}

fn to_pairs(points: &[[f64; 2]]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p[0], p[1])).collect()
}

/// Evaluate every entry of a job file, viewports first.
pub fn run_job(config: &JobConfig) -> Result<Vec<JobReport>> {
    let mut reports = Vec::with_capacity(config.viewports.len() + config.tiles.len());

    for (index, job) in config.viewports.iter().enumerate() {
        let ViewportJob {
            name,
            bbox,
            width,
            height,
            points,
        } = job;
        let report = viewport_report(name.clone(), *bbox, *width, *height, &to_pairs(points))
            .with_context(|| format!("Viewport entry {} failed", index))?;
        reports.push(JobReport::Viewport(report));
    }

    for job in &config.tiles {
        let TileJob {
            tile,
            tile_width,
            tile_height,
            points,
        } = job;
        reports.push(JobReport::Tile(tile_report(
            *tile,
            tile_width.unwrap_or(config.tile_size),
            tile_height.unwrap_or(config.tile_size),
            &to_pairs(points),
        )));
    }

    Ok(reports)
}
