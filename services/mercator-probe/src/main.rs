//! Mercator probe.
//!
//! Prints, as JSON, how a bounding box fits into a raster or which
//! geographic area a tile covers, and where given points land in pixels.

mod config;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use geo_common::{GeoBBox, TileCoord};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use config::JobConfig;
use projection::DEFAULT_TILE_SIZE;

#[derive(Parser, Debug)]
#[command(name = "mercator-probe")]
#[command(about = "Inspect spherical Mercator viewport and tile transforms")]
struct Args {
    /// Log level, used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a bounding box into a raster
    Viewport {
        /// Bounding box as west,north,east,south
        #[arg(long, allow_hyphen_values = true)]
        bbox: GeoBBox,

        /// Raster width in pixels
        #[arg(long)]
        width: u32,

        /// Raster height in pixels
        #[arg(long)]
        height: u32,

        /// Point to project, as lon,lat (repeatable)
        #[arg(long = "point", allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<(f64, f64)>,
    },

    /// Show the bounds of a tile
    Tile {
        /// Tile id as z/x/y
        #[arg(long)]
        tile: TileCoord,

        #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
        tile_width: u32,

        #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
        tile_height: u32,

        /// Point to project, as lon,lat (repeatable)
        #[arg(long = "point", allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<(f64, f64)>,
    },

    /// Find the tile containing a point
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long)]
        zoom: u32,
    },

    /// Run every entry of a YAML job file
    Job {
        /// Job file path
        #[arg(short, long, env = "MERCATOR_JOB")]
        config: PathBuf,
    },
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected lon,lat, got '{}'", s))?;
    let lon = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon))?;
    let lat = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat))?;
    Ok((lon, lat))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(command = ?args.command, "Parsed arguments");

    match args.command {
        Command::Viewport {
            bbox,
            width,
            height,
            points,
        } => {
            let report = report::viewport_report(None, bbox, width, height, &points)?;
            print_json(&report, args.pretty)
        }
        Command::Tile {
            tile,
            tile_width,
            tile_height,
            points,
        } => {
            let report = report::tile_report(tile, tile_width, tile_height, &points);
            print_json(&report, args.pretty)
        }
        Command::Locate { lon, lat, zoom } => {
            print_json(&report::locate_report(lon, lat, zoom)?, args.pretty)
        }
        Command::Job { config } => {
            let job = JobConfig::load(&config)?;
            let reports = report::run_job(&job)?;
            info!(count = reports.len(), "Job finished");
            print_json(&reports, args.pretty)
        }
    }
}
