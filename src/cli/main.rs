//! Command line front end for polygon fetching.
//!
//! Prints the resulting GeoJSON geometry (or list of geometries) to stdout;
//! logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use polyfetch::{Config, OutputGeometry, PolygonFetcher, SelectionPolicy};

#[derive(Parser, Debug)]
#[command(name = "polyfetch")]
#[command(about = "Fetch and combine administrative boundary polygons from OpenStreetMap")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Nominatim search endpoint (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Candidate selection policy (overrides the config file)
    #[arg(long, value_enum)]
    selection: Option<SelectionPolicy>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One geometry per area
    Fetch {
        #[arg(required = true)]
        areas: Vec<String>,
    },
    /// All areas merged into one geometry
    Combine {
        #[arg(required = true)]
        areas: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.osm.endpoint = endpoint.clone();
    }
    if let Some(selection) = args.selection {
        config.osm.selection = selection;
    }

    // Initialize logging
    let filter = EnvFilter::try_new(&config.logging.level)
        .with_context(|| format!("Invalid log level '{}'", config.logging.level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let fetcher =
        PolygonFetcher::from_config(&config.osm).context("Failed to set up OSM resolver")?;

    match args.command {
        Command::Fetch { areas } => {
            let geometries = fetcher.fetch_polygons(&areas).await?;
            for (area, geometry) in areas.iter().zip(&geometries) {
                summarize(area, geometry);
            }
            print_json(&geometries, args.compact)?;
        }
        Command::Combine { areas } => {
            let geometry = fetcher.combine_polygons(&areas).await?;
            summarize(&areas.join(", "), &geometry);
            print_json(&geometry, args.compact)?;
        }
    }

    Ok(())
}

fn summarize(label: &str, geometry: &OutputGeometry) {
    match geometry.bbox() {
        Some((min_lon, min_lat, max_lon, max_lat)) => info!(
            "{}: {:?} with {} polygons, bbox [{}, {}, {}, {}]",
            label,
            geometry.kind,
            geometry.polygon_count(),
            min_lon,
            min_lat,
            max_lon,
            max_lat
        ),
        None => info!("{}: {:?} (no polygon geometry)", label, geometry.kind),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
