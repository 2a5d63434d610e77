//! Command-line front end: finds pizza stops along a stretch of a cycling route.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use geo::Point;
use pizzaroute::{OutputFormat, load_places, load_route, render};
use pizzaroute_core::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{SearchOverrides, resolve as resolve_config};

#[derive(Parser, Debug)]
#[command(name = "pizzaroute", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortlist places spread along a route segment
    Shortlist {
        /// Route file (.wkt, .geojson, .json or .csv)
        #[arg(long)]
        route: PathBuf,
        /// JSON array of candidate places
        #[arg(long)]
        places: PathBuf,
        #[arg(long)]
        start_km: f64,
        #[arg(long)]
        end_km: f64,
        /// TOML file with a [search] table
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[command(flatten)]
        overrides: SearchOverrides,
    },
    /// Print the corridor and its query tiles as GeoJSON
    Corridor {
        #[arg(long)]
        route: PathBuf,
        #[arg(long)]
        start_km: f64,
        #[arg(long)]
        end_km: f64,
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        overrides: SearchOverrides,
    },
    /// Print the km marker nearest to a point and its distance off the route
    Locate {
        #[arg(long)]
        route: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Geojson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Geojson => OutputFormat::GeoJson,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Shortlist {
            route,
            places,
            start_km,
            end_km,
            config,
            format,
            overrides,
        } => {
            let config = resolve_config(config.as_deref(), &overrides)?;
            let route = load_route(&route)
                .with_context(|| format!("Failed to load route {}", route.display()))?;
            let candidates = load_places(&places)
                .with_context(|| format!("Failed to load places {}", places.display()))?;
            info!(
                route_km = route.total_distance_km(),
                candidates = candidates.len(),
                "inputs_loaded"
            );

            let segment = route.segment(start_km, end_km)?;
            let provider = InMemoryPlacesProvider::new(candidates);
            let selected = search(&route, &segment, &config, &provider)?;
            info!(selected = selected.len(), "shortlist_ready");

            println!("{}", render(&selected, format.into())?);
        }
        Command::Corridor {
            route,
            start_km,
            end_km,
            config,
            overrides,
        } => {
            let config = resolve_config(config.as_deref(), &overrides)?;
            let route = load_route(&route)
                .with_context(|| format!("Failed to load route {}", route.display()))?;
            let segment = route.segment(start_km, end_km)?;
            let area = search_area(&route, &segment, &config)?;

            let mut collection = tiles_to_geojson(&area.tiles);
            collection
                .features
                .insert(0, corridor_to_feature(&area.corridor));
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        Command::Locate { route, lat, lon } => {
            let route = load_route(&route)
                .with_context(|| format!("Failed to load route {}", route.display()))?;
            let projection = nearest_point_on_route(Point::new(lon, lat), &route);
            info!(route_km = route.total_distance_km(), "located");

            let output = serde_json::json!({
                "km_marker": projection.cumulative_km,
                "distance_km_off_route": projection.distance_km,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
