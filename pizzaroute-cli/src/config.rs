use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Args;
use pizzaroute_core::SearchConfig;
use serde::Deserialize;

/// Layout of the TOML config file
///
/// ```toml
/// [search]
/// buffer_km = 1.5
/// bin_count = 8
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub search: SearchConfig,
}

impl TomlConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Command-line overrides for individual search parameters
#[derive(Debug, Default, Clone, Args)]
pub struct SearchOverrides {
    /// Corridor half-width in km
    #[arg(long)]
    pub buffer_km: Option<f64>,
    /// Query tile edge length in km
    #[arg(long)]
    pub tile_size_km: Option<f64>,
    /// Overlap between adjacent tiles in km
    #[arg(long)]
    pub overlap_km: Option<f64>,
    /// Include closeness to the route in the score
    #[arg(long)]
    pub use_distance: Option<bool>,
    /// Include cheapness in the score
    #[arg(long)]
    pub use_price: Option<bool>,
    /// Number of bins along the segment
    #[arg(long)]
    pub bin_count: Option<usize>,
    /// Places kept per bin
    #[arg(long)]
    pub per_bin_limit: Option<usize>,
    /// Seed for the spreading draw
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SearchOverrides {
    pub fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(buffer_km) = self.buffer_km {
            config.buffer_km = buffer_km;
        }
        if let Some(tile_size_km) = self.tile_size_km {
            config.tile_size_km = tile_size_km;
        }
        if let Some(overlap_km) = self.overlap_km {
            config.overlap_km = overlap_km;
        }
        if let Some(use_distance) = self.use_distance {
            config.use_distance = use_distance;
        }
        if let Some(use_price) = self.use_price {
            config.use_price = use_price;
        }
        if let Some(bin_count) = self.bin_count {
            config.bin_count = bin_count;
        }
        if let Some(per_bin_limit) = self.per_bin_limit {
            config.per_bin_limit = per_bin_limit;
        }
        if let Some(seed) = self.seed {
            config.rng_seed = seed;
        }
        config
    }
}

/// Defaults, then the config file if given, then command-line overrides
pub fn resolve(path: Option<&Path>, overrides: &SearchOverrides) -> anyhow::Result<SearchConfig> {
    let base = match path {
        Some(path) => TomlConfig::from_file(path)?.search,
        None => SearchConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("Invalid search configuration")?;
    Ok(config)
}
