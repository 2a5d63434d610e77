use serde::{Deserialize, Serialize};

use crate::{Error, Kilometers, tiling::validate_tiling};

/// Parameters of a search along a route segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Off-route tolerance: corridor half-width and distance normalization bound
    pub buffer_km: Kilometers,
    /// Edge length of a query tile
    pub tile_size_km: Kilometers,
    /// Overlap between adjacent tiles
    pub overlap_km: Kilometers,
    /// Count closeness to the route as a scoring metric
    pub use_distance: bool,
    /// Count cheapness as a scoring metric
    pub use_price: bool,
    /// Number of equal-width bins the segment is split into
    pub bin_count: usize,
    /// Maximum number of places selected per bin
    pub per_bin_limit: usize,
    /// Seed for the spreading draw
    pub rng_seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            buffer_km: 2.0,
            tile_size_km: 5.0,
            overlap_km: 0.5,
            use_distance: true,
            use_price: false,
            bin_count: 5,
            per_bin_limit: 2,
            rng_seed: 42,
        }
    }
}

impl SearchConfig {
    /// Checks every parameter before any work is done
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.buffer_km.is_finite() || self.buffer_km < 0.0 {
            return Err(Error::Config(format!(
                "buffer_km must be a finite value >= 0, got {}",
                self.buffer_km
            )));
        }
        validate_tiling(self.tile_size_km, self.overlap_km)?;
        if self.bin_count == 0 {
            return Err(Error::Config("bin_count must be > 0".to_string()));
        }
        if self.per_bin_limit == 0 {
            return Err(Error::Config("per_bin_limit must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "buffer_km": 1.5, "use_price": true }"#).unwrap();

        assert_eq!(config.buffer_km, 1.5);
        assert!(config.use_price);
        assert_eq!(config.bin_count, SearchConfig::default().bin_count);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            SearchConfig {
                buffer_km: -0.1,
                ..SearchConfig::default()
            },
            SearchConfig {
                tile_size_km: 0.0,
                ..SearchConfig::default()
            },
            SearchConfig {
                overlap_km: 0.0,
                ..SearchConfig::default()
            },
            SearchConfig {
                overlap_km: 6.0,
                ..SearchConfig::default()
            },
            SearchConfig {
                bin_count: 0,
                ..SearchConfig::default()
            },
            SearchConfig {
                per_bin_limit: 0,
                ..SearchConfig::default()
            },
        ];

        for config in cases {
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{config:?}");
        }
    }
}
