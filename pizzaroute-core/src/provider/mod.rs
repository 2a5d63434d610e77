//! Places fetch capability
//!
//! A provider turns query tiles into raw place records. Records come back
//! in no particular order and a place inside overlapping tiles may be
//! returned more than once, so callers deduplicate with [`dedup_places`]
//! before scoring.

mod dedup;
mod in_memory;

pub use dedup::{PlaceKey, dedup_places};
pub use in_memory::InMemoryPlacesProvider;

use crate::{PlaceRecord, tiling::Tile};

/// Error type providers report; surfaced to callers unchanged
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Source of place records for a set of tiles
pub trait PlacesProvider {
    /// Fetches the records located in `tiles`.
    ///
    /// A tile the provider has nothing for contributes no records. A
    /// failure the provider cannot recover from is returned as an error.
    fn fetch(&self, tiles: &[Tile]) -> Result<Vec<PlaceRecord>, ProviderError>;
}
