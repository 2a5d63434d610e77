//! Core pipeline for finding places along a cycling route segment.
//!
//! The pipeline turns a route and a segment of it into a buffered corridor,
//! decomposes the corridor into query tiles, scores the place records a
//! provider returns for those tiles, and spreads a shortlist of them along
//! the segment.
//!
//! Every stage is a pure function. Randomness in the spreading stage comes
//! from an explicit seed, so identical inputs always produce identical output.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod locator;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod scoring;
pub mod search;
pub mod spreading;
pub mod tiling;

pub use config::SearchConfig;
pub use error::Error;
pub use model::{
    LocatedPlace, PlaceRecord, Route, RoutePoint, ScoredPlace, Segment, SelectedPlace,
};

/// Distance along or off the route, in kilometres
pub type Kilometers = f64;

/// Mean earth radius used for all great-circle computations.
/// Matches the radius `geo::Haversine` measures with.
pub const EARTH_RADIUS_KM: Kilometers = 6371.0088;

/// Length of one degree of latitude on the mean-radius sphere
pub const KM_PER_DEGREE: Kilometers = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
