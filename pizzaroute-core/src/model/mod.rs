//! Value types flowing through the pipeline
//!
//! Route → Segment on the geometry side, PlaceRecord → ScoredPlace →
//! LocatedPlace → SelectedPlace on the places side.

pub mod place;
pub mod route;

pub use place::{LocatedPlace, PlaceRecord, ScoredPlace, SelectedPlace};
pub use route::{Route, RoutePoint, Segment};
