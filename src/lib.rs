//! File-format adapters around the `pizzaroute_core` pipeline.
//!
//! Loads routes (WKT, GeoJSON, CSV) and place records (JSON), and renders
//! the final shortlist as JSON or GeoJSON for display.

pub mod error;
pub mod output;
pub mod places_input;
pub mod route_input;

pub use error::LoadError;
pub use output::{OutputFormat, render};
pub use places_input::{load_places, parse_places};
pub use route_input::{RouteFormat, load_route, parse_route};

pub use pizzaroute_core;
