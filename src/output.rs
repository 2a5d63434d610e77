use pizzaroute_core::{SelectedPlace, export::selected_to_geojson};

use crate::LoadError;

/// Shortlist renderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Array of place objects with distance and km marker
    #[default]
    Json,
    /// `FeatureCollection` of points
    GeoJson,
}

/// Renders the shortlist. Internal scores never appear in either format.
pub fn render(selected: &[SelectedPlace], format: OutputFormat) -> Result<String, LoadError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(selected)?),
        OutputFormat::GeoJson => Ok(serde_json::to_string_pretty(&selected_to_geojson(
            selected,
        ))?),
    }
}
