//! Conversion of pipeline outputs to GeoJSON for rendering

mod to_geojson;

pub use to_geojson::{
    corridor_to_feature, selected_to_geojson, selected_to_geojson_string, tiles_to_geojson,
};
