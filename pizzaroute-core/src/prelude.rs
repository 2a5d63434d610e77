// Configuration and errors
pub use crate::{Error, Kilometers, SearchConfig};

// Route model and geometry
pub use crate::geometry::{
    CorridorPolygon, RouteProjection, build_corridor, great_circle_km, nearest_point_on_route,
};
pub use crate::locator::locate;
pub use crate::model::{Route, RoutePoint, Segment};
pub use crate::tiling::{Tile, tile};

// Places, scoring and spreading
pub use crate::model::{LocatedPlace, PlaceRecord, ScoredPlace, SelectedPlace};
pub use crate::provider::{InMemoryPlacesProvider, PlacesProvider, ProviderError, dedup_places};
pub use crate::scoring::score;
pub use crate::spreading::spread;

// Search orchestration and export
pub use crate::export::{
    corridor_to_feature, selected_to_geojson, selected_to_geojson_string, tiles_to_geojson,
};
pub use crate::search::{SearchArea, search, search_area};
