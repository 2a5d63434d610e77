//! End-to-end search along a route segment

use log::{debug, info};

use crate::{
    Error, LocatedPlace, PlaceRecord, Route, SearchConfig, Segment, SelectedPlace,
    geometry::{CorridorPolygon, build_corridor, nearest_point_on_route},
    provider::{PlacesProvider, dedup_places},
    scoring::score,
    spreading::spread,
    tiling::{Tile, tile},
};

/// Corridor and tiles for a segment, the part of a search that needs no provider
#[derive(Debug, Clone)]
pub struct SearchArea {
    pub corridor: CorridorPolygon,
    pub tiles: Vec<Tile>,
}

/// Builds the corridor and its query tiles.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the segment does
/// not fit the route.
pub fn search_area(
    route: &Route,
    segment: &Segment,
    config: &SearchConfig,
) -> Result<SearchArea, Error> {
    config.validate()?;

    let corridor = build_corridor(route, segment, config.buffer_km)?;
    let tiles = tile(&corridor, config.tile_size_km, config.overlap_km)?;

    Ok(SearchArea { corridor, tiles })
}

/// Runs the full pipeline: corridor, tiles, fetch, scoring and spreading.
///
/// # Errors
///
/// Returns [`Error::Config`] or [`Error::Range`] for invalid input and
/// [`Error::Upstream`] when the provider fails.
pub fn search(
    route: &Route,
    segment: &Segment,
    config: &SearchConfig,
    provider: &dyn PlacesProvider,
) -> Result<Vec<SelectedPlace>, Error> {
    let SearchArea { corridor, tiles } = search_area(route, segment, config)?;
    info!(
        "Searching km {:.1}-{:.1} with a {} km corridor over {} tiles",
        segment.start_km(),
        segment.end_km(),
        config.buffer_km,
        tiles.len()
    );

    let records = provider.fetch(&tiles).map_err(Error::Upstream)?;
    let fetched = records.len();
    let records = dedup_places(records);
    debug!("Fetched {fetched} records, {} unique", records.len());

    let candidates = locate_candidates(route, &corridor, config, records);
    debug!("{} places inside the corridor", candidates.len());

    let selected = spread(
        candidates,
        segment,
        config.bin_count,
        config.per_bin_limit,
        config.rng_seed,
    )?;
    info!("Selected {} places", selected.len());
    for place in &selected {
        debug!(
            "Selected {} at km {:.2}, {:.2} km off route, score {:.3}",
            place.place.name,
            place.nearest_km_marker,
            place.distance_km_off_route,
            place.composite_score
        );
    }

    Ok(selected)
}

/// Scores and locates the records inside the corridor
fn locate_candidates(
    route: &Route,
    corridor: &CorridorPolygon,
    config: &SearchConfig,
    records: Vec<PlaceRecord>,
) -> Vec<LocatedPlace> {
    records
        .into_iter()
        .filter(|record| corridor.contains(record.geometry()))
        .map(|record| {
            let nearest = nearest_point_on_route(record.geometry(), route);
            let scored = score(
                record,
                nearest.distance_km,
                config.buffer_km,
                config.use_distance,
                config.use_price,
            );
            LocatedPlace {
                scored,
                km_marker: nearest.cumulative_km,
            }
        })
        .collect()
}
