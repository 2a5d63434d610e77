use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Value as JsonValue, json};

use crate::{Error, SelectedPlace, geometry::CorridorPolygon, tiling::Tile};

fn feature(geometry: Geometry, properties: JsonValue) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: properties.as_object().cloned(),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

/// Corridor region as a single feature
pub fn corridor_to_feature(corridor: &CorridorPolygon) -> Feature {
    let region = corridor.region();
    let geometry = match region.0.as_slice() {
        [polygon] => Geometry::new(GeoJsonValue::from(polygon)),
        _ => Geometry::new(GeoJsonValue::from(region)),
    };
    let segment = corridor.segment();

    feature(
        geometry,
        json!({
            "kind": "corridor",
            "start_km": segment.start_km(),
            "end_km": segment.end_km(),
            "buffer_km": corridor.buffer_km(),
        }),
    )
}

/// Query tiles as rectangle polygons, in tiling order
pub fn tiles_to_geojson(tiles: &[Tile]) -> FeatureCollection {
    collection(
        tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                feature(
                    Geometry::new(GeoJsonValue::from(&tile.rect().to_polygon())),
                    json!({
                        "kind": "tile",
                        "index": index,
                        "row": tile.row,
                        "col": tile.col,
                    }),
                )
            })
            .collect(),
    )
}

/// Shortlisted places as point features; the composite score is not exported
pub fn selected_to_geojson(selected: &[SelectedPlace]) -> FeatureCollection {
    collection(
        selected
            .iter()
            .map(|s| {
                let point = Point::new(s.place.lon, s.place.lat);
                feature(
                    Geometry::new(GeoJsonValue::from(&point)),
                    json!({
                        "name": s.place.name,
                        "place_id": s.place.place_id,
                        "rating": s.place.rating,
                        "price_level": s.place.price_level,
                        "distance_km_off_route": s.distance_km_off_route,
                        "km_marker": s.nearest_km_marker,
                    }),
                )
            })
            .collect(),
    )
}

pub fn selected_to_geojson_string(selected: &[SelectedPlace]) -> Result<String, Error> {
    serde_json::to_string(&selected_to_geojson(selected))
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlaceRecord, Route, geometry::build_corridor, tiling::tile};

    fn selected() -> SelectedPlace {
        SelectedPlace {
            place: PlaceRecord::new("Pepe in Grani", 41.2, 14.3).with_rating(4.7),
            distance_km_off_route: 0.4,
            nearest_km_marker: 12.5,
            composite_score: 0.93,
        }
    }

    #[test]
    fn selected_places_hide_the_score() {
        let text = selected_to_geojson_string(&[selected()]).unwrap();

        assert!(text.contains("Pepe in Grani"));
        assert!(text.contains("km_marker"));
        assert!(!text.contains("composite"));
        assert!(!text.contains("0.93"));
    }

    #[test]
    fn corridor_and_tiles_export() {
        let route = Route::build(&[(45.0, 7.0), (45.2, 7.0)]).unwrap();
        let segment = route.segment(2.0, 18.0).unwrap();
        let corridor = build_corridor(&route, &segment, 1.0).unwrap();
        let tiles = tile(&corridor, 5.0, 1.0).unwrap();

        let feature = corridor_to_feature(&corridor);
        assert!(feature.geometry.is_some());
        let properties = feature.properties.unwrap();
        assert_eq!(properties["kind"], "corridor");
        assert_eq!(properties["buffer_km"], 1.0);

        let collection = tiles_to_geojson(&tiles);
        assert_eq!(collection.features.len(), tiles.len());
    }
}
