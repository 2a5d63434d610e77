//! Place records and the entities derived from them along the pipeline

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Kilometers;

/// Raw point of interest as supplied by a places provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Stable identifier assigned by the provider, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Average rating in `0..=5`
    #[serde(default)]
    pub rating: Option<f64>,
    /// Price level in `1..=4`
    #[serde(default)]
    pub price_level: Option<u8>,
}

impl PlaceRecord {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            place_id: None,
            name: name.into(),
            lat,
            lon,
            rating: None,
            price_level: None,
        }
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_price_level(mut self, price_level: u8) -> Self {
        self.price_level = Some(price_level);
        self
    }

    #[must_use]
    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }

    /// Location as a `geo` point (`x` = longitude)
    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Place record with its normalized metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlace {
    pub place: PlaceRecord,
    /// Crow-flies distance from the route used for scoring
    pub distance_km: Kilometers,
    pub normalized_rating: Option<f64>,
    pub normalized_price: Option<f64>,
    pub normalized_distance: Option<f64>,
    /// Mean of the metrics present, in `0..=1`
    pub composite_score: f64,
    /// No metric was available; the place ranks after every scored one
    pub unscored: bool,
}

/// Scored place annotated with its position along the route
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedPlace {
    pub scored: ScoredPlace,
    pub km_marker: Kilometers,
}

/// Place chosen for the final shortlist.
///
/// The composite score stays crate-private and only feeds the selection
/// log; consumers only see the place, its offset from the route and its
/// km marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedPlace {
    #[serde(flatten)]
    pub place: PlaceRecord,
    pub distance_km_off_route: Kilometers,
    pub nearest_km_marker: Kilometers,
    #[serde(skip)]
    pub(crate) composite_score: f64,
}

impl From<LocatedPlace> for SelectedPlace {
    fn from(located: LocatedPlace) -> Self {
        Self {
            distance_km_off_route: located.scored.distance_km,
            nearest_km_marker: located.km_marker,
            composite_score: located.scored.composite_score,
            place: located.scored.place,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_keeps_score_but_does_not_serialize_it() {
        let located = LocatedPlace {
            scored: ScoredPlace {
                place: PlaceRecord::new("Concettina ai Tre Santi", 40.85, 14.25).with_rating(4.8),
                distance_km: 0.6,
                normalized_rating: Some(0.96),
                normalized_price: None,
                normalized_distance: Some(0.7),
                composite_score: 0.83,
                unscored: false,
            },
            km_marker: 17.2,
        };

        let selected = SelectedPlace::from(located);
        assert_eq!(selected.composite_score, 0.83);
        assert_eq!(selected.nearest_km_marker, 17.2);
        assert_eq!(selected.distance_km_off_route, 0.6);

        let value = serde_json::to_value(&selected).unwrap();
        assert_eq!(value["name"], "Concettina ai Tre Santi");
        assert!(value.get("composite_score").is_none());
    }
}
