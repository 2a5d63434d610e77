//! Normalization of place attributes into a bounded composite score

use crate::{Kilometers, PlaceRecord, ScoredPlace};

/// Highest rating a provider reports
pub const MAX_RATING: f64 = 5.0;
/// Highest price level a provider reports
pub const MAX_PRICE_LEVEL: u8 = 4;

/// Scores a place record.
///
/// The rating counts whenever the record has one. Price and distance count
/// only when enabled and available. The composite score is the mean of the
/// metrics present; a place with no metric at all scores zero and is marked
/// unscored.
pub fn score(
    place: PlaceRecord,
    distance_km: Kilometers,
    max_distance_km: Kilometers,
    use_distance: bool,
    use_price: bool,
) -> ScoredPlace {
    let distance_km = distance_km.max(0.0);

    let normalized_rating = place.rating.map(normalize_rating);
    let normalized_price = place
        .price_level
        .filter(|_| use_price)
        .map(normalize_price);
    let normalized_distance =
        use_distance.then(|| normalize_distance(distance_km, max_distance_km));

    let metrics: Vec<f64> = [normalized_rating, normalized_price, normalized_distance]
        .into_iter()
        .flatten()
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let composite_score = if metrics.is_empty() {
        0.0
    } else {
        metrics.iter().sum::<f64>() / metrics.len() as f64
    };

    ScoredPlace {
        place,
        distance_km,
        normalized_rating,
        normalized_price,
        normalized_distance,
        composite_score,
        unscored: metrics.is_empty(),
    }
}

fn normalize_rating(rating: f64) -> f64 {
    (rating / MAX_RATING).clamp(0.0, 1.0)
}

/// Cheaper is better
fn normalize_price(price_level: u8) -> f64 {
    1.0 - f64::from(price_level.min(MAX_PRICE_LEVEL)) / f64::from(MAX_PRICE_LEVEL)
}

/// Closer is better; anything beyond `max_distance_km` scores zero
fn normalize_distance(distance_km: Kilometers, max_distance_km: Kilometers) -> f64 {
    if max_distance_km > 0.0 {
        (1.0 - distance_km / max_distance_km).clamp(0.0, 1.0)
    } else if distance_km == 0.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn place() -> PlaceRecord {
        PlaceRecord::new("Da Michele", 40.85, 14.26)
    }

    #[test]
    fn rating_only_when_price_is_missing() {
        let scored = score(place().with_rating(4.0), 0.5, 2.0, false, true);

        assert_relative_eq!(scored.composite_score, 0.8);
        assert_eq!(scored.normalized_price, None);
        assert_eq!(scored.normalized_distance, None);
        assert!(!scored.unscored);
    }

    #[test]
    fn mean_of_all_enabled_metrics() {
        let record = place().with_rating(4.5).with_price_level(2);
        let scored = score(record, 0.5, 2.0, true, true);

        assert_relative_eq!(scored.normalized_rating.unwrap(), 0.9);
        assert_relative_eq!(scored.normalized_price.unwrap(), 0.5);
        assert_relative_eq!(scored.normalized_distance.unwrap(), 0.75);
        assert_relative_eq!(scored.composite_score, (0.9 + 0.5 + 0.75) / 3.0);
    }

    #[test]
    fn disabled_metrics_are_ignored() {
        let record = place().with_rating(3.0).with_price_level(1);
        let scored = score(record, 1.9, 2.0, false, false);

        assert_relative_eq!(scored.composite_score, 0.6);
    }

    #[test]
    fn no_metrics_means_unscored() {
        let scored = score(place().with_price_level(2), 0.1, 2.0, false, false);

        assert_relative_eq!(scored.composite_score, 0.0);
        assert!(scored.unscored);
    }

    #[test]
    fn distance_is_clamped() {
        let far = score(place(), 5.0, 2.0, true, false);
        assert_relative_eq!(far.normalized_distance.unwrap(), 0.0);

        let on_line = score(place(), 0.0, 0.0, true, false);
        assert_relative_eq!(on_line.normalized_distance.unwrap(), 1.0);

        let negative = score(place(), -1.0, 2.0, true, false);
        assert_relative_eq!(negative.distance_km, 0.0);
        assert_relative_eq!(negative.normalized_distance.unwrap(), 1.0);
    }

    #[test]
    fn higher_rating_never_lowers_the_score() {
        let mut previous = f64::NEG_INFINITY;
        for tenths in 0..=50 {
            let rating = f64::from(tenths) / 10.0;
            let record = place().with_rating(rating).with_price_level(3);
            let scored = score(record, 0.7, 2.0, true, true);

            assert!(scored.composite_score >= previous);
            previous = scored.composite_score;
        }
    }

    #[test]
    fn cheaper_place_has_higher_price_metric() {
        let cheap = score(place().with_price_level(1), 0.0, 2.0, false, true);
        let pricey = score(place().with_price_level(4), 0.0, 2.0, false, true);

        assert!(cheap.normalized_price.unwrap() > pricey.normalized_price.unwrap());
        assert_relative_eq!(pricey.normalized_price.unwrap(), 0.0);
    }
}
