//! Spatial spreading of the shortlist along the segment
//!
//! The segment is split into equal-width bins and each bin contributes at
//! most `per_bin_limit` places, drawn with a bias towards the best-ranked
//! candidates. The draw is driven by a generator seeded from `rng_seed`, so
//! identical inputs always select the same places.

mod bins;
mod draw;

use std::cmp::Ordering;

use rand::SeedableRng;
use rand_pcg::Pcg64;

pub use bins::{Bin, bin_index, partition};

use crate::{Error, LocatedPlace, Segment, SelectedPlace};
use draw::rank_weighted_sample;

/// Selects a spatially diversified subset of located places.
///
/// Places whose km marker falls outside the segment are dropped. Bins are
/// emitted in route order, places within a bin in rank order.
///
/// # Errors
///
/// Returns [`Error::Config`] if `bin_count` or `per_bin_limit` is zero.
pub fn spread(
    places: Vec<LocatedPlace>,
    segment: &Segment,
    bin_count: usize,
    per_bin_limit: usize,
    rng_seed: u64,
) -> Result<Vec<SelectedPlace>, Error> {
    if bin_count == 0 {
        return Err(Error::Config("bin_count must be > 0".to_string()));
    }
    if per_bin_limit == 0 {
        return Err(Error::Config("per_bin_limit must be > 0".to_string()));
    }

    let bins = partition(segment, bin_count);
    let mut buckets: Vec<Vec<LocatedPlace>> = (0..bins.len()).map(|_| Vec::new()).collect();
    for place in places {
        if let Some(idx) = bin_index(&bins, place.km_marker) {
            buckets[idx].push(place);
        }
    }

    let mut rng = Pcg64::seed_from_u64(rng_seed);
    let mut selected = Vec::new();

    for mut bucket in buckets {
        bucket.sort_by(rank);

        if bucket.len() <= per_bin_limit {
            selected.extend(bucket.into_iter().map(SelectedPlace::from));
            continue;
        }

        let picks = rank_weighted_sample(&mut rng, bucket.len(), per_bin_limit);
        let mut picks = picks.into_iter().peekable();
        for (rank, place) in bucket.into_iter().enumerate() {
            if picks.next_if_eq(&rank).is_some() {
                selected.push(SelectedPlace::from(place));
            }
        }
    }

    Ok(selected)
}

/// Scored before unscored, then higher score, then closer to the route, then by name
fn rank(a: &LocatedPlace, b: &LocatedPlace) -> Ordering {
    let (a, b) = (&a.scored, &b.scored);
    a.unscored
        .cmp(&b.unscored)
        .then_with(|| b.composite_score.total_cmp(&a.composite_score))
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.place.name.cmp(&b.place.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlaceRecord, Route, ScoredPlace};

    fn located(name: &str, score: f64, distance_km: f64, km_marker: f64) -> LocatedPlace {
        LocatedPlace {
            scored: ScoredPlace {
                place: PlaceRecord::new(name, 0.0, 0.0),
                distance_km,
                normalized_rating: Some(score),
                normalized_price: None,
                normalized_distance: None,
                composite_score: score,
                unscored: false,
            },
            km_marker,
        }
    }

    fn segment() -> Segment {
        let route = Route::build(&[(0.0, 0.0), (0.0, 0.3)]).unwrap();
        route.segment(5.0, 15.0).unwrap()
    }

    fn names(selected: &[SelectedPlace]) -> Vec<&str> {
        selected.iter().map(|s| s.place.name.as_str()).collect()
    }

    #[test]
    fn small_bins_are_returned_in_rank_order() {
        let places = vec![
            located("b", 0.5, 0.2, 6.0),
            located("a", 0.9, 0.2, 7.0),
            located("c", 0.5, 0.1, 6.5),
        ];
        let selected = spread(places, &segment(), 1, 5, 1).unwrap();

        assert_eq!(names(&selected), vec!["a", "c", "b"]);
    }

    #[test]
    fn name_breaks_remaining_ties() {
        let places = vec![located("zeta", 0.5, 0.2, 6.0), located("alpha", 0.5, 0.2, 6.0)];
        let selected = spread(places, &segment(), 1, 5, 1).unwrap();

        assert_eq!(names(&selected), vec!["alpha", "zeta"]);
    }

    #[test]
    fn unscored_places_rank_last() {
        let mut unscored = located("first-by-name", 0.0, 0.0, 6.0);
        unscored.scored.unscored = true;
        let places = vec![unscored, located("zero", 0.0, 1.0, 6.0)];
        let selected = spread(places, &segment(), 1, 5, 1).unwrap();

        assert_eq!(names(&selected), vec!["zero", "first-by-name"]);
    }

    #[test]
    fn bins_are_concatenated_in_route_order() {
        let places = vec![
            located("late", 0.9, 0.1, 14.0),
            located("early", 0.1, 0.1, 5.5),
            located("middle", 0.5, 0.1, 10.0),
        ];
        let selected = spread(places, &segment(), 3, 2, 1).unwrap();

        assert_eq!(names(&selected), vec!["early", "middle", "late"]);
    }

    #[test]
    fn per_bin_limit_and_segment_bounds_are_respected() {
        let places: Vec<LocatedPlace> = (0..40)
            .map(|i| {
                let km = f64::from(i) * 0.5;
                located(&format!("p{i}"), f64::from(i % 7) / 7.0, 0.1, km)
            })
            .collect();
        let selected = spread(places, &segment(), 4, 3, 99).unwrap();

        assert!(selected.len() <= 4 * 3);
        assert!(selected.iter().all(|s| (5.0..=15.0).contains(&s.nearest_km_marker)));

        let bins = partition(&segment(), 4);
        for bin in &bins {
            let in_bin = selected
                .iter()
                .filter(|s| bin_index(&bins, s.nearest_km_marker) == Some(bin.index))
                .count();
            assert!(in_bin <= 3);
        }
    }

    #[test]
    fn same_seed_same_selection() {
        let places: Vec<LocatedPlace> = (0..30)
            .map(|i| located(&format!("p{i}"), f64::from(i) / 30.0, 0.1, 5.0 + f64::from(i) / 3.0))
            .collect();

        let first = spread(places.clone(), &segment(), 3, 2, 2024).unwrap();
        let second = spread(places, &segment(), 3, 2, 2024).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn three_candidates_two_slots_favours_the_best() {
        let places = vec![
            located("best", 0.9, 0.1, 6.0),
            located("good", 0.7, 0.1, 7.0),
            located("weak", 0.2, 0.1, 8.0),
        ];

        let mut weak_picked = 0;
        let mut best_picked = 0;
        for seed in 0..500 {
            let selected = spread(places.clone(), &segment(), 1, 2, seed).unwrap();
            assert_eq!(selected.len(), 2);
            weak_picked += usize::from(names(&selected).contains(&"weak"));
            best_picked += usize::from(names(&selected).contains(&"best"));
        }

        assert!(best_picked > weak_picked);
        assert!(weak_picked < 300);
    }

    #[test]
    fn zero_bins_or_limit_is_a_config_error() {
        assert!(matches!(spread(vec![], &segment(), 0, 2, 1), Err(Error::Config(_))));
        assert!(matches!(spread(vec![], &segment(), 2, 0, 1), Err(Error::Config(_))));
    }
}
