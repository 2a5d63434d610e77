use itertools::Itertools;

use crate::PlaceRecord;

/// Coordinates are compared after rounding to this many degrees
const COORDINATE_RESOLUTION: f64 = 1e-6;

/// Stable identity of a place across tile queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceKey {
    /// Identifier assigned by the provider
    Id(String),
    /// Name and coordinates in micro-degrees
    Location(String, i64, i64),
}

impl PlaceKey {
    #[allow(clippy::cast_possible_truncation)]
    pub fn of(record: &PlaceRecord) -> Self {
        match &record.place_id {
            Some(id) => PlaceKey::Id(id.clone()),
            None => PlaceKey::Location(
                record.name.clone(),
                (record.lat / COORDINATE_RESOLUTION).round() as i64,
                (record.lon / COORDINATE_RESOLUTION).round() as i64,
            ),
        }
    }
}

/// Drops repeated records, keeping the first occurrence of each place
pub fn dedup_places(records: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    records.into_iter().unique_by(PlaceKey::of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_and_location_is_one_place() {
        let records = vec![
            PlaceRecord::new("Sorbillo", 40.85, 14.25),
            PlaceRecord::new("Sorbillo", 40.850_000_01, 14.25),
            PlaceRecord::new("Sorbillo", 40.86, 14.25),
        ];
        let unique = dedup_places(records);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[1].lat, 40.86);
    }

    #[test]
    fn provider_id_wins_over_location() {
        let records = vec![
            PlaceRecord::new("Old name", 40.85, 14.25).with_place_id("abc"),
            PlaceRecord::new("New name", 40.9, 14.3).with_place_id("abc"),
            PlaceRecord::new("Old name", 40.85, 14.25),
        ];
        let unique = dedup_places(records);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Old name");
        assert_eq!(unique[0].place_id.as_deref(), Some("abc"));
    }
}
