use super::{PlacesProvider, ProviderError};
use crate::{PlaceRecord, tiling::Tile};

/// Provider backed by a fixed set of records.
///
/// Answers each tile independently, the way a tiled places API does: a
/// record inside several overlapping tiles is returned once per tile.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlacesProvider {
    records: Vec<PlaceRecord>,
}

impl InMemoryPlacesProvider {
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<PlaceRecord> for InMemoryPlacesProvider {
    fn from_iter<T: IntoIterator<Item = PlaceRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PlacesProvider for InMemoryPlacesProvider {
    fn fetch(&self, tiles: &[Tile]) -> Result<Vec<PlaceRecord>, ProviderError> {
        Ok(tiles
            .iter()
            .flat_map(|tile| {
                self.records
                    .iter()
                    .filter(move |record| tile.contains(record.lat, record.lon))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(row: usize, col: usize, min_lon: f64, max_lon: f64) -> Tile {
        Tile {
            min_lat: 0.0,
            min_lon,
            max_lat: 1.0,
            max_lon,
            row,
            col,
        }
    }

    #[test]
    fn overlap_returns_duplicates() {
        let provider: InMemoryPlacesProvider = [
            PlaceRecord::new("left", 0.5, 0.2),
            PlaceRecord::new("shared", 0.5, 0.55),
            PlaceRecord::new("outside", 2.0, 0.5),
        ]
        .into_iter()
        .collect();

        let tiles = [tile(0, 0, 0.0, 0.6), tile(0, 1, 0.5, 1.1)];
        let records = provider.fetch(&tiles).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["left", "shared", "shared"]);
    }

    #[test]
    fn no_tiles_no_records() {
        let provider = InMemoryPlacesProvider::new(vec![PlaceRecord::new("a", 0.5, 0.5)]);
        assert!(provider.fetch(&[]).unwrap().is_empty());
    }
}
