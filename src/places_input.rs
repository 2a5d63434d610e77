use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use pizzaroute_core::PlaceRecord;

use crate::LoadError;

/// Reads a JSON array of place records
pub fn load_places(path: &Path) -> Result<Vec<PlaceRecord>, LoadError> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    let places: Vec<PlaceRecord> = serde_json::from_reader(BufReader::new(file))?;
    debug!("Loaded {} places from {}", places.len(), path.display());
    Ok(places)
}

pub fn parse_places(content: &str) -> Result<Vec<PlaceRecord>, LoadError> {
    Ok(serde_json::from_str(content)?)
}
