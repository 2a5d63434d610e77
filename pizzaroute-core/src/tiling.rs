//! Decomposition of a corridor into overlapping query tiles
//!
//! Tiles approximate the corridor by its bounding extent, so a tile may
//! reach well outside the corridor itself. Places returned for such tiles
//! are filtered out downstream. Adjacent tiles overlap, and a place inside
//! an overlap is returned once per tile; deduplication happens before
//! scoring, not here.

use geo::{Coord, Rect};
use serde::Serialize;

use crate::{Error, Kilometers, geometry::CorridorPolygon, geometry::km_to_degrees};

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    /// Grid row, counted from the south
    pub row: usize,
    /// Grid column, counted from the west
    pub col: usize,
}

impl Tile {
    /// Inclusive on all edges
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Shares at least one point with `rect`
    pub fn overlaps(&self, rect: &Rect<f64>) -> bool {
        self.min_lon <= rect.max().x
            && self.max_lon >= rect.min().x
            && self.min_lat <= rect.max().y
            && self.max_lat >= rect.min().y
    }

    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_lon,
                y: self.min_lat,
            },
            Coord {
                x: self.max_lon,
                y: self.max_lat,
            },
        )
    }
}

/// Lays a grid of `tile_size_km` square tiles over the corridor's bounding
/// extent, adjacent tiles overlapping by `overlap_km`.
///
/// Tiles come back in row-major order, south to north and west to east
/// within a row, so identical inputs always yield identical output.
///
/// # Errors
///
/// Returns [`Error::Config`] unless `0 < overlap_km < tile_size_km`.
pub fn tile(
    polygon: &CorridorPolygon,
    tile_size_km: Kilometers,
    overlap_km: Kilometers,
) -> Result<Vec<Tile>, Error> {
    validate_tiling(tile_size_km, overlap_km)?;

    let extent = polygon.bounding_rect();
    let mid_lat = extent.center().y;

    let (size_lat, size_lon) = km_to_degrees(tile_size_km, mid_lat);
    let (stride_lat, stride_lon) = km_to_degrees(tile_size_km - overlap_km, mid_lat);

    let rows = steps_to_cover(extent.height(), stride_lat);
    let cols = steps_to_cover(extent.width(), stride_lon);

    let mut tiles = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let min_lat = extent.min().y + row as f64 * stride_lat;
        for col in 0..cols {
            let min_lon = extent.min().x + col as f64 * stride_lon;
            tiles.push(Tile {
                min_lat,
                min_lon,
                max_lat: min_lat + size_lat,
                max_lon: min_lon + size_lon,
                row,
                col,
            });
        }
    }
    tiles.retain(|t| t.overlaps(&extent));

    Ok(tiles)
}

pub(crate) fn validate_tiling(tile_size_km: Kilometers, overlap_km: Kilometers) -> Result<(), Error> {
    if !tile_size_km.is_finite() || tile_size_km <= 0.0 {
        return Err(Error::Config(format!(
            "tile_size_km must be > 0, got {tile_size_km}"
        )));
    }
    if !overlap_km.is_finite() || overlap_km <= 0.0 {
        return Err(Error::Config(format!(
            "overlap_km must be > 0, got {overlap_km}"
        )));
    }
    if overlap_km >= tile_size_km {
        return Err(Error::Config(format!(
            "overlap_km ({overlap_km}) must be smaller than tile_size_km ({tile_size_km})"
        )));
    }
    Ok(())
}

/// Number of grid steps whose tiles reach past `span`, at least one
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn steps_to_cover(span: f64, stride: f64) -> usize {
    ((span / stride).ceil() as usize).max(1)
}
