//! Corridor construction and nearest-point queries against the route

use geo::{Coord, Distance, Haversine, Point};

use crate::{KM_PER_DEGREE, Kilometers};

pub mod corridor;
pub mod nearest;

pub use corridor::{CorridorPolygon, build_corridor};
pub use nearest::{RouteProjection, nearest_point_on_route};

/// Great-circle distance between two points in kilometres
pub fn great_circle_km(a: Point<f64>, b: Point<f64>) -> Kilometers {
    Haversine.distance(a, b) / 1000.0
}

/// Equirectangular projection to a local kilometre plane around an origin.
///
/// Accurate to well under a percent over the tens of kilometres a corridor spans.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalProjection {
    origin: Coord<f64>,
    km_per_lon_degree: f64,
}

impl LocalProjection {
    pub(crate) fn new(origin: Point<f64>) -> Self {
        let km_per_lon_degree = (KM_PER_DEGREE * origin.y().to_radians().cos()).max(f64::EPSILON);
        Self {
            origin: origin.into(),
            km_per_lon_degree,
        }
    }

    /// Longitude offsets are taken the short way round the antimeridian
    pub(crate) fn to_plane(self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: wrap_longitude(coord.x - self.origin.x) * self.km_per_lon_degree,
            y: (coord.y - self.origin.y) * KM_PER_DEGREE,
        }
    }

    pub(crate) fn to_geo(self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.origin.x + coord.x / self.km_per_lon_degree,
            y: self.origin.y + coord.y / KM_PER_DEGREE,
        }
    }
}

/// Normalizes a longitude difference into `[-180, 180)`
fn wrap_longitude(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

/// Converts a distance in kilometres to degrees of latitude and longitude at `lat`
pub(crate) fn km_to_degrees(km: Kilometers, lat: f64) -> (f64, f64) {
    let lat_degrees = km / KM_PER_DEGREE;
    let lon_degrees = km / (KM_PER_DEGREE * lat.to_radians().cos()).max(f64::EPSILON);
    (lat_degrees, lon_degrees)
}
