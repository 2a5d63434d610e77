//! Route polyline with cumulative distances

use geo::{Coord, LineString, Point};
use serde::Serialize;

use crate::{Error, Kilometers, geometry::great_circle_km};

/// Steps shorter than this are treated as repeated points
pub const MIN_STEP_KM: Kilometers = 1e-6;

/// Slack allowed when comparing segment bounds against the route length
const BOUND_TOLERANCE_KM: Kilometers = 1e-9;

/// Route vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint {
    /// Vertex coordinates, `x` is longitude and `y` is latitude
    pub geometry: Point<f64>,
    /// Great-circle distance from the first vertex along the polyline
    pub cumulative_km: Kilometers,
}

impl RoutePoint {
    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }
}

/// Ordered polyline of at least two distinct consecutive vertices.
///
/// Immutable once built; cumulative distances are non-decreasing and start at zero.
#[derive(Debug, Clone)]
pub struct Route {
    points: Vec<RoutePoint>,
}

impl Route {
    /// Builds a route from `(latitude, longitude)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoute`] for fewer than two points, coordinates
    /// outside the valid latitude/longitude range, or a zero-length step.
    pub fn build(points: &[(f64, f64)]) -> Result<Self, Error> {
        if points.len() < 2 {
            return Err(Error::InvalidRoute(format!(
                "a route needs at least 2 points, got {}",
                points.len()
            )));
        }

        let mut route_points: Vec<RoutePoint> = Vec::with_capacity(points.len());
        for (idx, &(lat, lon)) in points.iter().enumerate() {
            validate_coordinate(idx, lat, lon)?;
            let geometry = Point::new(lon, lat);

            let cumulative_km = match route_points.last() {
                None => 0.0,
                Some(prev) => {
                    let step = great_circle_km(prev.geometry, geometry);
                    if step < MIN_STEP_KM {
                        return Err(Error::InvalidRoute(format!(
                            "points {} and {idx} are identical (step of {step:e} km)",
                            idx - 1
                        )));
                    }
                    prev.cumulative_km + step
                }
            };

            route_points.push(RoutePoint {
                geometry,
                cumulative_km,
            });
        }

        Ok(Self {
            points: route_points,
        })
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a route holds at least two points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_distance_km(&self) -> Kilometers {
        self.points.last().map_or(0.0, |p| p.cumulative_km)
    }

    /// Creates a segment between two distances along this route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if `start_km >= end_km` or either bound is
    /// outside `[0, total_distance_km]`.
    pub fn segment(&self, start_km: Kilometers, end_km: Kilometers) -> Result<Segment, Error> {
        let total = self.total_distance_km();

        if !start_km.is_finite() || !end_km.is_finite() {
            return Err(Error::Range(format!(
                "segment bounds must be finite, got ({start_km}, {end_km})"
            )));
        }
        if start_km >= end_km {
            return Err(Error::Range(format!(
                "segment start {start_km} km must be before end {end_km} km"
            )));
        }
        if start_km < 0.0 || end_km > total + BOUND_TOLERANCE_KM {
            return Err(Error::Range(format!(
                "segment ({start_km}, {end_km}) km is outside the route [0, {total:.3}] km"
            )));
        }

        Ok(Segment {
            start_km,
            end_km: end_km.min(total),
        })
    }

    /// Route geometry as a `geo` line string (`x` = longitude)
    pub fn line_string(&self) -> LineString<f64> {
        self.points
            .iter()
            .map(|p| Coord::from(p.geometry))
            .collect()
    }
}

fn validate_coordinate(idx: usize, lat: f64, lon: f64) -> Result<(), Error> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(Error::InvalidRoute(format!(
            "point {idx} has a non-finite coordinate ({lat}, {lon})"
        )));
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidRoute(format!(
            "point {idx} is out of range: lat {lat}, lon {lon}"
        )));
    }
    Ok(())
}

/// Sub-range of a route, `0 <= start_km < end_km <= total_distance_km`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    start_km: Kilometers,
    end_km: Kilometers,
}

impl Segment {
    pub fn start_km(&self) -> Kilometers {
        self.start_km
    }

    pub fn end_km(&self) -> Kilometers {
        self.end_km
    }

    pub fn length_km(&self) -> Kilometers {
        self.end_km - self.start_km
    }

    /// Inclusive on both ends
    pub fn contains_km(&self, km: Kilometers) -> bool {
        km >= self.start_km && km <= self.end_km
    }
}
