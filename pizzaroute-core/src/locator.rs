//! Km markers for places along the route

use geo::Point;

use crate::{Kilometers, Route, geometry::nearest_point_on_route};

/// Position along the route of the point on it closest to `point`
pub fn locate(point: Point<f64>, route: &Route) -> Kilometers {
    nearest_point_on_route(point, route).cumulative_km
}
