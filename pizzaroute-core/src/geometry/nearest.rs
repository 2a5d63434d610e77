//! Closest point on a polyline

use geo::{Coord, Point};
use serde::Serialize;

use super::{LocalProjection, great_circle_km};
use crate::{Kilometers, Route, RoutePoint};

/// Distances closer than this are considered equal when comparing edges
const TIE_TOLERANCE_KM: Kilometers = 1e-12;

/// Closest point on a route to some query point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteProjection {
    /// Crow-flies distance from the query point to the route
    pub distance_km: Kilometers,
    /// Position of the closest point along the route
    pub cumulative_km: Kilometers,
    /// The closest point itself
    pub location: Point<f64>,
}

/// Finds the closest point on the full route polyline.
///
/// Every edge is evaluated; on equal distances the point with the lower
/// cumulative distance wins.
pub fn nearest_point_on_route(point: Point<f64>, route: &Route) -> RouteProjection {
    nearest_on_points(point, route.points())
}

pub(crate) fn nearest_on_points(point: Point<f64>, points: &[RoutePoint]) -> RouteProjection {
    let projection = LocalProjection::new(point);

    let mut best = match points.first() {
        Some(first) => RouteProjection {
            distance_km: great_circle_km(point, first.geometry),
            cumulative_km: first.cumulative_km,
            location: first.geometry,
        },
        None => {
            return RouteProjection {
                distance_km: f64::INFINITY,
                cumulative_km: 0.0,
                location: point,
            };
        }
    };

    for edge in points.windows(2) {
        let candidate = project_onto_edge(projection, point, &edge[0], &edge[1]);
        if candidate.distance_km < best.distance_km - TIE_TOLERANCE_KM {
            best = candidate;
        }
    }

    best
}

fn project_onto_edge(
    projection: LocalProjection,
    point: Point<f64>,
    from: &RoutePoint,
    to: &RoutePoint,
) -> RouteProjection {
    // The projection is centred on the query point, so it sits at the plane origin
    let a = projection.to_plane(from.geometry.into());
    let b = projection.to_plane(to.geometry.into());
    let ab = b - a;

    let length_sq = ab.x * ab.x + ab.y * ab.y;
    let t = if length_sq > 0.0 {
        (-(a.x * ab.x + a.y * ab.y) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let location = if t <= 0.0 {
        from.geometry
    } else if t >= 1.0 {
        to.geometry
    } else {
        Point::from(projection.to_geo(Coord {
            x: a.x + t * ab.x,
            y: a.y + t * ab.y,
        }))
    };

    RouteProjection {
        distance_km: great_circle_km(point, location),
        cumulative_km: from.cumulative_km + t * (to.cumulative_km - from.cumulative_km),
        location,
    }
}
