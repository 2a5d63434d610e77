//! Buffered corridor around a route segment

use geo::{
    BoundingRect, Buffer, Coord, LineString, MapCoords, MultiPolygon, Point, Polygon, Rect,
};

use super::{LocalProjection, km_to_degrees, nearest::nearest_on_points};
use crate::{Error, Kilometers, Route, RoutePoint, Segment};

/// Points this close to the centreline count as lying on it
pub const ON_LINE_TOLERANCE_KM: Kilometers = 1e-9;

/// Longitude padding is computed no closer to the pole than this
const MAX_PAD_LATITUDE: f64 = 89.0;

/// Region around a segment within which places count as "along the route".
///
/// Membership is decided by the great-circle distance to the centreline, so
/// the corridor is `buffer_km` wide along its whole length. The stored
/// region (`x` = longitude) is a planar buffer drawn in a single local
/// projection and only serves display. A zero buffer gives a zero-width
/// region that only contains the centreline itself.
#[derive(Debug, Clone)]
pub struct CorridorPolygon {
    region: MultiPolygon<f64>,
    centerline: Vec<RoutePoint>,
    segment: Segment,
    buffer_km: Kilometers,
}

impl CorridorPolygon {
    pub fn region(&self) -> &MultiPolygon<f64> {
        &self.region
    }

    /// Sub-polyline of the route between the segment bounds
    pub fn centerline(&self) -> &[RoutePoint] {
        &self.centerline
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn buffer_km(&self) -> Kilometers {
        self.buffer_km
    }

    /// Boundary-inclusive containment test
    pub fn contains(&self, point: Point<f64>) -> bool {
        nearest_on_points(point, &self.centerline).distance_km
            <= self.buffer_km + ON_LINE_TOLERANCE_KM
    }

    /// Axis-aligned extent in degrees covering every point the corridor contains
    pub fn bounding_rect(&self) -> Rect<f64> {
        let Some(line_rect) = centerline_string(&self.centerline).bounding_rect() else {
            return Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 });
        };

        // Widen by the buffer at the latitude where a degree of longitude is shortest
        let (lat_pad, _) = km_to_degrees(self.buffer_km, 0.0);
        let poleward = (line_rect.min().y - lat_pad)
            .abs()
            .max((line_rect.max().y + lat_pad).abs())
            .min(MAX_PAD_LATITUDE);
        let (_, lon_pad) = km_to_degrees(self.buffer_km, poleward);

        let padded = Rect::new(
            Coord {
                x: line_rect.min().x - lon_pad,
                y: line_rect.min().y - lat_pad,
            },
            Coord {
                x: line_rect.max().x + lon_pad,
                y: line_rect.max().y + lat_pad,
            },
        );

        match self.region.bounding_rect() {
            Some(region_rect) => Rect::new(
                Coord {
                    x: padded.min().x.min(region_rect.min().x),
                    y: padded.min().y.min(region_rect.min().y),
                },
                Coord {
                    x: padded.max().x.max(region_rect.max().x),
                    y: padded.max().y.max(region_rect.max().y),
                },
            ),
            None => padded,
        }
    }
}

/// Builds the corridor around `segment` of `route`, `buffer_km` wide on each side.
///
/// # Errors
///
/// Returns [`Error::Config`] for a negative or non-finite buffer and
/// [`Error::Range`] if the segment does not fit the route.
pub fn build_corridor(
    route: &Route,
    segment: &Segment,
    buffer_km: Kilometers,
) -> Result<CorridorPolygon, Error> {
    if !buffer_km.is_finite() || buffer_km < 0.0 {
        return Err(Error::Config(format!(
            "buffer_km must be a finite value >= 0, got {buffer_km}"
        )));
    }
    // Re-validate: the segment may come from another route
    let segment = route.segment(segment.start_km(), segment.end_km())?;

    let centerline = sub_polyline(route, &segment);
    let line = centerline_string(&centerline);

    let region = if buffer_km > 0.0 {
        let origin = centerline[centerline.len() / 2].geometry;
        let projection = LocalProjection::new(origin);

        let buffered = line
            .map_coords(|c| projection.to_plane(c))
            .buffer(buffer_km)
            .map_coords(|c| projection.to_geo(c));
        // Buffers far below the clipper's precision vanish
        if buffered.0.is_empty() {
            zero_width_region(&line)
        } else {
            buffered
        }
    } else {
        zero_width_region(&line)
    };

    Ok(CorridorPolygon {
        region,
        centerline,
        segment,
        buffer_km,
    })
}

/// Route vertices within the segment, with synthetic vertices
/// interpolated at bounds that fall between two vertices
fn sub_polyline(route: &Route, segment: &Segment) -> Vec<RoutePoint> {
    let (start_km, end_km) = (segment.start_km(), segment.end_km());

    let mut vertices = Vec::with_capacity(route.len() + 2);
    vertices.push(point_at(route.points(), start_km));
    vertices.extend(
        route
            .points()
            .iter()
            .filter(|p| p.cumulative_km > start_km && p.cumulative_km < end_km)
            .copied(),
    );
    vertices.push(point_at(route.points(), end_km));
    vertices
}

/// Position on the polyline at `km`, linear between the enclosing vertices
fn point_at(points: &[RoutePoint], km: Kilometers) -> RoutePoint {
    let idx = points.partition_point(|p| p.cumulative_km < km);

    if idx == 0 {
        return points[0];
    }
    let Some(&next) = points.get(idx) else {
        return points[points.len() - 1];
    };
    if next.cumulative_km == km {
        return next;
    }

    let prev = points[idx - 1];
    let t = (km - prev.cumulative_km) / (next.cumulative_km - prev.cumulative_km);
    let (from, to) = (Coord::from(prev.geometry), Coord::from(next.geometry));

    RoutePoint {
        geometry: Point::from(from + (to - from) * t),
        cumulative_km: km,
    }
}

fn centerline_string(centerline: &[RoutePoint]) -> LineString<f64> {
    centerline.iter().map(|p| Coord::from(p.geometry)).collect()
}

/// Degenerate ring that walks the line out and back
fn zero_width_region(line: &LineString<f64>) -> MultiPolygon<f64> {
    let ring: LineString<f64> = line
        .0
        .iter()
        .chain(line.0.iter().rev().skip(1))
        .copied()
        .collect();
    MultiPolygon::new(vec![Polygon::new(ring, vec![])])
}
