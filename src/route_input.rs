//! Route loading from WKT, GeoJSON and CSV

use std::fs;
use std::path::Path;

use geo::{Geometry as GeoGeometry, LineString};
use geojson::GeoJson;
use log::debug;
use pizzaroute_core::Route;
use serde::Deserialize;
use wkt::TryFromWkt;

use crate::LoadError;

/// On-disk route encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFormat {
    /// `LINESTRING (lon lat, ...)`
    Wkt,
    /// `LineString` geometry, or the first one in a feature / collection
    GeoJson,
    /// Header row with `lat` and `lon` columns
    Csv,
}

impl RouteFormat {
    /// Guesses the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("wkt") => Ok(RouteFormat::Wkt),
            Some("geojson" | "json") => Ok(RouteFormat::GeoJson),
            Some("csv") => Ok(RouteFormat::Csv),
            _ => Err(LoadError::Unsupported(format!(
                "cannot infer route format of '{}', expected .wkt, .geojson, .json or .csv",
                path.display()
            ))),
        }
    }
}

/// Reads and builds a route, picking the format from the file extension
pub fn load_route(path: &Path) -> Result<Route, LoadError> {
    let format = RouteFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    let route = parse_route(&content, format)?;
    debug!(
        "Loaded route from {}: {} points, {:.2} km",
        path.display(),
        route.len(),
        route.total_distance_km()
    );
    Ok(route)
}

pub fn parse_route(content: &str, format: RouteFormat) -> Result<Route, LoadError> {
    let points = match format {
        RouteFormat::Wkt => {
            let line = LineString::<f64>::try_from_wkt_str(content.trim())
                .map_err(|e| LoadError::WktError(e.to_string()))?;
            lat_lon_pairs(&line)
        }
        RouteFormat::GeoJson => lat_lon_pairs(&geojson_line(content)?),
        RouteFormat::Csv => csv_points(content)?,
    };

    Ok(Route::build(&points)?)
}

fn lat_lon_pairs(line: &LineString<f64>) -> Vec<(f64, f64)> {
    line.coords().map(|c| (c.y, c.x)).collect()
}

fn geojson_line(content: &str) -> Result<LineString<f64>, LoadError> {
    let geojson = content
        .parse::<GeoJson>()
        .map_err(|e| LoadError::GeoJsonError(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => Some(geometry),
        GeoJson::Feature(feature) => feature.geometry,
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .find_map(|feature| feature.geometry),
    }
    .ok_or_else(|| LoadError::GeoJsonError("no geometry found".to_string()))?;

    let geometry = GeoGeometry::<f64>::try_from(geometry)
        .map_err(|e| LoadError::GeoJsonError(e.to_string()))?;

    match geometry {
        GeoGeometry::LineString(line) => Ok(line),
        GeoGeometry::MultiLineString(mut lines) if lines.0.len() == 1 => Ok(lines.0.remove(0)),
        other => Err(LoadError::Unsupported(format!(
            "route geometry must be a single LineString, got {}",
            geometry_name(&other)
        ))),
    }
}

fn geometry_name(geometry: &GeoGeometry<f64>) -> &'static str {
    match geometry {
        GeoGeometry::Point(_) => "Point",
        GeoGeometry::Line(_) => "Line",
        GeoGeometry::LineString(_) => "LineString",
        GeoGeometry::Polygon(_) => "Polygon",
        GeoGeometry::MultiPoint(_) => "MultiPoint",
        GeoGeometry::MultiLineString(_) => "MultiLineString",
        GeoGeometry::MultiPolygon(_) => "MultiPolygon",
        GeoGeometry::GeometryCollection(_) => "GeometryCollection",
        GeoGeometry::Rect(_) => "Rect",
        GeoGeometry::Triangle(_) => "Triangle",
    }
}

#[derive(Debug, Deserialize)]
struct CsvPoint {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lng")]
    lon: f64,
}

fn csv_points(content: &str) -> Result<Vec<(f64, f64)>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    reader
        .deserialize::<CsvPoint>()
        .map(|row| row.map(|p| (p.lat, p.lon)).map_err(LoadError::from))
        .collect()
}
