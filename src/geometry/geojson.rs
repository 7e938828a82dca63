use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::{error::GeometrySourceError, types::{Region, RegionLevel}};

type Result<T> = std::result::Result<T, GeometrySourceError>;

/// Read the features of a GeoJSON FeatureCollection as regions.
pub(crate) fn read_feature_collection(value: &Value, level: RegionLevel) -> Result<Vec<Region>> {
    let features = value["features"].as_array()
        .ok_or_else(|| GeometrySourceError::malformed("FeatureCollection has no features array"))?;

    features.iter()
        .map(|feature| {
            let geometry = parse_geometry(&feature["geometry"])?;
            feature_to_region(feature, &feature["properties"], level, geometry)
        })
        .collect()
}

/// Build a region from a feature's id, properties and already-decoded geometry.
/// Shared by the GeoJSON and TopoJSON readers.
pub(crate) fn feature_to_region(feature: &Value, properties: &Value, level: RegionLevel, geometry: MultiPolygon<f64>) -> Result<Region> {
    let id = feature_id(&feature["id"], level)
        .or_else(|| ["GEOID", "geo_id"].iter().find_map(|key| feature_id(&properties[*key], level)))
        .ok_or_else(|| GeometrySourceError::malformed(format!("{} feature without an identifier", level.to_str())))?;

    let name = ["name", "NAME"].iter()
        .find_map(|key| properties[*key].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    Ok(Region::new(level, id, name, geometry))
}

/// Feature ids may be strings ("01001") or numbers (1001); numbers are zero-padded.
fn feature_id(value: &Value, level: RegionLevel) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_u64().map(|n| format!("{n:0width$}", width = level.id_len())),
        _ => None,
    }
}

/// Parse a GeoJSON geometry object into a MultiPolygon.
/// Null geometry becomes an empty MultiPolygon.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    if geometry.is_null() {
        return Ok(MultiPolygon(vec![]));
    }

    let coords = geometry["coordinates"].as_array()
        .ok_or_else(|| GeometrySourceError::malformed("geometry without coordinates"))?;

    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
        Some("MultiPolygon") => {
            let polygons = coords.iter()
                .map(|polygon| {
                    let rings = polygon.as_array()
                        .ok_or_else(|| GeometrySourceError::malformed("MultiPolygon member is not an array"))?;
                    parse_polygon_coords(rings)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        other => Err(GeometrySourceError::malformed(format!("unsupported geometry type {other:?}"))),
    }
}

/// Parse polygon rings: the first ring is the exterior, the rest are holes.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| GeometrySourceError::malformed("ring is not an array"))
            .and_then(|coords| parse_ring_coords(coords))
    });

    let exterior = rings.next()
        .ok_or_else(|| GeometrySourceError::malformed("Polygon without an exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from GeoJSON positions: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let points = coords.iter()
        .map(|position| {
            let x = position[0].as_f64();
            let y = position[1].as_f64();
            match (x, y) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err(GeometrySourceError::malformed("position is not a pair of numbers")),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(closed_ring(points))
}

/// Ensure ring is closed (first point == last point)
pub(crate) fn closed_ring(mut points: Vec<Coord<f64>>) -> LineString<f64> {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last { points.push(first) }
    }
    LineString(points)
}
