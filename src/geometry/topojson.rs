//! TopoJSON decoding (the format of the `us-atlas` boundary files).
//!
//! Arcs are shared between neighbouring features, optionally quantized and
//! delta-encoded. A polygon ring references arcs by index; a negative index
//! `i` means arc `!i` (i.e. `-i - 1`) traversed backwards.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use super::geojson::{closed_ring, feature_to_region};
use crate::{error::GeometrySourceError, types::{Region, RegionLevel}};

type Result<T> = std::result::Result<T, GeometrySourceError>;

/// Read the geometries of one named object of a TopoJSON Topology as regions.
pub(crate) fn read_topology(value: &Value, level: RegionLevel, object: &str) -> Result<Vec<Region>> {
    let arcs = decode_arcs(value)?;

    let collection = value["objects"].get(object)
        .ok_or_else(|| GeometrySourceError::malformed(format!("topology has no object {object:?}")))?;

    let geometries: Vec<&Value> = match collection["type"].as_str() {
        Some("GeometryCollection") => collection["geometries"].as_array()
            .ok_or_else(|| GeometrySourceError::malformed("GeometryCollection without geometries"))?
            .iter()
            .collect(),
        _ => vec![collection],
    };

    geometries.into_iter()
        .map(|geometry| {
            let shape = decode_geometry(geometry, &arcs)?;
            feature_to_region(geometry, &geometry["properties"], level, shape)
        })
        .collect()
}

/// Decode all arcs to absolute lon/lat coordinates.
fn decode_arcs(value: &Value) -> Result<Vec<Vec<Coord<f64>>>> {
    let transform = match &value["transform"] {
        Value::Null => None,
        t => {
            let pair = |v: &Value| -> Result<(f64, f64)> {
                match (v[0].as_f64(), v[1].as_f64()) {
                    (Some(a), Some(b)) => Ok((a, b)),
                    _ => Err(GeometrySourceError::malformed("invalid topology transform")),
                }
            };
            Some((pair(&t["scale"])?, pair(&t["translate"])?))
        }
    };

    let arcs = value["arcs"].as_array()
        .ok_or_else(|| GeometrySourceError::malformed("topology has no arcs array"))?;

    arcs.iter()
        .map(|arc| {
            let positions = arc.as_array()
                .ok_or_else(|| GeometrySourceError::malformed("arc is not an array"))?;

            // Quantized arcs are delta-encoded from the previous position.
            let (mut x, mut y) = (0.0, 0.0);
            positions.iter()
                .map(|position| {
                    let (px, py) = match (position[0].as_f64(), position[1].as_f64()) {
                        (Some(px), Some(py)) => (px, py),
                        _ => return Err(GeometrySourceError::malformed("arc position is not a pair of numbers")),
                    };
                    Ok(match transform {
                        Some(((sx, sy), (tx, ty))) => {
                            x += px;
                            y += py;
                            Coord { x: x * sx + tx, y: y * sy + ty }
                        }
                        None => Coord { x: px, y: py },
                    })
                })
                .collect()
        })
        .collect()
}

fn decode_geometry(geometry: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<MultiPolygon<f64>> {
    match geometry["type"].as_str() {
        None => Ok(MultiPolygon(vec![])), // null geometry
        Some("Polygon") => {
            let rings = as_array(&geometry["arcs"])?;
            Ok(MultiPolygon(vec![decode_polygon(rings, arcs)?]))
        }
        Some("MultiPolygon") => {
            let polygons = as_array(&geometry["arcs"])?.iter()
                .map(|polygon| decode_polygon(as_array(polygon)?, arcs))
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        Some(other) => Err(GeometrySourceError::malformed(format!("unsupported topology geometry {other:?}"))),
    }
}

fn decode_polygon(rings: &[Value], arcs: &[Vec<Coord<f64>>]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| decode_ring(as_array(ring)?, arcs));

    let exterior = rings.next()
        .ok_or_else(|| GeometrySourceError::malformed("Polygon without an exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Stitch a ring from arc references, dropping each joined arc's duplicate first point.
fn decode_ring(refs: &[Value], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::new();

    for arc_ref in refs {
        let index = arc_ref.as_i64()
            .ok_or_else(|| GeometrySourceError::malformed("arc reference is not an integer"))?;
        let (arc_index, reversed) = if index < 0 { (!index, true) } else { (index, false) };
        let arc = arcs.get(arc_index as usize)
            .ok_or_else(|| GeometrySourceError::malformed(format!("arc index {index} out of bounds")))?;

        let skip = usize::from(!points.is_empty());
        if reversed {
            points.extend(arc.iter().rev().skip(skip));
        } else {
            points.extend(arc.iter().skip(skip));
        }
    }

    Ok(closed_ring(points))
}

fn as_array(value: &Value) -> Result<&[Value]> {
    value.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| GeometrySourceError::malformed("expected an array of arc references"))
}
