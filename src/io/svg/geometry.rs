//! Geometry to SVG path conversion.

use geo::{Coord, CoordsIter, LineString, MultiPolygon};

/// Projection function: lon/lat -> SVG coords, `None` where undefined.
pub(crate) type Projection<'a> = dyn Fn(&Coord<f64>) -> Option<Coord<f64>> + 'a;

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
/// Unprojectable points are dropped; rings left with fewer than 3 points are skipped.
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let coords: Vec<Coord<f64>> = ring.coords_iter()
        .filter_map(|coord| project(&coord))
        .collect();
    if coords.len() < 3 { return String::new() }

    let mut out = format!(" M{:.3},{:.3}", coords[0].x, coords[0].y);
    for c in &coords[1..] {
        out.push_str(&format!(" L{:.3},{:.3}", c.x, c.y));
    }
    out.push('Z');
    out
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    #[test]
    fn path_for_square() {
        let shape = MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let double = |c: &Coord<f64>| Some(Coord { x: c.x * 2.0, y: c.y * 2.0 });
        assert_eq!(
            multipolygon_to_path(&shape, &double),
            " M0.000,0.000 L2.000,0.000 L2.000,2.000 L0.000,0.000Z",
        );
    }

    #[test]
    fn unprojectable_rings_are_skipped() {
        let shape = MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]);
        let nowhere = |_: &Coord<f64>| None;
        assert!(multipolygon_to_path(&shape, &nowhere).is_empty());
    }
}
