use std::fmt;

use geo::Coord;
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::error::ProjectionError;

/// Geographic source CRS on the same unit sphere as every inset.
const LONGLAT: &str = "+proj=longlat +R=1 +no_defs";

fn build(definition: &str) -> Result<Proj4, ProjectionError> {
    Proj4::from_proj_string(definition)
        .map_err(|err| ProjectionError::new(definition, err))
}

/// One Albers equal-area inset: unit-sphere `aea` output, recentered, scaled and translated.
struct Inset {
    proj: Proj4,
    center: Coord<f64>, // center in unit-sphere projected units
    scale: f64,
    translate: (f64, f64),
    extent: Extent,
}

impl Inset {
    /// `rotate` is the central meridian offset; `center` is given relative to it.
    fn new(
        longlat: &Proj4,
        parallels: (f64, f64),
        rotate: f64,
        center: (f64, f64),
        scale: f64,
        translate: (f64, f64),
        extent: Extent,
    ) -> Result<Self, ProjectionError> {
        let definition = format!(
            "+proj=aea +lat_1={} +lat_2={} +lon_0={} +lat_0={} +R=1 +no_defs",
            parallels.0, parallels.1, -rotate, center.1,
        );
        let proj = build(&definition)?;

        let geographic = Coord { x: center.0 - rotate, y: center.1 };
        let center = raw(longlat, &proj, &geographic)
            .ok_or_else(|| ProjectionError::new(&definition, "center is not projectable"))?;

        Ok(Self { proj, center, scale, translate, extent })
    }

    /// Project lon/lat (degrees) to pixels, Y down.
    fn project(&self, longlat: &Proj4, coord: &Coord<f64>) -> Option<Coord<f64>> {
        let p = raw(longlat, &self.proj, coord)?;
        Some(Coord {
            x: self.translate.0 + self.scale * (p.x - self.center.x),
            y: self.translate.1 - self.scale * (p.y - self.center.y),
        })
    }
}

/// Degrees in, unit-sphere projected units out.
fn raw(from: &Proj4, to: &Proj4, coord: &Coord<f64>) -> Option<Coord<f64>> {
    let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
    transform(from, to, &mut point).ok()?;
    (point.0.is_finite() && point.1.is_finite()).then_some(Coord { x: point.0, y: point.1 })
}

/// Pixel-space clip rectangle of one inset.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: (f64, f64),
    max: (f64, f64),
}

impl Extent {
    fn contains(&self, p: &Coord<f64>) -> bool {
        p.x >= self.min.0 && p.x <= self.max.0 && p.y >= self.min.1 && p.y <= self.max.1
    }
}

/// Composite US projection: the lower 48 plus Alaska and Hawaii insets.
///
/// Each inset is tried in turn (lower 48, Alaska, Hawaii); the first whose clip
/// extent contains the projected point wins. Points outside all three insets
/// are not projectable.
pub struct AlbersUsa {
    longlat: Proj4,
    insets: [Inset; 3],
    scale: f64,
    translate: (f64, f64),
}

impl fmt::Debug for AlbersUsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlbersUsa")
            .field("scale", &self.scale)
            .field("translate", &self.translate)
            .finish()
    }
}

impl AlbersUsa {
    pub const DEFAULT_SCALE: f64 = 1070.0;
    pub const DEFAULT_TRANSLATE: (f64, f64) = (480.0, 250.0);

    pub fn new(scale: f64, translate: (f64, f64)) -> Result<Self, ProjectionError> {
        let k = scale;
        let (x, y) = translate;
        let extent = |x0: f64, y0: f64, x1: f64, y1: f64| Extent {
            min: (x + x0 * k, y + y0 * k),
            max: (x + x1 * k, y + y1 * k),
        };

        let longlat = build(LONGLAT)?;
        let lower48 = Inset::new(&longlat, (29.5, 45.5), 96.0, (-0.6, 38.7), k, (x, y),
            extent(-0.455, -0.238, 0.455, 0.238))?;
        let alaska = Inset::new(&longlat, (55.0, 65.0), 154.0, (-2.0, 58.5), k * 0.35, (x - 0.307 * k, y + 0.201 * k),
            extent(-0.425, 0.120, -0.214, 0.234))?;
        let hawaii = Inset::new(&longlat, (8.0, 18.0), 157.0, (-3.0, 19.9), k, (x - 0.205 * k, y + 0.212 * k),
            extent(-0.214, 0.166, -0.115, 0.234))?;

        Ok(Self { longlat, insets: [lower48, alaska, hawaii], scale, translate })
    }

    /// The 960x500 layout.
    pub fn standard() -> Result<Self, ProjectionError> {
        Self::new(Self::DEFAULT_SCALE, Self::DEFAULT_TRANSLATE)
    }

    /// Project lon/lat (degrees) to pixel coordinates, or `None` outside every inset.
    pub fn project(&self, coord: &Coord<f64>) -> Option<Coord<f64>> {
        self.insets.iter()
            .filter_map(|inset| Some((inset.project(&self.longlat, coord)?, &inset.extent)))
            .find(|(point, extent)| extent.contains(point))
            .map(|(point, _)| point)
    }

    pub fn scale(&self) -> f64 { self.scale }

    pub fn translate(&self) -> (f64, f64) { self.translate }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(lon: f64, lat: f64) -> Option<Coord<f64>> {
        AlbersUsa::standard().unwrap().project(&Coord { x: lon, y: lat })
    }

    /// Closed-form spherical Albers for one inset, scaled and centered.
    fn closed_form(lon: f64, lat: f64, parallels: (f64, f64), rotate: f64, center: (f64, f64), k: f64, t: (f64, f64)) -> Coord<f64> {
        let sy0 = parallels.0.to_radians().sin();
        let n = (sy0 + parallels.1.to_radians().sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;
        let raw = |lambda: f64, phi: f64| {
            let r = (c - 2.0 * n * phi.sin()).sqrt() / n;
            (r * (lambda * n).sin(), r0 - r * (lambda * n).cos())
        };
        let (cx, cy) = raw(center.0.to_radians(), center.1.to_radians());
        let (x, y) = raw((lon + rotate).to_radians(), lat.to_radians());
        Coord { x: t.0 + k * (x - cx), y: t.1 - k * (y - cy) }
    }

    #[test]
    fn insets_match_closed_form() {
        let vermont = project(-72.58, 44.56).unwrap();
        let expected = closed_form(-72.58, 44.56, (29.5, 45.5), 96.0, (-0.6, 38.7), 1070.0, (480.0, 250.0));
        assert!((vermont.x - expected.x).abs() < 1e-6, "{vermont:?} vs {expected:?}");
        assert!((vermont.y - expected.y).abs() < 1e-6, "{vermont:?} vs {expected:?}");

        let hawaii = project(-157.0, 21.0).unwrap();
        let expected = closed_form(-157.0, 21.0, (8.0, 18.0), 157.0, (-3.0, 19.9), 1070.0, (480.0 - 0.205 * 1070.0, 250.0 + 0.212 * 1070.0));
        assert!((hawaii.x - expected.x).abs() < 1e-6, "{hawaii:?} vs {expected:?}");
        assert!((hawaii.y - expected.y).abs() < 1e-6, "{hawaii:?} vs {expected:?}");
    }

    #[test]
    fn center_maps_to_translate() {
        let p = project(-96.6, 38.7).unwrap();
        assert!((p.x - 480.0).abs() < 1e-6);
        assert!((p.y - 250.0).abs() < 1e-6);
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let kansas = project(-98.0, 38.5).unwrap();
        let vermont = project(-72.6, 44.6).unwrap();
        let texas = project(-99.9, 31.9).unwrap();
        assert!(vermont.x > kansas.x);
        assert!(vermont.y < kansas.y);
        assert!(texas.y > kansas.y);
    }

    #[test]
    fn alaska_and_hawaii_land_in_lower_left_insets() {
        let alaska = project(-150.0, 64.0).unwrap();
        let hawaii = project(-157.0, 21.0).unwrap();
        let kansas = project(-98.0, 38.5).unwrap();
        for inset in [alaska, hawaii] {
            assert!(inset.x < kansas.x);
            assert!(inset.y > kansas.y);
        }
    }

    #[test]
    fn points_outside_the_us_are_dropped() {
        assert_eq!(project(2.35, 48.85), None); // Paris
        assert_eq!(project(-60.0, -30.0), None);
    }

    #[test]
    fn scale_and_translate_are_exposed() {
        let proj = AlbersUsa::new(800.0, (400.0, 300.0)).unwrap();
        assert_eq!(proj.scale(), 800.0);
        assert_eq!(proj.translate(), (400.0, 300.0));
    }
}
