//! SVG rendering of the national and county views.

use std::{io::Write, path::Path};

use anyhow::Result;
use geo::Coord;

use super::{
    geometry::{multipolygon_to_path, Projection},
    writer::{escape, SvgWriter},
};
use crate::{
    drilldown::{CountyView, NationalView},
    geometry::AlbersUsa,
    label::LabelPlacement,
    types::Region,
};

impl NationalView {
    /// Write the national map to an SVG file.
    pub fn to_svg(&self, path: &Path, projection: &AlbersUsa, width: f64, height: f64) -> Result<()> {
        let mut writer = SvgWriter::create(path)?;
        self.write_svg(&mut writer, projection, width, height)
    }

    /// Render the national map to an SVG string.
    pub fn to_svg_string(&self, projection: &AlbersUsa, width: f64, height: f64) -> Result<String> {
        let mut writer = SvgWriter::in_memory();
        self.write_svg(&mut writer, projection, width, height)?;
        writer.into_string()
    }

    fn write_svg<W: Write>(&self, writer: &mut SvgWriter<W>, projection: &AlbersUsa, width: f64, height: f64) -> Result<()> {
        writer.write_header(width, height)?;
        writer.write_styles()?;

        let project = |c: &Coord<f64>| projection.project(c);
        writeln!(writer, r#"<g class="states">"#)?;
        for joined in self.joined() {
            write_region(writer, joined.region, &joined.tooltip(), &project)?;
        }
        writeln!(writer, "</g>")?;

        writeln!(writer, r#"<g class="labels">"#)?;
        for label in &self.labels {
            write_label(writer, label)?;
        }
        writeln!(writer, "</g>")?;

        writer.write_footer()
    }
}

impl CountyView {
    /// Write the county map to an SVG file.
    pub fn to_svg(&self, path: &Path, projection: &AlbersUsa, width: f64, height: f64) -> Result<()> {
        let mut writer = SvgWriter::create(path)?;
        self.write_svg(&mut writer, projection, width, height)
    }

    /// Render the county map to an SVG string.
    pub fn to_svg_string(&self, projection: &AlbersUsa, width: f64, height: f64) -> Result<String> {
        let mut writer = SvgWriter::in_memory();
        self.write_svg(&mut writer, projection, width, height)?;
        writer.into_string()
    }

    /// Projected coordinates are zoomed around the state's center, which
    /// lands in the middle of the canvas.
    fn write_svg<W: Write>(&self, writer: &mut SvgWriter<W>, projection: &AlbersUsa, width: f64, height: f64) -> Result<()> {
        writer.write_header(width, height)?;
        writer.write_styles()?;

        let center = Coord { x: self.center.longitude, y: self.center.latitude };
        let focus = projection.project(&center)
            .unwrap_or_else(|| { let (x, y) = projection.translate(); Coord { x, y } });
        let zoom = self.center.zoom;
        let project = |c: &Coord<f64>| {
            projection.project(c).map(|p| Coord {
                x: (p.x - focus.x) * zoom + width / 2.0,
                y: (p.y - focus.y) * zoom + height / 2.0,
            })
        };

        writeln!(writer, r#"<g class="counties" data-state="{}">"#, self.state.fips())?;
        for county in self.counties.iter() {
            write_region(writer, county, &county.name, &project)?;
        }
        writeln!(writer, "</g>")?;

        writer.write_footer()
    }
}

/// One region as a titled group; regions with nothing drawable are skipped.
fn write_region<W: Write>(writer: &mut SvgWriter<W>, region: &Region, tooltip: &str, project: &Projection) -> Result<()> {
    let d = multipolygon_to_path(&region.geometry, project);
    if d.is_empty() { return Ok(()) }

    writeln!(writer, r#"<g data-id="{}"><title>{}</title><path class="region" d="{}"/></g>"#,
        escape(&region.id), escape(tooltip), d.trim_start())?;
    Ok(())
}

fn write_label<W: Write>(writer: &mut SvgWriter<W>, label: &LabelPlacement) -> Result<()> {
    if let Some(connector) = &label.connector {
        writeln!(writer, r#"<line class="connector" x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#,
            connector.from.x, connector.from.y, connector.to.x, connector.to.y)?;
    }
    writeln!(writer, r#"<text class="label" x="{:.3}" y="{:.3}" text-anchor="{}">{}</text>"#,
        label.text_position.x, label.text_position.y, label.text_align.as_svg(), escape(&label.text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use geo::{polygon, MultiPolygon};

    use super::*;
    use crate::{label::place_labels, summary::SummaryRecord, types::{RegionLevel, StateId}};

    fn square(level: RegionLevel, id: &str, name: &str, lon: f64, lat: f64) -> Region {
        let shape = polygon![
            (x: lon, y: lat), (x: lon + 1.0, y: lat), (x: lon + 1.0, y: lat + 1.0), (x: lon, y: lat + 1.0), (x: lon, y: lat),
        ];
        Region::new(level, id, name, MultiPolygon(vec![shape]))
    }

    fn national() -> NationalView {
        let regions: Arc<[Region]> = vec![
            square(RegionLevel::State, "48", "Texas", -100.0, 31.0),
            square(RegionLevel::State, "50", "Vermont", -73.0, 43.5),
            square(RegionLevel::State, "99", "Atlantis", 2.0, 48.0),
        ].into();
        let labels = place_labels(&regions, &AlbersUsa::standard().unwrap());
        NationalView {
            regions,
            summaries: vec![SummaryRecord { state: "Texas".into(), vehicles: 120, rides: 4500 }].into(),
            labels,
            summary_available: true,
        }
    }

    #[test]
    fn national_svg_draws_projectable_regions() {
        let svg = national().to_svg_string(&AlbersUsa::standard().unwrap(), 960.0, 500.0).unwrap();

        // Atlantis lies outside every inset and is not drawn.
        assert_eq!(svg.matches(r#"<path class="region""#).count(), 2);
        assert!(svg.contains("<title>Texas\nVehicles: 120\nRides: 4500</title>"));
        assert!(svg.contains("<title>Vermont</title>"));
    }

    #[test]
    fn national_svg_draws_connector_for_offset_labels() {
        let svg = national().to_svg_string(&AlbersUsa::standard().unwrap(), 960.0, 500.0).unwrap();

        assert_eq!(svg.matches(r#"<line class="connector""#).count(), 1);
        assert!(svg.contains(r#"text-anchor="end">VT</text>"#));
        assert!(svg.contains(r#"text-anchor="middle">TX</text>"#));
    }

    #[test]
    fn county_svg_centers_state() {
        let view = CountyView {
            state: StateId::Texas,
            counties: vec![square(RegionLevel::County, "48453", "Travis", -98.0, 30.0)].into(),
            center: StateId::Texas.center(),
            detail: None,
        };
        let svg = view.to_svg_string(&AlbersUsa::standard().unwrap(), 800.0, 600.0).unwrap();

        assert!(svg.contains(r#"data-state="48""#));
        assert!(svg.contains("<title>Travis</title>"));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn svg_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("national.svg");
        national().to_svg(&path, &AlbersUsa::standard().unwrap(), 960.0, 500.0).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
