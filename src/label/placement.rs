use geo::Coord;
use serde::Serialize;

use crate::{
    geometry::AlbersUsa,
    types::{LabelOffset, Region, StateId},
};

/// Horizontal distance from an offset anchor to the end of its label text.
pub const LABEL_INSET: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    End,
    Middle,
}

impl TextAlign {
    /// Value of the SVG `text-anchor` attribute.
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAlign::End => "end",
            TextAlign::Middle => "middle",
        }
    }
}

/// Line from a region's centroid out to its displaced label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub from: Coord<f64>,
    pub to: Coord<f64>,
}

/// Where and how to draw one region label, in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub region: String,
    pub text: String,
    pub anchor: Coord<f64>,
    pub text_position: Coord<f64>,
    pub connector: Option<Connector>,
    pub text_align: TextAlign,
}

/// Offset for `region`, zero for regions without a state mapping or override.
pub fn label_offset(region: &Region) -> LabelOffset {
    StateId::from_name(&region.name)
        .map(StateId::label_offset)
        .unwrap_or_default()
}

/// State abbreviation, or the region's own name when it has no mapping.
pub fn label_text(region: &Region) -> &str {
    match StateId::from_name(&region.name) {
        Ok(state) => state.abbr(),
        Err(_) => &region.name,
    }
}

/// Place the label for `region` around its projected `centroid`.
///
/// Regions with a non-zero offset get their anchor displaced, a connector back
/// to the centroid, and right-aligned text ending `LABEL_INSET` past the anchor,
/// so crowded Northeast labels line up in a common column.
pub fn place_label(region: &Region, centroid: Coord<f64>, abbreviation: &str) -> LabelPlacement {
    let offset = label_offset(region);
    let anchor = Coord { x: centroid.x + offset.dx, y: centroid.y + offset.dy };

    let (text_position, connector, text_align) = if offset.is_zero() {
        (anchor, None, TextAlign::Middle)
    } else {
        (
            Coord { x: anchor.x + LABEL_INSET, y: anchor.y },
            Some(Connector { from: centroid, to: anchor }),
            TextAlign::End,
        )
    };

    LabelPlacement {
        region: region.name.to_string(),
        text: abbreviation.to_string(),
        anchor,
        text_position,
        connector,
        text_align,
    }
}

/// Label every region whose centroid exists and falls inside the projection.
///
/// The anchor is the planar lon/lat centroid (`geo::Centroid`), not the
/// spherical centroid; for large states the two can sit a few pixels apart.
pub fn place_labels(regions: &[Region], projection: &AlbersUsa) -> Vec<LabelPlacement> {
    regions.iter()
        .filter_map(|region| {
            let centroid = projection.project(&region.centroid()?.0)?;
            Some(place_label(region, centroid, label_text(region)))
        })
        .collect()
}
