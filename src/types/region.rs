use std::sync::Arc;

use geo::{Centroid, MultiPolygon, Point};

use super::{level::RegionLevel, state::StateId};

/// A boundary feature: a state or a county.
/// Keep the original FIPS text (with leading zeros) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub level: RegionLevel,
    pub id: Arc<str>,   // e.g., "31" for a state, "31001" for a county
    pub name: Arc<str>, // Display name, matched against summary records
    pub geometry: MultiPolygon<f64>,
}

impl Region {
    pub fn new(level: RegionLevel, id: impl Into<Arc<str>>, name: impl Into<Arc<str>>, geometry: MultiPolygon<f64>) -> Self {
        Self { level, id: id.into(), name: name.into(), geometry }
    }

    /// The two-character state prefix of this region's identifier.
    /// If the id is shorter than expected, just take the full id.
    pub fn state_fips(&self) -> &str {
        let end = self.id.char_indices()
            .nth(RegionLevel::State.id_len())
            .map_or(self.id.len(), |(i, _)| i);
        &self.id[..end]
    }

    /// The state this region belongs to, resolved through its FIPS prefix.
    pub fn state(&self) -> Option<StateId> {
        StateId::from_fips(self.state_fips()).ok()
    }

    /// Planar centroid in lon/lat, or `None` for an empty geometry.
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.geometry.centroid()
    }
}
