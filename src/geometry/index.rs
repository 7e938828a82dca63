use std::sync::Arc;

use ahash::AHashMap;
use serde_json::Value;
use tracing::{debug, info};

use super::{geojson::read_feature_collection, source::BoundarySource, topojson::read_topology};
use crate::{
    error::{DrillError, GeometrySourceError},
    types::{Region, RegionLevel, StateId},
};

/// Decode a boundary payload, detecting GeoJSON FeatureCollection vs TopoJSON Topology.
/// For a Topology, `object` names the geometry collection to read.
pub fn decode_regions(bytes: &[u8], level: RegionLevel, object: &str) -> Result<Vec<Region>, GeometrySourceError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| GeometrySourceError::malformed(format!("invalid JSON: {e}")))?;

    match value["type"].as_str() {
        Some("Topology") => read_topology(&value, level, object),
        Some("FeatureCollection") => read_feature_collection(&value, level),
        other => Err(GeometrySourceError::malformed(format!("unsupported boundary document type {other:?}"))),
    }
}

/// Counties whose FIPS identifier starts with `state`'s two-character prefix.
pub fn counties_in(counties: &[Region], state: StateId) -> Vec<Region> {
    counties.iter()
        .filter(|county| county.id.starts_with(state.fips()))
        .cloned()
        .collect()
}

/// Loads and caches national and per-state county boundaries.
///
/// Boundaries are immutable for a session, so every successful load is cached:
/// the national layer once, the full county layer once, and each state's
/// filtered counties by `StateId`. Failed loads are not cached.
pub struct GeometryIndex<B> {
    source: B,
    state_object: String,
    county_object: String,
    national: Option<Arc<[Region]>>,
    all_counties: Option<Arc<[Region]>>,
    counties: AHashMap<StateId, Arc<[Region]>>,
}

impl<B: BoundarySource> GeometryIndex<B> {
    pub fn new(source: B) -> Self {
        Self {
            source,
            state_object: RegionLevel::State.topology_object().to_string(),
            county_object: RegionLevel::County.topology_object().to_string(),
            national: None,
            all_counties: None,
            counties: AHashMap::new(),
        }
    }

    /// Override the TopoJSON object read for `level` (default "states" / "counties").
    pub fn with_topology_object(mut self, level: RegionLevel, object: impl Into<String>) -> Self {
        match level {
            RegionLevel::State => self.state_object = object.into(),
            RegionLevel::County => self.county_object = object.into(),
        }
        self
    }

    pub fn source(&self) -> &B { &self.source }

    /// All state boundaries (50 states + DC, plus whatever else the source carries).
    pub async fn load_national_boundaries(&mut self) -> Result<Arc<[Region]>, GeometrySourceError> {
        if let Some(national) = &self.national {
            debug!(count = national.len(), "national boundaries cached");
            return Ok(national.clone());
        }

        let bytes = self.source.fetch(RegionLevel::State).await?;
        let regions: Arc<[Region]> = decode_regions(&bytes, RegionLevel::State, &self.state_object)?.into();
        info!(count = regions.len(), "loaded national boundaries");

        self.national = Some(regions.clone());
        Ok(regions)
    }

    /// Counties of the state with display name `state_name`.
    /// Unknown names fail with `UnsupportedRegion`, never with an empty set.
    pub async fn load_county_boundaries(&mut self, state_name: &str) -> Result<Arc<[Region]>, DrillError> {
        let state = StateId::from_name(state_name)?;
        Ok(self.load_county_boundaries_for(state).await?)
    }

    pub async fn load_county_boundaries_for(&mut self, state: StateId) -> Result<Arc<[Region]>, GeometrySourceError> {
        if let Some(counties) = self.counties.get(&state) {
            debug!(%state, count = counties.len(), "county boundaries cached");
            return Ok(counties.clone());
        }

        let all = match &self.all_counties {
            Some(all) => all.clone(),
            None => {
                let bytes = self.source.fetch(RegionLevel::County).await?;
                let all: Arc<[Region]> = decode_regions(&bytes, RegionLevel::County, &self.county_object)?.into();
                info!(count = all.len(), "loaded county boundaries");
                self.all_counties = Some(all.clone());
                all
            }
        };

        let counties: Arc<[Region]> = counties_in(&all, state).into();
        debug!(%state, fips = state.fips(), count = counties.len(), "filtered counties");

        self.counties.insert(state, counties.clone());
        Ok(counties)
    }
}
