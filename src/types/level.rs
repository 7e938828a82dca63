use serde::Serialize;

/// Administrative level of a map region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    State,      // National view
    County,     // County -> State
}

impl RegionLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            RegionLevel::State => "state",
            RegionLevel::County => "county",
        }
    }

    /// Length of a FIPS identifier at this level (leading zeros included).
    pub fn id_len(&self) -> usize {
        match self {
            RegionLevel::State => 2,
            RegionLevel::County => 5,
        }
    }

    /// Default TopoJSON object holding this level's geometries.
    pub fn topology_object(&self) -> &'static str {
        match self {
            RegionLevel::State => "states",
            RegionLevel::County => "counties",
        }
    }
}
