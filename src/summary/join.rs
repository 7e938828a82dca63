use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::types::Region;

/// Aggregate telemetry for one state, as served by `/api/us-summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub state: String,
    pub vehicles: u64,
    pub rides: u64,
}

/// A map region paired with its summary, if one matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joined<'a> {
    pub region: &'a Region,
    pub summary: Option<&'a SummaryRecord>,
}

impl Joined<'_> {
    /// Tooltip text: name plus counts when matched, the bare name otherwise.
    pub fn tooltip(&self) -> String {
        match self.summary {
            Some(record) => format!("{}\nVehicles: {}\nRides: {}", self.region.name, record.vehicles, record.rides),
            None => self.region.name.to_string(),
        }
    }
}

/// Pair every region with the summary whose `state` equals the region name exactly.
/// Regions without a match keep `None`; with duplicate records the first wins.
pub fn join<'a>(regions: &'a [Region], summaries: &'a [SummaryRecord]) -> Vec<Joined<'a>> {
    let mut by_name: AHashMap<&str, &SummaryRecord> = AHashMap::with_capacity(summaries.len());
    for record in summaries {
        by_name.entry(record.state.as_str()).or_insert(record);
    }

    regions.iter()
        .map(|region| Joined { region, summary: by_name.get(&*region.name).copied() })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::MultiPolygon;

    use super::*;
    use crate::types::RegionLevel;

    fn state(id: &str, name: &str) -> Region {
        Region::new(RegionLevel::State, id, name, MultiPolygon(vec![]))
    }

    fn record(state: &str, vehicles: u64, rides: u64) -> SummaryRecord {
        SummaryRecord { state: state.to_string(), vehicles, rides }
    }

    #[test]
    fn matched_tooltip_has_counts() {
        let regions = [state("48", "Texas")];
        let summaries = [record("Texas", 100, 40)];
        let joined = join(&regions, &summaries);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].summary, Some(&summaries[0]));
        assert_eq!(joined[0].tooltip(), "Texas\nVehicles: 100\nRides: 40");
    }

    #[test]
    fn unmatched_tooltip_is_name_only() {
        let regions = [state("48", "Texas")];
        let joined = join(&regions, &[]);
        assert_eq!(joined[0].summary, None);
        assert_eq!(joined[0].tooltip(), "Texas");
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let regions = [state("48", "Texas"), state("36", "New York")];
        let summaries = [record("texas", 1, 1), record("New York ", 2, 2)];
        let joined = join(&regions, &summaries);
        assert!(joined.iter().all(|j| j.summary.is_none()));
    }

    #[test]
    fn keeps_region_order_and_first_duplicate() {
        let regions = [state("50", "Vermont"), state("48", "Texas"), state("01", "Alabama")];
        let summaries = [record("Texas", 5, 1), record("Vermont", 7, 3), record("Texas", 9, 9)];
        let joined = join(&regions, &summaries);

        let names: Vec<&str> = joined.iter().map(|j| &*j.region.name).collect();
        assert_eq!(names, vec!["Vermont", "Texas", "Alabama"]);
        assert_eq!(joined[1].summary.map(|s| s.vehicles), Some(5));
        assert_eq!(joined[2].tooltip(), "Alabama");
    }

    #[test]
    fn deserializes_api_payload() {
        let json = r#"[{"state":"Ohio","vehicles":12,"rides":4}]"#;
        let records: Vec<SummaryRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records, vec![record("Ohio", 12, 4)]);
    }
}
