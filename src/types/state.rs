use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::UnsupportedRegion;

/// One of the 50 US states or the District of Columbia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateId {
    Alabama,
    Alaska,
    Arizona,
    Arkansas,
    California,
    Colorado,
    Connecticut,
    Delaware,
    DistrictOfColumbia,
    Florida,
    Georgia,
    Hawaii,
    Idaho,
    Illinois,
    Indiana,
    Iowa,
    Kansas,
    Kentucky,
    Louisiana,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Mississippi,
    Missouri,
    Montana,
    Nebraska,
    Nevada,
    NewHampshire,
    NewJersey,
    NewMexico,
    NewYork,
    NorthCarolina,
    NorthDakota,
    Ohio,
    Oklahoma,
    Oregon,
    Pennsylvania,
    RhodeIsland,
    SouthCarolina,
    SouthDakota,
    Tennessee,
    Texas,
    Utah,
    Vermont,
    Virginia,
    Washington,
    WestVirginia,
    Wisconsin,
    Wyoming,
}

/// Viewport focus used when entering a state's county view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateCenter {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl StateCenter {
    /// Continental fallback for states without a tuned viewport.
    pub const FALLBACK: StateCenter = StateCenter { longitude: -98.0, latitude: 39.0, zoom: 5.0 };

    const fn new(longitude: f64, latitude: f64, zoom: f64) -> Self {
        Self { longitude, latitude, zoom }
    }
}

/// Pixel displacement of a state label away from its centroid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LabelOffset {
    pub dx: f64,
    pub dy: f64,
}

impl LabelOffset {
    const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl StateId {
    pub const ALL: [StateId; 51] = [
        StateId::Alabama, StateId::Alaska, StateId::Arizona, StateId::Arkansas,
        StateId::California, StateId::Colorado, StateId::Connecticut, StateId::Delaware,
        StateId::DistrictOfColumbia, StateId::Florida, StateId::Georgia, StateId::Hawaii,
        StateId::Idaho, StateId::Illinois, StateId::Indiana, StateId::Iowa,
        StateId::Kansas, StateId::Kentucky, StateId::Louisiana, StateId::Maine,
        StateId::Maryland, StateId::Massachusetts, StateId::Michigan, StateId::Minnesota,
        StateId::Mississippi, StateId::Missouri, StateId::Montana, StateId::Nebraska,
        StateId::Nevada, StateId::NewHampshire, StateId::NewJersey, StateId::NewMexico,
        StateId::NewYork, StateId::NorthCarolina, StateId::NorthDakota, StateId::Ohio,
        StateId::Oklahoma, StateId::Oregon, StateId::Pennsylvania, StateId::RhodeIsland,
        StateId::SouthCarolina, StateId::SouthDakota, StateId::Tennessee, StateId::Texas,
        StateId::Utah, StateId::Vermont, StateId::Virginia, StateId::Washington,
        StateId::WestVirginia, StateId::Wisconsin, StateId::Wyoming,
    ];

    /// Return (display name, USPS code, two-digit FIPS code).
    fn info(self) -> (&'static str, &'static str, &'static str) {
        match self {
            StateId::Alabama => ("Alabama", "AL", "01"),
            StateId::Alaska => ("Alaska", "AK", "02"),
            StateId::Arizona => ("Arizona", "AZ", "04"),
            StateId::Arkansas => ("Arkansas", "AR", "05"),
            StateId::California => ("California", "CA", "06"),
            StateId::Colorado => ("Colorado", "CO", "08"),
            StateId::Connecticut => ("Connecticut", "CT", "09"),
            StateId::Delaware => ("Delaware", "DE", "10"),
            StateId::DistrictOfColumbia => ("District of Columbia", "DC", "11"),
            StateId::Florida => ("Florida", "FL", "12"),
            StateId::Georgia => ("Georgia", "GA", "13"),
            StateId::Hawaii => ("Hawaii", "HI", "15"),
            StateId::Idaho => ("Idaho", "ID", "16"),
            StateId::Illinois => ("Illinois", "IL", "17"),
            StateId::Indiana => ("Indiana", "IN", "18"),
            StateId::Iowa => ("Iowa", "IA", "19"),
            StateId::Kansas => ("Kansas", "KS", "20"),
            StateId::Kentucky => ("Kentucky", "KY", "21"),
            StateId::Louisiana => ("Louisiana", "LA", "22"),
            StateId::Maine => ("Maine", "ME", "23"),
            StateId::Maryland => ("Maryland", "MD", "24"),
            StateId::Massachusetts => ("Massachusetts", "MA", "25"),
            StateId::Michigan => ("Michigan", "MI", "26"),
            StateId::Minnesota => ("Minnesota", "MN", "27"),
            StateId::Mississippi => ("Mississippi", "MS", "28"),
            StateId::Missouri => ("Missouri", "MO", "29"),
            StateId::Montana => ("Montana", "MT", "30"),
            StateId::Nebraska => ("Nebraska", "NE", "31"),
            StateId::Nevada => ("Nevada", "NV", "32"),
            StateId::NewHampshire => ("New Hampshire", "NH", "33"),
            StateId::NewJersey => ("New Jersey", "NJ", "34"),
            StateId::NewMexico => ("New Mexico", "NM", "35"),
            StateId::NewYork => ("New York", "NY", "36"),
            StateId::NorthCarolina => ("North Carolina", "NC", "37"),
            StateId::NorthDakota => ("North Dakota", "ND", "38"),
            StateId::Ohio => ("Ohio", "OH", "39"),
            StateId::Oklahoma => ("Oklahoma", "OK", "40"),
            StateId::Oregon => ("Oregon", "OR", "41"),
            StateId::Pennsylvania => ("Pennsylvania", "PA", "42"),
            StateId::RhodeIsland => ("Rhode Island", "RI", "44"),
            StateId::SouthCarolina => ("South Carolina", "SC", "45"),
            StateId::SouthDakota => ("South Dakota", "SD", "46"),
            StateId::Tennessee => ("Tennessee", "TN", "47"),
            StateId::Texas => ("Texas", "TX", "48"),
            StateId::Utah => ("Utah", "UT", "49"),
            StateId::Vermont => ("Vermont", "VT", "50"),
            StateId::Virginia => ("Virginia", "VA", "51"),
            StateId::Washington => ("Washington", "WA", "53"),
            StateId::WestVirginia => ("West Virginia", "WV", "54"),
            StateId::Wisconsin => ("Wisconsin", "WI", "55"),
            StateId::Wyoming => ("Wyoming", "WY", "56"),
        }
    }

    /// Display name as it appears in boundary features and summary records.
    pub fn name(self) -> &'static str { self.info().0 }

    /// USPS postal abbreviation, used as the map label.
    pub fn abbr(self) -> &'static str { self.info().1 }

    /// Two-character FIPS code; every county id of this state starts with it.
    pub fn fips(self) -> &'static str { self.info().2 }

    /// Look up a state by its exact (case-sensitive) display name.
    pub fn from_name(name: &str) -> Result<StateId, UnsupportedRegion> {
        Self::ALL.into_iter()
            .find(|state| state.name() == name)
            .ok_or_else(|| UnsupportedRegion::new(name))
    }

    pub fn from_abbr(code: &str) -> Result<StateId, UnsupportedRegion> {
        let code = code.to_ascii_uppercase();
        Self::ALL.into_iter()
            .find(|state| state.abbr() == code)
            .ok_or_else(|| UnsupportedRegion::new(&code))
    }

    pub fn from_fips(fips: &str) -> Result<StateId, UnsupportedRegion> {
        Self::ALL.into_iter()
            .find(|state| state.fips() == fips)
            .ok_or_else(|| UnsupportedRegion::new(fips))
    }

    /// Tuned viewport for the county view, if one exists.
    pub fn tuned_center(self) -> Option<StateCenter> {
        let center = match self {
            StateId::Alabama => StateCenter::new(-86.9023, 32.3182, 5.0),
            StateId::Alaska => StateCenter::new(-154.4931, 63.5887, 3.0),
            StateId::Arizona => StateCenter::new(-111.0937, 34.0489, 5.0),
            StateId::Arkansas => StateCenter::new(-92.3731, 34.9697, 5.0),
            StateId::California => StateCenter::new(-119.4179, 36.7783, 5.0),
            StateId::Colorado => StateCenter::new(-105.7821, 39.5501, 5.0),
            StateId::Connecticut => StateCenter::new(-72.7554, 41.6032, 6.0),
            StateId::Delaware => StateCenter::new(-75.5277, 38.9108, 7.0),
            StateId::Florida => StateCenter::new(-81.5158, 27.6648, 5.0),
            StateId::Georgia => StateCenter::new(-83.4419, 32.1656, 5.0),
            StateId::Hawaii => StateCenter::new(-155.5828, 19.8968, 6.0),
            StateId::Idaho => StateCenter::new(-114.742, 44.0682, 5.0),
            StateId::Illinois => StateCenter::new(-89.3985, 40.6331, 5.0),
            StateId::Indiana => StateCenter::new(-86.1349, 40.2672, 5.0),
            StateId::Iowa => StateCenter::new(-93.0977, 41.878, 5.0),
            StateId::Kansas => StateCenter::new(-98.4842, 38.9717, 5.0),
            StateId::Kentucky => StateCenter::new(-84.27, 37.8393, 5.0),
            StateId::Louisiana => StateCenter::new(-91.9623, 31.2448, 5.0),
            StateId::Maine => StateCenter::new(-69.4455, 45.2538, 6.0),
            StateId::Maryland => StateCenter::new(-76.6413, 39.0458, 5.0),
            StateId::Massachusetts => StateCenter::new(-71.3824, 42.4072, 5.0),
            StateId::Michigan => StateCenter::new(-85.6024, 44.3148, 5.0),
            StateId::Minnesota => StateCenter::new(-94.6859, 46.7296, 5.0),
            StateId::Mississippi => StateCenter::new(-89.3985, 32.3547, 5.0),
            StateId::Missouri => StateCenter::new(-91.8318, 38.4561, 5.0),
            StateId::Montana => StateCenter::new(-110.3626, 46.8797, 5.0),
            StateId::Nebraska => StateCenter::new(-99.9018, 41.4925, 5.0),
            StateId::Nevada => StateCenter::new(-116.4194, 38.8026, 5.0),
            StateId::NewHampshire => StateCenter::new(-71.5724, 43.1939, 6.0),
            StateId::NewJersey => StateCenter::new(-74.4057, 40.0583, 5.0),
            StateId::NewMexico => StateCenter::new(-105.8701, 34.5199, 5.0),
            StateId::NewYork => StateCenter::new(-74.2179, 43.2994, 5.0),
            StateId::NorthCarolina => StateCenter::new(-79.0193, 35.7596, 5.0),
            StateId::NorthDakota => StateCenter::new(-101.002, 47.5515, 5.0),
            StateId::Ohio => StateCenter::new(-82.9071, 40.4173, 5.0),
            StateId::Oklahoma => StateCenter::new(-97.0929, 35.0078, 5.0),
            StateId::Oregon => StateCenter::new(-120.5542, 43.8041, 5.0),
            StateId::Pennsylvania => StateCenter::new(-77.1945, 41.2033, 5.0),
            StateId::RhodeIsland => StateCenter::new(-71.4774, 41.5801, 7.0),
            StateId::SouthCarolina => StateCenter::new(-81.1637, 33.8361, 5.0),
            StateId::SouthDakota => StateCenter::new(-99.9018, 43.9695, 5.0),
            StateId::Tennessee => StateCenter::new(-86.5804, 35.5175, 5.0),
            StateId::Texas => StateCenter::new(-99.9018, 31.9686, 4.0),
            StateId::Utah => StateCenter::new(-111.0937, 39.32, 5.0),
            StateId::Vermont => StateCenter::new(-72.5778, 44.5588, 6.0),
            StateId::Virginia => StateCenter::new(-78.6569, 37.4316, 5.0),
            StateId::Washington => StateCenter::new(-120.7401, 47.7511, 5.0),
            StateId::WestVirginia => StateCenter::new(-80.4549, 38.5976, 5.0),
            StateId::Wisconsin => StateCenter::new(-89.6165, 44.2685, 5.0),
            StateId::Wyoming => StateCenter::new(-107.2903, 43.07597, 5.0),
            StateId::DistrictOfColumbia => return None,
        };
        Some(center)
    }

    /// Viewport for the county view, falling back to the continental default.
    pub fn center(self) -> StateCenter {
        self.tuned_center().unwrap_or(StateCenter::FALLBACK)
    }

    /// Label displacement for the crowded Northeast; zero everywhere else.
    pub fn label_offset(self) -> LabelOffset {
        match self {
            StateId::Vermont => LabelOffset::new(50.0, -10.0),
            StateId::NewHampshire => LabelOffset::new(60.0, 0.0),
            StateId::Massachusetts => LabelOffset::new(40.0, -10.0),
            StateId::RhodeIsland => LabelOffset::new(40.0, 0.0),
            StateId::Connecticut => LabelOffset::new(40.0, 30.0),
            StateId::NewJersey => LabelOffset::new(40.0, 20.0),
            StateId::Delaware => LabelOffset::new(40.0, 20.0),
            StateId::Maryland => LabelOffset::new(40.0, 30.0),
            StateId::DistrictOfColumbia => LabelOffset::new(50.0, 50.0),
            _ => LabelOffset::default(),
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for StateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_and_fips_are_bijective() {
        let names: HashSet<_> = StateId::ALL.iter().map(|s| s.name()).collect();
        let fips: HashSet<_> = StateId::ALL.iter().map(|s| s.fips()).collect();
        let abbrs: HashSet<_> = StateId::ALL.iter().map(|s| s.abbr()).collect();
        assert_eq!(names.len(), 51);
        assert_eq!(fips.len(), 51);
        assert_eq!(abbrs.len(), 51);

        for state in StateId::ALL {
            assert_eq!(StateId::from_name(state.name()), Ok(state));
            assert_eq!(StateId::from_fips(state.fips()), Ok(state));
            assert_eq!(StateId::from_abbr(state.abbr()), Ok(state));
            assert_eq!(state.fips().len(), 2);
            assert!(state.fips().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn name_lookup_is_exact() {
        assert_eq!(StateId::from_name("New York"), Ok(StateId::NewYork));
        assert!(StateId::from_name("new york").is_err());
        assert!(StateId::from_name("Texas ").is_err());
        assert!(StateId::from_name("Puerto Rico").is_err());

        let err = StateId::from_name("Atlantis").unwrap_err();
        assert_eq!(err.name, "Atlantis");
    }

    #[test]
    fn abbr_lookup_ignores_case() {
        assert_eq!(StateId::from_abbr("ne"), Ok(StateId::Nebraska));
        assert!(StateId::from_abbr("PR").is_err());
    }

    #[test]
    fn center_falls_back_for_untuned_states() {
        assert_eq!(StateId::DistrictOfColumbia.tuned_center(), None);
        assert_eq!(StateId::DistrictOfColumbia.center(), StateCenter::FALLBACK);

        let texas = StateId::Texas.center();
        assert_eq!((texas.longitude, texas.latitude, texas.zoom), (-99.9018, 31.9686, 4.0));
    }

    #[test]
    fn only_crowded_states_carry_offsets() {
        let offset: Vec<_> = StateId::ALL.into_iter()
            .filter(|s| !s.label_offset().is_zero())
            .collect();
        assert_eq!(offset.len(), 9);
        assert_eq!(StateId::Vermont.label_offset(), LabelOffset { dx: 50.0, dy: -10.0 });
        assert!(StateId::Texas.label_offset().is_zero());
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&StateId::RhodeIsland).unwrap();
        assert_eq!(json, r#""Rhode Island""#);
        assert_eq!(StateId::RhodeIsland.to_string(), "Rhode Island");
    }
}
