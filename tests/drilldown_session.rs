use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use geodrill::{
    AlbersUsa, BoundarySource, DetailOutcome, GeometryIndex, GeometrySourceError, RegionLevel, Session, StateId,
    SummaryFetchError, SummaryRecord, TelemetryApi, View,
};
use serde_json::{json, Value};

fn square(lon: f64, lat: f64) -> Value {
    json!({ "type": "Polygon", "coordinates": [[
        [lon, lat], [lon + 1.0, lat], [lon + 1.0, lat + 1.0], [lon, lat + 1.0], [lon, lat],
    ]]})
}

struct Boundaries;

impl BoundarySource for Boundaries {
    async fn fetch(&self, level: RegionLevel) -> Result<Vec<u8>, GeometrySourceError> {
        let collection = match level {
            RegionLevel::State => json!({ "type": "FeatureCollection", "features": [
                { "id": "48", "properties": { "name": "Texas" }, "geometry": square(-100.0, 31.0) },
                { "id": "36", "properties": { "name": "New York" }, "geometry": square(-75.0, 42.5) },
                { "id": "50", "properties": { "name": "Vermont" }, "geometry": square(-73.0, 43.5) },
            ]}),
            RegionLevel::County => json!({ "type": "FeatureCollection", "features": [
                { "id": "48453", "properties": { "name": "Travis" }, "geometry": square(-98.0, 30.0) },
                { "id": "36061", "properties": { "name": "New York" }, "geometry": square(-74.0, 40.7) },
                { "id": "48201", "properties": { "name": "Harris" }, "geometry": square(-95.5, 29.5) },
            ]}),
        };
        Ok(collection.to_string().into_bytes())
    }
}

/// Telemetry backend with a switchable summary and echoing state detail.
struct Scripted {
    summary_down: bool,
    summary_calls: Arc<AtomicUsize>,
}

impl Scripted {
    fn up() -> Self { Self { summary_down: false, summary_calls: Arc::default() } }

    fn down() -> Self { Self { summary_down: true, summary_calls: Arc::default() } }
}

impl TelemetryApi for Scripted {
    async fn us_summary(&self) -> Result<Vec<SummaryRecord>, SummaryFetchError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        if self.summary_down {
            return Err(SummaryFetchError::Status { url: "/api/us-summary".into(), status: 503 });
        }
        Ok(vec![
            SummaryRecord { state: "Texas".into(), vehicles: 120, rides: 4500 },
            SummaryRecord { state: "New York".into(), vehicles: 80, rides: 1900 },
        ])
    }

    async fn state_detail(&self, state: StateId) -> Result<Value, SummaryFetchError> {
        if state == StateId::Vermont {
            return Err(SummaryFetchError::Missing("state detail"));
        }
        Ok(json!({ "state": state.name() }))
    }
}

fn session(api: Scripted) -> Session<Boundaries, Scripted> {
    Session::new(GeometryIndex::new(Boundaries), api, AlbersUsa::standard().unwrap())
}

#[tokio::test]
async fn national_view_joins_summary_and_labels() {
    let api = Scripted::up();
    let calls = Arc::clone(&api.summary_calls);
    let mut session = session(api);
    let view = session.national_view().await.unwrap();
    session.national_view().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(view.summary_available);
    let tooltips: Vec<String> = view.joined().iter().map(|j| j.tooltip()).collect();
    assert_eq!(tooltips, vec![
        "Texas\nVehicles: 120\nRides: 4500".to_string(),
        "New York\nVehicles: 80\nRides: 1900".to_string(),
        "Vermont".to_string(),
    ]);

    let vermont = view.labels.iter().find(|l| l.region == "Vermont").unwrap();
    assert_eq!(vermont.text, "VT");
    assert!(vermont.connector.is_some());
    let texas = view.labels.iter().find(|l| l.region == "Texas").unwrap();
    assert!(texas.connector.is_none());
}

#[tokio::test]
async fn summary_failure_degrades_to_names_and_is_retried() {
    let api = Scripted::down();
    let calls = Arc::clone(&api.summary_calls);
    let mut session = session(api);

    let view = session.national_view().await.unwrap();
    assert!(!view.summary_available);
    assert!(view.joined().iter().all(|j| j.summary.is_none()));
    assert_eq!(view.joined()[0].tooltip(), "Texas");

    session.national_view().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn county_view_follows_selection() {
    let mut session = session(Scripted::up());
    assert!(session.county_view().await.unwrap().is_none());

    let ticket = session.select_state(StateId::Texas);
    assert!(matches!(session.load_detail(ticket).await, DetailOutcome::Applied));

    let view = session.county_view().await.unwrap().unwrap();
    assert_eq!(view.state, StateId::Texas);
    assert_eq!(view.center, StateId::Texas.center());
    let names: Vec<&str> = view.tooltips().collect();
    assert_eq!(names, vec!["Travis", "Harris"]);
    assert_eq!(view.detail.unwrap().payload, json!({ "state": "Texas" }));
}

#[tokio::test]
async fn stale_detail_is_discarded() {
    let mut session = session(Scripted::up());

    let texas = session.select_state(StateId::Texas);
    let texas_request = session.detail_request(texas);
    let new_york = session.select_state(StateId::NewYork);
    let new_york_request = session.detail_request(new_york);

    // New York resolves first, then the slower Texas response arrives.
    let new_york_response = new_york_request.await;
    assert!(matches!(session.apply_detail(new_york_response), DetailOutcome::Applied));
    let texas_response = texas_request.await;
    assert!(matches!(session.apply_detail(texas_response), DetailOutcome::Stale));

    assert_eq!(session.current_view(), View::County(StateId::NewYork));
    assert_eq!(session.detail().unwrap().payload, json!({ "state": "New York" }));
}

#[tokio::test]
async fn back_clears_detail_and_rejects_late_response() {
    let mut session = session(Scripted::up());

    let ticket = session.select_state(StateId::Texas);
    assert!(matches!(session.load_detail(ticket).await, DetailOutcome::Applied));
    let late = session.detail_request(ticket);

    assert!(session.back());
    assert!(session.detail().is_none());
    assert!(matches!(session.apply_detail(late.await), DetailOutcome::Stale));
    assert_eq!(session.current_view(), View::National);
    assert!(!session.back());
}

#[tokio::test]
async fn failed_detail_leaves_view_without_detail() {
    let mut session = session(Scripted::up());

    let ticket = session.select_state(StateId::Vermont);
    assert!(matches!(session.load_detail(ticket).await, DetailOutcome::Failed(SummaryFetchError::Missing(_))));

    let view = session.county_view().await.unwrap().unwrap();
    assert!(view.detail.is_none());
    assert!(view.counties.is_empty());
}

#[tokio::test]
async fn unknown_state_name_keeps_current_view() {
    let mut session = session(Scripted::up());
    session.select_state(StateId::Texas);

    let err = session.select_state_by_name("Atlantis").unwrap_err();
    assert_eq!(err.name, "Atlantis");
    assert_eq!(session.current_view(), View::County(StateId::Texas));
}
