use std::{future::Future, sync::Arc};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::state::{DetailTicket, DrillDown, View};
use crate::{
    error::{GeometrySourceError, SummaryFetchError, UnsupportedRegion},
    geometry::{AlbersUsa, BoundarySource, GeometryIndex},
    label::{place_labels, LabelPlacement},
    summary::{join, Joined, SummaryRecord, TelemetryApi},
    types::{Region, StateCenter, StateId},
};

/// Everything needed to draw the national map.
#[derive(Debug, Clone)]
pub struct NationalView {
    pub regions: Arc<[Region]>,
    pub summaries: Arc<[SummaryRecord]>,
    pub labels: Vec<LabelPlacement>,
    /// `false` when the summary fetch failed and tooltips fall back to names.
    pub summary_available: bool,
}

impl NationalView {
    pub fn joined(&self) -> Vec<Joined<'_>> {
        join(&self.regions, &self.summaries)
    }
}

/// The state-detail payload applied for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateDetail {
    pub state: StateId,
    pub payload: Value,
}

/// Everything needed to draw one state's county map.
#[derive(Debug, Clone)]
pub struct CountyView {
    pub state: StateId,
    pub counties: Arc<[Region]>,
    pub center: StateCenter,
    pub detail: Option<StateDetail>,
}

impl CountyView {
    /// County tooltips are the bare county names.
    pub fn tooltips(&self) -> impl Iterator<Item = &str> + '_ {
        self.counties.iter().map(|county| &*county.name)
    }
}

/// A resolved state-detail fetch, tagged with the ticket it was issued for.
#[derive(Debug)]
pub struct DetailResponse {
    pub ticket: DetailTicket,
    pub result: Result<Value, SummaryFetchError>,
}

/// What `Session::apply_detail` did with a response.
#[derive(Debug)]
pub enum DetailOutcome {
    Applied,
    /// The selection moved on before the response arrived; it was discarded.
    Stale,
    /// The fetch failed for the current selection; the view shows no detail.
    Failed(SummaryFetchError),
}

/// One dashboard session: navigation state plus the data feeding each view.
///
/// The national summary is fetched eagerly on the first national view and
/// kept; a failed fetch is retried on the next national view. State detail is
/// fetched lazily per selection and only applied while its ticket is current.
pub struct Session<B, T> {
    geometry: GeometryIndex<B>,
    api: Arc<T>,
    nav: DrillDown,
    projection: AlbersUsa,
    summary: Option<Arc<[SummaryRecord]>>,
    detail: Option<StateDetail>,
}

impl<B: BoundarySource, T: TelemetryApi> Session<B, T> {
    /// `projection` places the national labels and is handed to SVG export.
    pub fn new(geometry: GeometryIndex<B>, api: T, projection: AlbersUsa) -> Self {
        Self {
            geometry,
            api: Arc::new(api),
            nav: DrillDown::new(),
            projection,
            summary: None,
            detail: None,
        }
    }

    pub fn projection(&self) -> &AlbersUsa { &self.projection }

    pub fn current_view(&self) -> View { self.nav.current_view() }

    pub fn selected(&self) -> Option<StateId> { self.nav.selected() }

    pub fn detail(&self) -> Option<&StateDetail> { self.detail.as_ref() }

    pub fn select_state(&mut self, state: StateId) -> DetailTicket {
        self.detail = None;
        let ticket = self.nav.select_state(state);
        info!(%state, "drill down");
        ticket
    }

    pub fn select_state_by_name(&mut self, name: &str) -> Result<DetailTicket, UnsupportedRegion> {
        let state = StateId::from_name(name).inspect_err(|err| warn!(%err, "drill-down refused"))?;
        Ok(self.select_state(state))
    }

    pub fn back(&mut self) -> bool {
        let moved = self.nav.back();
        if moved {
            self.detail = None;
            info!("back to national view");
        }
        moved
    }

    /// Boundaries, joined summaries and labels for the national map.
    pub async fn national_view(&mut self) -> Result<NationalView, GeometrySourceError> {
        let regions = self.geometry.load_national_boundaries().await?;

        let (summaries, summary_available) = if let Some(summary) = self.summary.clone() {
            (summary, true)
        } else {
            match self.api.us_summary().await {
                Ok(records) => {
                    let records: Arc<[SummaryRecord]> = records.into();
                    info!(count = records.len(), "loaded US summary");
                    self.summary = Some(records.clone());
                    (records, true)
                }
                Err(err) => {
                    warn!(%err, "US summary unavailable; tooltips fall back to names");
                    (Arc::from(Vec::new()), false)
                }
            }
        };

        let labels = place_labels(&regions, &self.projection);
        Ok(NationalView { regions, summaries, labels, summary_available })
    }

    /// Counties and viewport for the selected state, `None` in the national view.
    pub async fn county_view(&mut self) -> Result<Option<CountyView>, GeometrySourceError> {
        let View::County(state) = self.nav.current_view() else {
            return Ok(None);
        };

        let counties = self.geometry.load_county_boundaries_for(state).await?;
        Ok(Some(CountyView {
            state,
            counties,
            center: state.center(),
            detail: self.detail.clone().filter(|detail| detail.state == state),
        }))
    }

    /// Apply a detail response if its ticket is still current.
    pub fn apply_detail(&mut self, response: DetailResponse) -> DetailOutcome {
        let DetailResponse { ticket, result } = response;
        if !self.nav.is_current(&ticket) {
            debug!(state = %ticket.state, "discarding stale state detail");
            return DetailOutcome::Stale;
        }

        match result {
            Ok(payload) => {
                self.detail = Some(StateDetail { state: ticket.state, payload });
                DetailOutcome::Applied
            }
            Err(err) => {
                warn!(state = %ticket.state, %err, "state detail unavailable");
                self.detail = None;
                DetailOutcome::Failed(err)
            }
        }
    }
}

impl<B, T> Session<B, T>
where
    B: BoundarySource,
    T: TelemetryApi + Send + Sync + 'static,
{
    /// Fetch the detail for `ticket` without borrowing the session, so
    /// navigation can continue while the request is in flight.
    pub fn detail_request(&self, ticket: DetailTicket) -> impl Future<Output = DetailResponse> + Send + 'static + use<B, T> {
        let api = Arc::clone(&self.api);
        async move {
            let result = api.state_detail(ticket.state).await;
            DetailResponse { ticket, result }
        }
    }

    /// Fetch and apply in one step.
    pub async fn load_detail(&mut self, ticket: DetailTicket) -> DetailOutcome {
        let response = self.detail_request(ticket).await;
        self.apply_detail(response)
    }
}
