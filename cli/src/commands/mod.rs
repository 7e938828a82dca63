pub mod counties;
pub mod labels;
pub mod render;

use anyhow::{Context, Result};
use geodrill::{
    BoundaryFetcher, BoundaryLocation, Config, HttpTelemetry, RegionLevel, StateId, StaticTelemetry,
    SummaryFetchError, SummaryRecord, TelemetryApi,
};
use serde_json::Value;

use crate::cli::SourceArgs;

/// Boundary sources from the environment, with file flags taking precedence.
pub(crate) fn boundary_fetcher(config: &Config, sources: &SourceArgs) -> Result<BoundaryFetcher> {
    let mut fetcher = BoundaryFetcher::from_config(config)
        .context("[cli] Failed to build boundary fetcher")?;

    if let Some(path) = &sources.states {
        fetcher = fetcher.with_location(RegionLevel::State, BoundaryLocation::File(path.clone()));
    }
    if let Some(path) = &sources.counties {
        fetcher = fetcher.with_location(RegionLevel::County, BoundaryLocation::File(path.clone()));
    }
    Ok(fetcher)
}

/// Telemetry from the live API or from a local summary file.
pub(crate) enum Telemetry {
    Http(HttpTelemetry),
    File(StaticTelemetry),
}

impl TelemetryApi for Telemetry {
    async fn us_summary(&self) -> Result<Vec<SummaryRecord>, SummaryFetchError> {
        match self {
            Telemetry::Http(api) => api.us_summary().await,
            Telemetry::File(api) => api.us_summary().await,
        }
    }

    async fn state_detail(&self, state: StateId) -> Result<Value, SummaryFetchError> {
        match self {
            Telemetry::Http(api) => api.state_detail(state).await,
            Telemetry::File(api) => api.state_detail(state).await,
        }
    }
}
