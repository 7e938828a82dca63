use std::future::Future;

#[cfg(feature = "http")]
use serde::de::DeserializeOwned;
use serde_json::Value;
#[cfg(feature = "http")]
use tracing::debug;

use super::join::SummaryRecord;
#[cfg(feature = "http")]
use crate::config::Config;
use crate::{error::SummaryFetchError, types::StateId};

/// The telemetry backend: national aggregates and per-state detail.
pub trait TelemetryApi {
    /// `GET /api/us-summary`
    fn us_summary(&self) -> impl Future<Output = Result<Vec<SummaryRecord>, SummaryFetchError>> + Send;

    /// `GET /api/state-detail?state={name}`; the payload is passed through untouched.
    fn state_detail(&self, state: StateId) -> impl Future<Output = Result<Value, SummaryFetchError>> + Send;
}

/// Summary records loaded ahead of time (e.g. from a file); has no state detail.
#[derive(Debug, Clone, Default)]
pub struct StaticTelemetry {
    summary: Vec<SummaryRecord>,
}

impl StaticTelemetry {
    pub fn new(summary: Vec<SummaryRecord>) -> Self {
        Self { summary }
    }

    /// Parse a `/api/us-summary` style JSON array.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SummaryFetchError> {
        serde_json::from_slice(bytes)
            .map(Self::new)
            .map_err(|e| SummaryFetchError::Decode(e.to_string()))
    }
}

impl TelemetryApi for StaticTelemetry {
    async fn us_summary(&self) -> Result<Vec<SummaryRecord>, SummaryFetchError> {
        Ok(self.summary.clone())
    }

    async fn state_detail(&self, _state: StateId) -> Result<Value, SummaryFetchError> {
        Err(SummaryFetchError::Missing("state detail"))
    }
}

/// HTTP client for the telemetry API.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpTelemetry {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpTelemetry {
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> Result<Self, SummaryFetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url: base_url.into() })
    }

    pub fn from_config(config: &Config) -> Result<Self, SummaryFetchError> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    async fn get_json<D: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<D, SummaryFetchError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        debug!(%url, ?query, "telemetry request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SummaryFetchError::Status { url, status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SummaryFetchError::Decode(e.to_string()))
    }
}

#[cfg(feature = "http")]
impl TelemetryApi for HttpTelemetry {
    async fn us_summary(&self) -> Result<Vec<SummaryRecord>, SummaryFetchError> {
        self.get_json("/api/us-summary", &[]).await
    }

    async fn state_detail(&self, state: StateId) -> Result<Value, SummaryFetchError> {
        self.get_json("/api/state-detail", &[("state", state.name())]).await
    }
}
