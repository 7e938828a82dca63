use std::path::PathBuf;

use thiserror::Error;

/// Boundary data could not be obtained or decoded. Recoverable by retrying.
#[derive(Debug, Error)]
pub enum GeometrySourceError {
    #[error("boundary source unreachable: {0}")]
    Unreachable(String),
    #[cfg(feature = "http")]
    #[error("boundary request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read boundary file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed boundary data: {0}")]
    Malformed(String),
}

impl GeometrySourceError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// A region name with no FIPS mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported region {name:?}: no FIPS mapping")]
pub struct UnsupportedRegion {
    pub name: String,
}

impl UnsupportedRegion {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

/// Telemetry (summary or state detail) could not be fetched. Never fatal.
#[derive(Debug, Error)]
pub enum SummaryFetchError {
    #[cfg(feature = "http")]
    #[error("telemetry request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telemetry endpoint {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode telemetry payload: {0}")]
    Decode(String),
    #[error("telemetry source has no {0} data")]
    Missing(&'static str),
}

/// Failure of an operation that takes a free-form region name.
#[derive(Debug, Error)]
pub enum DrillError {
    #[error(transparent)]
    Geometry(#[from] GeometrySourceError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedRegion),
}

/// A projection definition proj4rs could not build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to build projection {definition:?}: {reason}")]
pub struct ProjectionError {
    pub definition: String,
    pub reason: String,
}

impl ProjectionError {
    pub(crate) fn new(definition: &str, reason: impl std::fmt::Display) -> Self {
        Self { definition: definition.to_string(), reason: reason.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
