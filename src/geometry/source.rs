use std::{future::Future, path::PathBuf};

use tracing::debug;

#[cfg(feature = "http")]
use crate::config::Config;
use crate::{error::GeometrySourceError, types::RegionLevel};

/// Somewhere raw boundary payloads (GeoJSON or TopoJSON bytes) come from.
pub trait BoundarySource {
    fn fetch(&self, level: RegionLevel) -> impl Future<Output = Result<Vec<u8>, GeometrySourceError>> + Send;
}

/// Where one level's boundary file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryLocation {
    File(PathBuf),
    #[cfg(feature = "http")]
    Url(String),
}

/// Standard source: each level is read from a local file or fetched over HTTP.
#[derive(Debug, Clone)]
pub struct BoundaryFetcher {
    states: BoundaryLocation,
    counties: BoundaryLocation,
    #[cfg(feature = "http")]
    client: reqwest::Client,
}

impl BoundaryFetcher {
    pub fn new(states: BoundaryLocation, counties: BoundaryLocation) -> Self {
        Self {
            states,
            counties,
            #[cfg(feature = "http")]
            client: reqwest::Client::new(),
        }
    }

    /// Fetch both levels from the URLs in `config`.
    #[cfg(feature = "http")]
    pub fn from_config(config: &Config) -> Result<Self, GeometrySourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            states: BoundaryLocation::Url(config.states_url.clone()),
            counties: BoundaryLocation::Url(config.counties_url.clone()),
            client,
        })
    }

    /// Replace one level's location, e.g. to read a local file instead of the default URL.
    pub fn with_location(mut self, level: RegionLevel, location: BoundaryLocation) -> Self {
        match level {
            RegionLevel::State => self.states = location,
            RegionLevel::County => self.counties = location,
        }
        self
    }

    pub fn location(&self, level: RegionLevel) -> &BoundaryLocation {
        match level {
            RegionLevel::State => &self.states,
            RegionLevel::County => &self.counties,
        }
    }
}

impl BoundarySource for BoundaryFetcher {
    async fn fetch(&self, level: RegionLevel) -> Result<Vec<u8>, GeometrySourceError> {
        match self.location(level) {
            BoundaryLocation::File(path) => {
                debug!(level = level.to_str(), path = %path.display(), "reading boundaries");
                tokio::fs::read(path).await
                    .map_err(|source| GeometrySourceError::Io { path: path.clone(), source })
            }
            #[cfg(feature = "http")]
            BoundaryLocation::Url(url) => {
                debug!(level = level.to_str(), %url, "fetching boundaries");
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GeometrySourceError::Unreachable(format!("{url} returned status {status}")));
                }
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}
