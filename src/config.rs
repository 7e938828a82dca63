use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_STATES_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json";
pub const DEFAULT_COUNTIES_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/counties-10m.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the telemetry API serving `/api/us-summary` and `/api/state-detail`.
    pub api_url: String,
    pub states_url: String,
    pub counties_url: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            states_url: DEFAULT_STATES_URL.to_string(),
            counties_url: DEFAULT_COUNTIES_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// `GEODRILL_API_URL`, `GEODRILL_STATES_URL`, `GEODRILL_COUNTIES_URL`,
    /// `GEODRILL_HTTP_TIMEOUT_SECS`; unset or empty values keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_timeout = match var("GEODRILL_HTTP_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid { key: "GEODRILL_HTTP_TIMEOUT_SECS", value })?,
            None => defaults.http_timeout,
        };

        Ok(Self {
            api_url: var("GEODRILL_API_URL").unwrap_or(defaults.api_url),
            states_url: var("GEODRILL_STATES_URL").unwrap_or(defaults.states_url),
            counties_url: var("GEODRILL_COUNTIES_URL").unwrap_or(defaults.counties_url),
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_and_blank_values() {
        let config = Config::from_lookup(lookup(&[
            ("GEODRILL_API_URL", "https://telemetry.example"),
            ("GEODRILL_STATES_URL", "  "),
            ("GEODRILL_HTTP_TIMEOUT_SECS", "5"),
        ])).unwrap();

        assert_eq!(config.api_url, "https://telemetry.example");
        assert_eq!(config.states_url, DEFAULT_STATES_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_timeout() {
        for bad in ["soon", "0", "-3"] {
            let err = Config::from_lookup(lookup(&[("GEODRILL_HTTP_TIMEOUT_SECS", bad)])).unwrap_err();
            assert_eq!(err, ConfigError::Invalid { key: "GEODRILL_HTTP_TIMEOUT_SECS", value: bad.to_string() });
        }
    }
}
