//! Per-state telemetry: fetching summaries and joining them onto map regions.

mod client;
mod join;

#[cfg(feature = "http")]
pub use client::HttpTelemetry;
pub use client::{StaticTelemetry, TelemetryApi};
pub use join::{join, Joined, SummaryRecord};
