#![doc = "geodrill public API"]
mod config;
mod drilldown;
mod error;
mod geometry;
mod io;
mod label;
mod summary;
mod types;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use drilldown::{CountyView, DetailOutcome, DetailResponse, DetailTicket, DrillDown, NationalView, Session, StateDetail, View};

#[doc(inline)]
pub use error::{ConfigError, DrillError, GeometrySourceError, ProjectionError, SummaryFetchError, UnsupportedRegion};

#[doc(inline)]
pub use geometry::{counties_in, decode_regions, AlbersUsa, BoundaryFetcher, BoundaryLocation, BoundarySource, GeometryIndex};

#[doc(inline)]
pub use label::{label_offset, label_text, place_label, place_labels, Connector, LabelPlacement, TextAlign, LABEL_INSET};

#[doc(inline)]
pub use summary::{join, Joined, StaticTelemetry, SummaryRecord, TelemetryApi};

#[cfg(feature = "http")]
#[doc(inline)]
pub use summary::HttpTelemetry;

#[doc(inline)]
pub use types::{LabelOffset, Region, RegionLevel, StateCenter, StateId};
