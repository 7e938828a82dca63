//! Boundary geometry: decoding, caching and projection.

mod geojson;
mod index;
mod proj;
mod source;
mod topojson;

pub use index::{counties_in, decode_regions, GeometryIndex};
pub use proj::AlbersUsa;
pub use source::{BoundaryFetcher, BoundaryLocation, BoundarySource};
