//! SVG export of the rendered views.

mod geometry;
mod views;
mod writer;
