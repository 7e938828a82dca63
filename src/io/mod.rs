//! Format-specific output.

pub(crate) mod svg;
