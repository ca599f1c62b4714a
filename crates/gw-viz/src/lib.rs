//! # gw-viz
//!
//! Visualization data artifacts for the Goodwill dashboard.
//!
//! This crate is intentionally dependency-light and emits plot-friendly
//! JSON structures (parallel arrays instead of nested objects); chart
//! rendering itself is an external concern.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Correlation heatmap artifact.
pub mod corr;

/// Per-indicator line-series artifact.
pub mod trends;

pub use corr::{corr_heatmap_artifact, CorrHeatmapArtifact};
pub use trends::{trends_artifact, TrendSeries, TrendsArtifact};
