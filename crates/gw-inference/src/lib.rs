//! # gw-inference
//!
//! Statistical components of the Goodwill analytics workspace:
//!
//! - ordinary least squares (single-predictor summary + shared
//!   least-squares core)
//! - Granger causality testing between favorability and trade volume
//! - Pearson correlation over the indicator columns
//! - the explicit analysis pipeline tying the above to a panel and a
//!   year range
//!
//! Each computation pass is a pure function of its inputs: no module
//! state, no caching across calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Pearson correlation matrix over the panel indicators.
pub mod corr;
/// Granger causality test (`ssr_chi2test` convention).
pub mod granger;
/// Ordinary least squares: shared core and simple-regression summary.
pub mod ols;
/// The end-to-end analysis pipeline and its report bundle.
pub mod pipeline;

mod util;

pub use corr::{pearson_matrix, CorrMatrix};
pub use granger::{granger_causality, GrangerLagTest, GrangerResult};
pub use ols::{fit_simple_ols, Coefficient, RegressionSummary};
pub use pipeline::{
    filtered_panel, run_analysis, AnalysisReport, AnalysisRequest, DataSource, Section,
};
