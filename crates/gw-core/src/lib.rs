//! # gw-core
//!
//! Shared error type and constants for the Goodwill analytics workspace.
//!
//! Every other crate in the workspace reports failures through
//! [`Error`] and the [`Result`] alias defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;

pub use error::{Error, Result};

/// Crate version (propagated into report metadata).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Significance level for the Granger causality convention.
///
/// A lag "shows evidence of causality" when its p-value is below this
/// threshold. Fixed by convention; not exposed as runtime configuration.
pub const ALPHA: f64 = 0.05;
