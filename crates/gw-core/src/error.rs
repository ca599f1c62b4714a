//! Error types for the Goodwill analytics workspace.

use thiserror::Error;

/// Workspace-wide error type.
///
/// The first three variants form the analysis error taxonomy: fatal
/// configuration problems, panels too small for the requested statistic,
/// and degenerate (singular) design matrices. The rest cover ambient
/// I/O and serialization failures at the CLI boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration: bad year range, malformed dataset, bad lag.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Too few observations for the requested statistic.
    #[error("Insufficient data: {0}")]
    DataInsufficiency(String),

    /// Design matrix is singular or near-singular.
    #[error("Singular fit: {0}")]
    SingularFit(String),

    /// Numerical computation failure.
    #[error("Computation error: {0}")]
    Computation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
