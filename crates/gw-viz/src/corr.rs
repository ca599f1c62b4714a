//! Correlation heatmap artifact (numbers-first).

use gw_core::{Error, Result};
use gw_inference::CorrMatrix;
use serde::Serialize;

/// Heatmap-friendly correlation artifact.
///
/// Carries the matrix itself plus the two-decimal annotation strings a
/// renderer prints on each cell.
#[derive(Debug, Clone, Serialize)]
pub struct CorrHeatmapArtifact {
    /// Artifact schema identifier.
    pub schema_version: String,
    /// Indicator names, one per row/column.
    pub names: Vec<String>,
    /// Row-major correlation values.
    pub corr: Vec<Vec<f64>>,
    /// Two-decimal cell labels, parallel to `corr`.
    pub annotations: Vec<Vec<String>>,
    /// Complete rows the matrix was computed from.
    pub n_obs: usize,
}

/// Build the heatmap artifact from a computed correlation matrix.
pub fn corr_heatmap_artifact(matrix: &CorrMatrix) -> Result<CorrHeatmapArtifact> {
    let k = matrix.names.len();
    if matrix.values.len() != k || matrix.values.iter().any(|row| row.len() != k) {
        return Err(Error::Config(format!(
            "correlation matrix shape mismatch: {} names, {}x{} values",
            k,
            matrix.values.len(),
            matrix.values.first().map(|r| r.len()).unwrap_or(0)
        )));
    }

    let annotations = matrix
        .values
        .iter()
        .map(|row| row.iter().map(|v| format!("{v:.2}")).collect())
        .collect();

    Ok(CorrHeatmapArtifact {
        schema_version: "goodwill_corr_v1".to_string(),
        names: matrix.names.clone(),
        corr: matrix.values.clone(),
        annotations,
        n_obs: matrix.n_obs,
    })
}
