//! Pearson correlation over the panel indicators.

use gw_core::{Error, Result};
use gw_panel::Panel;
use serde::Serialize;

use crate::util::{centered_ssq, is_degenerate};

/// Pearson correlation matrix over the four indicator columns.
///
/// Symmetric with a unit diagonal by construction; values are clamped to
/// `[-1, 1]` against float noise.
#[derive(Debug, Clone, Serialize)]
pub struct CorrMatrix {
    /// Indicator names, in canonical panel order.
    pub names: Vec<String>,
    /// Row-major correlation values, `values[i][j] == values[j][i]`.
    pub values: Vec<Vec<f64>>,
    /// Complete rows used.
    pub n_obs: usize,
    /// Rows dropped for missing values.
    pub n_dropped: usize,
}

impl CorrMatrix {
    /// Correlation between indicators `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Compute the Pearson correlation matrix over the panel's indicators.
///
/// Rows with any non-finite field are dropped (complete-case analysis)
/// and counted. Requires at least 2 complete rows; an indicator with
/// (near-)zero variance makes its correlations undefined and is a
/// [`Error::SingularFit`].
pub fn pearson_matrix(panel: &Panel) -> Result<CorrMatrix> {
    let cols = panel.indicator_columns();
    let n_total = panel.len();

    let keep: Vec<usize> = (0..n_total)
        .filter(|&i| cols.iter().all(|(_, v)| v[i].is_finite()))
        .collect();
    let n = keep.len();
    let n_dropped = n_total - n;
    if n < 2 {
        return Err(Error::DataInsufficiency(format!(
            "correlation requires at least 2 complete rows, got {n}"
        )));
    }

    let data: Vec<Vec<f64>> = cols
        .iter()
        .map(|(_, v)| keep.iter().map(|&i| v[i]).collect())
        .collect();

    let nf = n as f64;
    let means: Vec<f64> = data.iter().map(|v| v.iter().sum::<f64>() / nf).collect();
    let ssqs: Vec<f64> = data
        .iter()
        .zip(&means)
        .map(|(v, &m)| centered_ssq(v, m))
        .collect();

    for ((name, _), (&ssq, &mean)) in cols.iter().zip(ssqs.iter().zip(&means)) {
        if is_degenerate(ssq, n, mean) {
            return Err(Error::SingularFit(format!(
                "indicator {name} has (near-)zero variance; correlation undefined"
            )));
        }
    }

    let k = cols.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
        for j in (i + 1)..k {
            let cov: f64 = data[i]
                .iter()
                .zip(&data[j])
                .map(|(&a, &b)| (a - means[i]) * (b - means[j]))
                .sum();
            let r = (cov / (ssqs[i] * ssqs[j]).sqrt()).clamp(-1.0, 1.0);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrMatrix {
        names: cols.iter().map(|(name, _)| name.to_string()).collect(),
        values,
        n_obs: n,
        n_dropped,
    })
}
