//! Ordinary least squares.
//!
//! Two layers:
//! - [`lstsq`] (crate-private): general least squares over a row-wise
//!   design matrix via the normal equations, shared with the Granger
//!   tester.
//! - [`fit_simple_ols`]: the single-predictor regression of trade volume
//!   on favorability, returning the full inference summary (coefficient
//!   table, R², F test).

use gw_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::util::{centered_ssq, finite_pairs, is_degenerate};

/// Output of the shared least-squares core.
#[derive(Debug, Clone)]
pub(crate) struct LstsqFit {
    /// Fitted coefficients, one per design column.
    pub coefficients: Vec<f64>,
    /// Residual sum of squares at the solution.
    pub ssr: f64,
}

/// Solve `min ||y - X beta||²` for a row-wise design matrix.
///
/// Accumulates `XᵀX` and `Xᵀy` and solves the normal equations with an LU
/// decomposition. A singular system is a typed error, never garbage
/// coefficients.
pub(crate) fn lstsq(x: &[Vec<f64>], y: &[f64]) -> Result<LstsqFit> {
    let n = x.len();
    let p = x.first().map(|r| r.len()).unwrap_or(0);
    if n == 0 || p == 0 {
        return Err(Error::Computation("design matrix must be non-empty".to_string()));
    }
    if y.len() != n {
        return Err(Error::Computation(format!(
            "response has wrong length: expected {}, got {}",
            n,
            y.len()
        )));
    }
    if n < p {
        return Err(Error::DataInsufficiency(format!(
            "least squares needs at least as many rows as columns: {} rows, {} columns",
            n, p
        )));
    }
    for (i, row) in x.iter().enumerate() {
        if row.len() != p {
            return Err(Error::Computation(format!(
                "design matrix must be rectangular: row {} has {} columns, expected {}",
                i,
                row.len(),
                p
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(Error::Computation("design matrix must contain only finite values".to_string()));
        }
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(Error::Computation("response must contain only finite values".to_string()));
    }

    // Accumulate XtX and Xty.
    let mut xtx = vec![0.0; p * p];
    let mut xty = vec![0.0; p];
    for (row, &yi) in x.iter().zip(y) {
        for a in 0..p {
            let xa = row[a];
            xty[a] += xa * yi;
            for b in 0..p {
                xtx[a * p + b] += xa * row[b];
            }
        }
    }

    let a = DMatrix::from_row_slice(p, p, &xtx);
    let b = DVector::from_vec(xty);
    let sol = a
        .lu()
        .solve(&b)
        .ok_or_else(|| Error::SingularFit("normal equations are singular".to_string()))?;
    let coefficients: Vec<f64> = sol.iter().copied().collect();

    let mut ssr = 0.0;
    for (row, &yi) in x.iter().zip(y) {
        let fitted: f64 = row.iter().zip(&coefficients).map(|(&xj, &bj)| xj * bj).sum();
        let r = yi - fitted;
        ssr += r * r;
    }

    Ok(LstsqFit { coefficients, ssr })
}

/// One fitted coefficient with its inference statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    /// Term name (`const` or the regressor column name).
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_err: f64,
    /// t statistic (`estimate / std_err`).
    pub t_value: f64,
    /// Two-sided p-value under Student-t with `df_resid` degrees of freedom.
    pub p_value: f64,
}

/// Full summary of the simple regression of trade volume on favorability.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionSummary {
    /// Response column name.
    pub response: String,
    /// Intercept term.
    pub intercept: Coefficient,
    /// Slope term.
    pub slope: Coefficient,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// R² adjusted for the single regressor.
    pub adj_r_squared: f64,
    /// Overall F statistic (1, `df_resid`).
    pub f_statistic: f64,
    /// p-value of the F statistic.
    pub f_p_value: f64,
    /// Residual degrees of freedom (`n_obs - 2`).
    pub df_resid: usize,
    /// Complete observations used.
    pub n_obs: usize,
    /// Rows dropped for missing values.
    pub n_dropped: usize,
}

impl RegressionSummary {
    /// Render the fixed-width summary block shown in text reports.
    pub fn summary_text(&self) -> String {
        let rule = "=".repeat(70);
        let thin = "-".repeat(70);
        let mut out = String::new();
        out.push_str(&format!("{:^70}\n", "OLS Regression Results"));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "Dep. variable: {:<28} No. observations: {:>8}\n",
            self.response, self.n_obs
        ));
        out.push_str(&format!(
            "R-squared:     {:<28.4} Adj. R-squared:   {:>8.4}\n",
            self.r_squared, self.adj_r_squared
        ));
        out.push_str(&format!(
            "F-statistic:   {:<28.4} Prob (F):         {:>8.2e}\n",
            self.f_statistic, self.f_p_value
        ));
        out.push_str(&format!(
            "Df residuals:  {:<28} Dropped rows:     {:>8}\n",
            self.df_resid, self.n_dropped
        ));
        out.push_str(&thin);
        out.push('\n');
        out.push_str(&format!(
            "{:<24} {:>12} {:>10} {:>9} {:>9}\n",
            "", "coef", "std err", "t", "P>|t|"
        ));
        for c in [&self.intercept, &self.slope] {
            out.push_str(&format!(
                "{:<24} {:>12.4} {:>10.4} {:>9.3} {:>9.3}\n",
                c.name, c.estimate, c.std_err, c.t_value, c.p_value
            ));
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

fn coefficient(name: &str, estimate: f64, std_err: f64, df: f64) -> Result<Coefficient> {
    let (t_value, p_value) = if std_err > 0.0 {
        let t = estimate / std_err;
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| Error::Computation(format!("invalid t-distribution df {df}: {e}")))?;
        (t, 2.0 * (1.0 - dist.cdf(t.abs())))
    } else if estimate == 0.0 {
        (0.0, 1.0)
    } else {
        // Exact fit: zero residual variance.
        (f64::INFINITY.copysign(estimate), 0.0)
    };
    Ok(Coefficient { name: name.to_string(), estimate, std_err, t_value, p_value })
}

/// Fit `trade_volume = intercept + slope * favorability` by OLS.
///
/// Rows where either series is non-finite are dropped first and counted.
/// Requires at least 3 complete observations so the residual degrees of
/// freedom support standard errors; a (near-)constant regressor is a
/// [`Error::SingularFit`].
pub fn fit_simple_ols(favorability: &[f64], trade_volume: &[f64]) -> Result<RegressionSummary> {
    if favorability.len() != trade_volume.len() {
        return Err(Error::Config(format!(
            "column length mismatch: {} favorability rows vs {} trade rows",
            favorability.len(),
            trade_volume.len()
        )));
    }

    let (xs, ys, n_dropped) = finite_pairs(favorability, trade_volume);
    let n = xs.len();
    if n < 3 {
        return Err(Error::DataInsufficiency(format!(
            "regression requires at least 3 complete observations (2 fit the line but leave \
             no residual degrees of freedom), got {n}"
        )));
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let sxx = centered_ssq(&xs, mean_x);
    if is_degenerate(sxx, n, mean_x) {
        return Err(Error::SingularFit(format!(
            "regressor favorable_opinion_pct has (near-)zero variance over {n} observations"
        )));
    }

    let rows: Vec<Vec<f64>> = xs.iter().map(|&v| vec![1.0, v]).collect();
    let fit = lstsq(&rows, &ys)?;
    let (b0, b1) = (fit.coefficients[0], fit.coefficients[1]);

    let df_resid = n - 2;
    let df = df_resid as f64;
    let sigma2 = fit.ssr / df;
    let se_slope = (sigma2 / sxx).sqrt();
    let se_intercept = (sigma2 * (1.0 / nf + mean_x * mean_x / sxx)).sqrt();

    let mean_y = ys.iter().sum::<f64>() / nf;
    let sst = centered_ssq(&ys, mean_y);
    if is_degenerate(sst, n, mean_y) {
        return Err(Error::Computation(format!(
            "response trade_volume_bil_usd has zero variance over {n} observations; \
             R² and the F test are undefined"
        )));
    }

    let r_squared = 1.0 - fit.ssr / sst;
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (nf - 1.0) / df;

    let (f_statistic, f_p_value) = if fit.ssr > 0.0 {
        let f = (sst - fit.ssr) / (fit.ssr / df);
        let dist = FisherSnedecor::new(1.0, df)
            .map_err(|e| Error::Computation(format!("invalid F-distribution df (1, {df}): {e}")))?;
        (f, 1.0 - dist.cdf(f))
    } else {
        (f64::INFINITY, 0.0)
    };

    Ok(RegressionSummary {
        response: "trade_volume_bil_usd".to_string(),
        intercept: coefficient("const", b0, se_intercept, df)?,
        slope: coefficient("favorable_opinion_pct", b1, se_slope, df)?,
        r_squared,
        adj_r_squared,
        f_statistic,
        f_p_value,
        df_resid,
        n_obs: n,
        n_dropped,
    })
}
