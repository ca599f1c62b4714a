//! Granger causality test.
//!
//! Asks whether favorability has predictive power for trade volume
//! beyond what trade volume's own history explains. For each lag `k` in
//! `1..=maxlag`, a restricted model (trade on its own `k` lags) is
//! compared against an unrestricted model (plus favorability's `k` lags)
//! via the `ssr_chi2test` statistic
//! `chi² = n_used * (ssr_restricted - ssr_unrestricted) / ssr_unrestricted`,
//! which is chi-squared with `k` degrees of freedom under the null.

use gw_core::{Error, Result, ALPHA};
use serde::Serialize;

use crate::ols::lstsq;
use crate::util::finite_pairs;

/// Result of the causality test at one lag.
#[derive(Debug, Clone, Serialize)]
pub struct GrangerLagTest {
    /// Lag order `k`.
    pub lag: usize,
    /// Chi-squared test statistic.
    pub chi2: f64,
    /// Degrees of freedom (equal to the lag order).
    pub df: usize,
    /// p-value under the chi-squared distribution with `df` degrees of freedom.
    pub p_value: f64,
    /// Rows entering the lagged regressions (`n - lag`).
    pub n_used: usize,
    /// `p_value < ALPHA` (the fixed 0.05 convention).
    pub significant: bool,
}

/// Results for every lag `1..=maxlag`.
#[derive(Debug, Clone, Serialize)]
pub struct GrangerResult {
    /// Largest lag tested.
    pub maxlag: usize,
    /// Complete observations after dropping missing rows.
    pub n_obs: usize,
    /// Rows dropped for missing values.
    pub n_dropped: usize,
    /// One entry per lag, ascending.
    pub lags: Vec<GrangerLagTest>,
}

/// Chi-squared survival function via the regularized incomplete gamma:
/// `SF(x; k) = 1 - P(k/2, x/2)`.
fn chi_squared_sf(x: f64, k: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    1.0 - statrs::function::gamma::gamma_lr(k / 2.0, x / 2.0)
}

/// Run the Granger causality test of `favorability → trade_volume`.
///
/// Rows with a non-finite value in either series are dropped first (the
/// dropped count is reported). Each lagged regression needs positive
/// residual degrees of freedom, so the test requires
/// `n >= 3 * maxlag + 2` complete observations; fewer is a fatal
/// data-insufficiency error rather than a silently degraded result.
pub fn granger_causality(
    favorability: &[f64],
    trade_volume: &[f64],
    maxlag: usize,
) -> Result<GrangerResult> {
    if favorability.len() != trade_volume.len() {
        return Err(Error::Config(format!(
            "column length mismatch: {} favorability rows vs {} trade rows",
            favorability.len(),
            trade_volume.len()
        )));
    }
    if maxlag == 0 {
        return Err(Error::Config("maxlag must be at least 1".to_string()));
    }

    let (x, y, n_dropped) = finite_pairs(favorability, trade_volume);
    let n = y.len();
    let required = 3 * maxlag + 2;
    if n < required {
        return Err(Error::DataInsufficiency(format!(
            "Granger test with maxlag {maxlag} requires at least {required} complete \
             observations (unrestricted model has {} parameters on {} lagged rows), got {n}",
            2 * maxlag + 1,
            n.saturating_sub(maxlag),
        )));
    }

    let mut lags = Vec::with_capacity(maxlag);
    for k in 1..=maxlag {
        let n_used = n - k;

        let mut restricted = Vec::with_capacity(n_used);
        let mut unrestricted = Vec::with_capacity(n_used);
        let mut response = Vec::with_capacity(n_used);
        for t in k..n {
            let mut row_r = Vec::with_capacity(1 + k);
            row_r.push(1.0);
            for j in 1..=k {
                row_r.push(y[t - j]);
            }
            let mut row_u = row_r.clone();
            for j in 1..=k {
                row_u.push(x[t - j]);
            }
            restricted.push(row_r);
            unrestricted.push(row_u);
            response.push(y[t]);
        }

        let fit_r = lstsq(&restricted, &response)?;
        let fit_u = lstsq(&unrestricted, &response)?;

        if fit_u.ssr <= 1e-12 {
            return Err(Error::Computation(format!(
                "unrestricted model at lag {k} fits exactly; chi-squared statistic undefined"
            )));
        }

        // ssr_u <= ssr_r mathematically; clamp float noise at zero.
        let chi2 = (n_used as f64 * (fit_r.ssr - fit_u.ssr) / fit_u.ssr).max(0.0);
        let p_value = chi_squared_sf(chi2, k as f64);

        lags.push(GrangerLagTest {
            lag: k,
            chi2,
            df: k,
            p_value,
            n_used,
            significant: p_value < ALPHA,
        });
    }

    Ok(GrangerResult { maxlag, n_obs: n, n_dropped, lags })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn noisy_series(seed: u64, n: usize, sd: f64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Normal::new(0.0, sd).unwrap();
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn fifteen_records_maxlag_two_yields_two_lags() {
        let x = noisy_series(1, 15, 1.0);
        let y = noisy_series(2, 15, 1.0);
        let r = granger_causality(&x, &y, 2).unwrap();

        assert_eq!(r.lags.len(), 2);
        assert_eq!(r.n_obs, 15);
        for (i, lag) in r.lags.iter().enumerate() {
            assert_eq!(lag.lag, i + 1);
            assert_eq!(lag.df, i + 1);
            assert_eq!(lag.n_used, 15 - (i + 1));
            assert!((0.0..=1.0).contains(&lag.p_value), "p={}", lag.p_value);
            assert!(lag.chi2 >= 0.0 && lag.chi2.is_finite());
            assert_eq!(lag.significant, lag.p_value < 0.05);
        }
    }

    #[test]
    fn strong_lagged_signal_is_detected() {
        // y_t = x_{t-1} plus faint noise: favorability's lag carries almost
        // all of y's variance, so the test must flag lag 1.
        let n = 40;
        let x = noisy_series(7, n, 1.0);
        let noise = noisy_series(8, n, 1e-3);
        let mut y = vec![0.0; n];
        for t in 1..n {
            y[t] = x[t - 1] + noise[t];
        }

        let r = granger_causality(&x, &y, 2).unwrap();
        let lag1 = &r.lags[0];
        assert!(lag1.chi2 > 100.0, "chi2 = {}", lag1.chi2);
        assert!(lag1.p_value < 1e-6, "p = {}", lag1.p_value);
        assert!(lag1.significant);
    }

    #[test]
    fn insufficient_observations_is_fatal() {
        // maxlag 2 requires 8 complete observations.
        let x = noisy_series(3, 7, 1.0);
        let y = noisy_series(4, 7, 1.0);
        let e = granger_causality(&x, &y, 2).unwrap_err();
        assert!(matches!(e, Error::DataInsufficiency(_)), "got {e}");

        let x = noisy_series(3, 8, 1.0);
        let y = noisy_series(4, 8, 1.0);
        assert!(granger_causality(&x, &y, 2).is_ok());
    }

    #[test]
    fn missing_rows_reduce_the_usable_count() {
        let mut x = noisy_series(5, 12, 1.0);
        let mut y = noisy_series(6, 12, 1.0);
        x[3] = f64::NAN;
        y[9] = f64::NAN;

        let r = granger_causality(&x, &y, 1).unwrap();
        assert_eq!(r.n_obs, 10);
        assert_eq!(r.n_dropped, 2);
    }

    #[test]
    fn zero_maxlag_is_a_config_error() {
        let x = noisy_series(9, 15, 1.0);
        let y = noisy_series(10, 15, 1.0);
        let e = granger_causality(&x, &y, 0).unwrap_err();
        assert!(matches!(e, Error::Config(_)));
    }

    #[test]
    fn mismatched_columns_are_a_config_error() {
        let e = granger_causality(&[1.0, 2.0], &[1.0], 1).unwrap_err();
        assert!(matches!(e, Error::Config(_)));
    }

    #[test]
    fn chi_squared_sf_matches_known_quantiles() {
        // SF(3.841, 1) ≈ 0.05, SF(5.991, 2) ≈ 0.05.
        assert!((chi_squared_sf(3.841459, 1.0) - 0.05).abs() < 1e-4);
        assert!((chi_squared_sf(5.991465, 2.0) - 0.05).abs() < 1e-4);
        assert_eq!(chi_squared_sf(0.0, 1.0), 1.0);
        assert_eq!(chi_squared_sf(-1.0, 2.0), 1.0);
    }
}
