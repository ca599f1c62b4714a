//! Synthetic dataset generator, 2005–2024 by default.

use gw_core::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::panel::{IndicatorRecord, Panel};

/// Configuration for the synthetic panel generator.
///
/// Favorability is drawn i.i.d. from `Normal(favorability_mean,
/// favorability_sd)` and rounded to one decimal; the three economic
/// series are linearly interpolated between their range endpoints across
/// the year span, also rounded to one decimal.
///
/// With `seed: Some(s)` the generator is fully deterministic; with
/// `seed: None` it draws OS entropy, so successive panels differ. The
/// non-deterministic mode exists to show illustrative variation —
/// production use should substitute real observational data.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// First year of the generated span.
    pub start_year: i32,
    /// Last year of the generated span (inclusive).
    pub end_year: i32,
    /// Mean of the favorability draw (%).
    pub favorability_mean: f64,
    /// Standard deviation of the favorability draw.
    pub favorability_sd: f64,
    /// Trade volume endpoints (billion USD), first and last year.
    pub trade_range: (f64, f64),
    /// Canadian FDI endpoints (billion USD).
    pub fdi_range: (f64, f64),
    /// U.S. tourism endpoints (million visitors).
    pub tourism_range: (f64, f64),
    /// Random seed; `None` draws OS entropy.
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start_year: 2005,
            end_year: 2024,
            favorability_mean: 82.0,
            favorability_sd: 2.0,
            trade_range: (450.0, 762.0),
            fdi_range: (300.0, 700.0),
            tourism_range: (10.5, 14.6),
            seed: None,
        }
    }
}

/// Endpoint-inclusive linear interpolation over `n` points.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n as f64 - 1.0);
    (0..n).map(|i| start + step * i as f64).collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Generate a synthetic panel per `config`.
pub fn generate_synthetic_panel(config: &SyntheticConfig) -> Result<Panel> {
    if config.start_year > config.end_year {
        return Err(Error::Config(format!(
            "start_year {} must not exceed end_year {}",
            config.start_year, config.end_year
        )));
    }
    if !config.favorability_sd.is_finite() || config.favorability_sd <= 0.0 {
        return Err(Error::Config(format!(
            "favorability_sd must be finite and > 0, got {}",
            config.favorability_sd
        )));
    }
    if !config.favorability_mean.is_finite() {
        return Err(Error::Config("favorability_mean must be finite".to_string()));
    }
    for (name, (lo, hi)) in [
        ("trade_range", config.trade_range),
        ("fdi_range", config.fdi_range),
        ("tourism_range", config.tourism_range),
    ] {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(Error::Config(format!("{name} endpoints must be finite")));
        }
    }

    let n = (config.end_year - config.start_year + 1) as usize;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let favor_dist = Normal::new(config.favorability_mean, config.favorability_sd)
        .map_err(|e| Error::Config(format!("invalid favorability distribution: {e}")))?;

    let trade = linspace(config.trade_range.0, config.trade_range.1, n);
    let fdi = linspace(config.fdi_range.0, config.fdi_range.1, n);
    let tourism = linspace(config.tourism_range.0, config.tourism_range.1, n);

    let records = (0..n)
        .map(|i| IndicatorRecord {
            year: config.start_year + i as i32,
            favorable_opinion_pct: round1(favor_dist.sample(&mut rng)),
            trade_volume_bil_usd: round1(trade[i]),
            canadian_fdi_bil_usd: round1(fdi[i]),
            us_tourism_mil_visitors: round1(tourism[i]),
        })
        .collect();

    tracing::debug!(n_rows = n, seeded = config.seed.is_some(), "generated synthetic panel");
    Panel::new(records)
}
