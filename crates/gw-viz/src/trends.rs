//! Per-indicator line-series artifact.

use gw_core::{Error, Result};
use gw_panel::Panel;
use serde::Serialize;

/// Display titles for the four indicators, in canonical order.
const TITLES: [&str; 4] = [
    "Favorable Opinion of Canada (%)",
    "U.S.-Canada Trade Volume (Billion USD)",
    "Canadian FDI in the U.S. (Billion USD)",
    "U.S. Visitors to Canada (Millions)",
];

/// One indicator's time series.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    /// Column name.
    pub name: String,
    /// Human-readable chart title.
    pub title: String,
    /// Years, ascending.
    pub years: Vec<i32>,
    /// Values, parallel to `years`.
    pub values: Vec<f64>,
}

/// Line-series artifact: one series per indicator over the panel span.
#[derive(Debug, Clone, Serialize)]
pub struct TrendsArtifact {
    /// Artifact schema identifier.
    pub schema_version: String,
    /// First year of the span.
    pub start_year: i32,
    /// Last year of the span.
    pub end_year: i32,
    /// One series per indicator, in canonical order.
    pub series: Vec<TrendSeries>,
}

/// Build the trends artifact from a (filtered) panel.
pub fn trends_artifact(panel: &Panel) -> Result<TrendsArtifact> {
    let (start_year, end_year) = match (panel.start_year(), panel.end_year()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Err(Error::DataInsufficiency("cannot chart an empty panel".to_string())),
    };

    let years = panel.years();
    let series = panel
        .indicator_columns()
        .into_iter()
        .enumerate()
        .map(|(i, (name, values))| TrendSeries {
            name: name.to_string(),
            title: TITLES[i].to_string(),
            years: years.clone(),
            values,
        })
        .collect();

    Ok(TrendsArtifact {
        schema_version: "goodwill_trends_v1".to_string(),
        start_year,
        end_year,
        series,
    })
}
