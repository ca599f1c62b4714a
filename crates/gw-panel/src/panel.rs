//! Panel and record types.

use gw_core::{Error, Result};
use serde::Serialize;

/// Indicator column names, in canonical order.
///
/// This order is shared by the correlation matrix and the viz artifacts.
pub const INDICATORS: [&str; 4] = [
    "favorable_opinion_pct",
    "trade_volume_bil_usd",
    "canadian_fdi_bil_usd",
    "us_tourism_mil_visitors",
];

/// One annual observation of the four bilateral indicators.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndicatorRecord {
    /// Calendar year.
    pub year: i32,
    /// Share of surveyed Americans with a favorable opinion of Canada (%).
    pub favorable_opinion_pct: f64,
    /// U.S.–Canada bilateral trade volume (billion USD).
    pub trade_volume_bil_usd: f64,
    /// Canadian foreign direct investment in the U.S. (billion USD).
    pub canadian_fdi_bil_usd: f64,
    /// U.S. tourist visits to Canada (million visitors).
    pub us_tourism_mil_visitors: f64,
}

/// An ordered annual panel over a contiguous year span.
///
/// Invariant (enforced by [`Panel::new`] and preserved by
/// [`Panel::filter_range`]): years strictly increase by exactly 1, so the
/// panel covers `[start_year, end_year]` with no duplicates or gaps.
///
/// Numeric fields may be non-finite when the panel comes from an external
/// source with missing values; the statistical components drop such rows
/// pairwise and report how many were dropped.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    records: Vec<IndicatorRecord>,
}

impl Panel {
    /// Build a panel from records, validating the contiguous-years invariant.
    pub fn new(records: Vec<IndicatorRecord>) -> Result<Self> {
        for pair in records.windows(2) {
            if pair[1].year != pair[0].year + 1 {
                return Err(Error::Config(format!(
                    "panel years must be contiguous and strictly increasing: {} followed by {}",
                    pair[0].year, pair[1].year
                )));
            }
        }
        Ok(Self { records })
    }

    /// Build a panel from parallel column vectors.
    ///
    /// All five columns must have the same length; a row-count mismatch is
    /// a fatal configuration error, never silently truncated.
    pub fn from_columns(
        years: Vec<i32>,
        favorability: Vec<f64>,
        trade_volume: Vec<f64>,
        fdi: Vec<f64>,
        tourism: Vec<f64>,
    ) -> Result<Self> {
        let n = years.len();
        for (name, len) in [
            ("favorable_opinion_pct", favorability.len()),
            ("trade_volume_bil_usd", trade_volume.len()),
            ("canadian_fdi_bil_usd", fdi.len()),
            ("us_tourism_mil_visitors", tourism.len()),
        ] {
            if len != n {
                return Err(Error::Config(format!(
                    "column length mismatch: {} has {} rows, year has {}",
                    name, len, n
                )));
            }
        }

        let records = years
            .into_iter()
            .enumerate()
            .map(|(i, year)| IndicatorRecord {
                year,
                favorable_opinion_pct: favorability[i],
                trade_volume_bil_usd: trade_volume[i],
                canadian_fdi_bil_usd: fdi[i],
                us_tourism_mil_visitors: tourism[i],
            })
            .collect();
        Self::new(records)
    }

    /// Number of annual records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the panel holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in year order.
    pub fn records(&self) -> &[IndicatorRecord] {
        &self.records
    }

    /// First year of the span, if any.
    pub fn start_year(&self) -> Option<i32> {
        self.records.first().map(|r| r.year)
    }

    /// Last year of the span, if any.
    pub fn end_year(&self) -> Option<i32> {
        self.records.last().map(|r| r.year)
    }

    /// Restrict to `start_year <= year <= end_year`, preserving order.
    ///
    /// Total: an interval that excludes every year yields an empty panel,
    /// and the downstream estimators own the resulting
    /// data-insufficiency errors. Range *validation* (bounds inside the
    /// dataset span, start before end) happens at the pipeline boundary.
    pub fn filter_range(&self, start_year: i32, end_year: i32) -> Panel {
        let records = self
            .records
            .iter()
            .filter(|r| r.year >= start_year && r.year <= end_year)
            .copied()
            .collect();
        // A contiguous subsequence of a contiguous span stays contiguous.
        Panel { records }
    }

    /// Year column.
    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Favorability column (%).
    pub fn favorability(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.favorable_opinion_pct).collect()
    }

    /// Trade volume column (billion USD).
    pub fn trade_volume(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.trade_volume_bil_usd).collect()
    }

    /// Canadian FDI column (billion USD).
    pub fn fdi(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.canadian_fdi_bil_usd).collect()
    }

    /// U.S. tourism column (million visitors).
    pub fn tourism(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.us_tourism_mil_visitors).collect()
    }

    /// The four indicator columns in [`INDICATORS`] order.
    pub fn indicator_columns(&self) -> Vec<(&'static str, Vec<f64>)> {
        vec![
            (INDICATORS[0], self.favorability()),
            (INDICATORS[1], self.trade_volume()),
            (INDICATORS[2], self.fdi()),
            (INDICATORS[3], self.tourism()),
        ]
    }
}
