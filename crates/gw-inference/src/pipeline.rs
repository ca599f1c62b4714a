//! The end-to-end analysis pipeline.
//!
//! One explicit function — [`run_analysis`] — takes a data source, a
//! year range, and a lag order, and returns a result bundle. Every call
//! recomputes from the filtered panel; there is no module-level state
//! and no cache, so concurrent sessions cannot observe each other's
//! results.

use gw_core::{Error, Result};
use gw_panel::{
    generate_synthetic_panel, literal_panel, Panel, SyntheticConfig, LITERAL_END_YEAR,
    LITERAL_START_YEAR,
};
use serde::Serialize;

use crate::corr::{pearson_matrix, CorrMatrix};
use crate::granger::{granger_causality, GrangerResult};
use crate::ols::{fit_simple_ols, RegressionSummary};

/// Where the panel comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// The fixed hand-curated 2010–2024 table.
    Literal,
    /// The seeded synthetic generator.
    Synthetic(SyntheticConfig),
}

impl DataSource {
    /// The year span this source covers, before filtering.
    pub fn span(&self) -> (i32, i32) {
        match self {
            DataSource::Literal => (LITERAL_START_YEAR, LITERAL_END_YEAR),
            DataSource::Synthetic(config) => (config.start_year, config.end_year),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DataSource::Literal => "literal",
            DataSource::Synthetic(_) => "synthetic",
        }
    }

    fn build_panel(&self) -> Result<Panel> {
        match self {
            DataSource::Literal => Ok(literal_panel()),
            DataSource::Synthetic(config) => generate_synthetic_panel(config),
        }
    }
}

/// One full analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Panel source.
    pub source: DataSource,
    /// First year of the filter range (inclusive).
    pub start_year: i32,
    /// Last year of the filter range (inclusive).
    pub end_year: i32,
    /// Largest Granger lag to test.
    pub maxlag: usize,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            source: DataSource::Literal,
            start_year: LITERAL_START_YEAR,
            end_year: LITERAL_END_YEAR,
            maxlag: 2,
        }
    }
}

/// One report section: the computation's result, or why it failed.
///
/// Section failures are independent — a Granger failure never blocks the
/// regression output, and vice versa.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    /// The section computed successfully.
    Ok {
        /// The section payload.
        result: T,
    },
    /// The section failed; the rest of the report is unaffected.
    Failed {
        /// Human-readable failure message.
        error: String,
    },
}

impl<T> Section<T> {
    fn from_result(name: &str, r: Result<T>) -> Self {
        match r {
            Ok(result) => Section::Ok { result },
            Err(e) => {
                tracing::debug!(section = name, error = %e, "analysis section failed");
                Section::Failed { error: e.to_string() }
            }
        }
    }

    /// The payload, if the section succeeded.
    pub fn ok(&self) -> Option<&T> {
        match self {
            Section::Ok { result } => Some(result),
            Section::Failed { .. } => None,
        }
    }

    /// The failure message, if the section failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Ok { .. } => None,
            Section::Failed { error } => Some(error),
        }
    }
}

/// Result bundle of one analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Workspace version that produced the report.
    pub tool_version: String,
    /// Source label (`literal` or `synthetic`).
    pub source: String,
    /// First year of the filtered span.
    pub start_year: i32,
    /// Last year of the filtered span.
    pub end_year: i32,
    /// Records in the filtered panel.
    pub n_obs: usize,
    /// The filtered panel the sections were computed from.
    pub panel: Panel,
    /// OLS regression of trade volume on favorability.
    pub regression: Section<RegressionSummary>,
    /// Granger causality of favorability → trade volume.
    pub granger: Section<GrangerResult>,
    /// Pearson correlation over the four indicators.
    pub correlation: Section<CorrMatrix>,
}

/// Build and filter the panel for a request, validating the year range.
///
/// Shared by [`run_analysis`] and by callers that only need the filtered
/// panel (e.g. viz artifacts).
pub fn filtered_panel(request: &AnalysisRequest) -> Result<Panel> {
    if request.start_year > request.end_year {
        return Err(Error::Config(format!(
            "start_year {} exceeds end_year {}",
            request.start_year, request.end_year
        )));
    }

    let panel = request.source.build_panel()?;
    let (span_start, span_end) = match (panel.start_year(), panel.end_year()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Err(Error::Config("dataset is empty".to_string())),
    };
    if request.start_year < span_start || request.end_year > span_end {
        return Err(Error::Config(format!(
            "requested range {}..{} lies outside the dataset span {}..{}",
            request.start_year, request.end_year, span_start, span_end
        )));
    }

    Ok(panel.filter_range(request.start_year, request.end_year))
}

/// Run one full analysis pass.
///
/// Configuration problems (inverted or out-of-span year range, bad lag,
/// malformed dataset) are fatal and abort the pass. Statistical failures
/// (too few observations, singular fits) are captured per section.
pub fn run_analysis(request: &AnalysisRequest) -> Result<AnalysisReport> {
    if request.maxlag == 0 {
        return Err(Error::Config("maxlag must be at least 1".to_string()));
    }

    let filtered = filtered_panel(request)?;
    tracing::debug!(
        source = request.source.label(),
        n_obs = filtered.len(),
        "running analysis pass"
    );

    let favorability = filtered.favorability();
    let trade_volume = filtered.trade_volume();

    let regression =
        Section::from_result("regression", fit_simple_ols(&favorability, &trade_volume));
    let granger = Section::from_result(
        "granger",
        granger_causality(&favorability, &trade_volume, request.maxlag),
    );
    let correlation = Section::from_result("correlation", pearson_matrix(&filtered));

    Ok(AnalysisReport {
        tool_version: gw_core::VERSION.to_string(),
        source: request.source.label().to_string(),
        start_year: request.start_year,
        end_year: request.end_year,
        n_obs: filtered.len(),
        panel: filtered,
        regression,
        granger,
        correlation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_full_span_computes_every_section() {
        let report = run_analysis(&AnalysisRequest::default()).unwrap();
        assert_eq!(report.source, "literal");
        assert_eq!(report.n_obs, 15);

        let reg = report.regression.ok().expect("regression should succeed");
        // The literal dataset is curated with a positive association.
        assert!(reg.slope.estimate > 0.0, "slope = {}", reg.slope.estimate);
        assert!(reg.r_squared > 0.0);

        let granger = report.granger.ok().expect("granger should succeed");
        assert_eq!(granger.lags.len(), 2);
        for lag in &granger.lags {
            assert!((0.0..=1.0).contains(&lag.p_value));
        }

        let corr = report.correlation.ok().expect("correlation should succeed");
        // Favorability–trade correlation is positive in the literal table.
        assert!(corr.get(0, 1) > 0.0);
    }

    #[test]
    fn sections_fail_independently() {
        // 4 observations: enough for regression (>= 3), not for Granger at
        // maxlag 2 (needs 8).
        let request = AnalysisRequest { start_year: 2010, end_year: 2013, ..Default::default() };
        let report = run_analysis(&request).unwrap();

        assert!(report.regression.ok().is_some());
        assert!(report.correlation.ok().is_some());
        let err = report.granger.error().expect("granger should fail on 4 rows");
        assert!(err.contains("Insufficient data"), "err = {err}");
    }

    #[test]
    fn inverted_range_is_fatal() {
        let request = AnalysisRequest { start_year: 2020, end_year: 2010, ..Default::default() };
        let e = run_analysis(&request).unwrap_err();
        assert!(matches!(e, Error::Config(_)));
    }

    #[test]
    fn out_of_span_range_is_fatal() {
        let request = AnalysisRequest { start_year: 2000, end_year: 2020, ..Default::default() };
        let e = run_analysis(&request).unwrap_err();
        match e {
            Error::Config(msg) => assert!(msg.contains("span")),
            other => panic!("expected Config, got {other}"),
        }

        let request = AnalysisRequest { start_year: 2010, end_year: 2030, ..Default::default() };
        assert!(run_analysis(&request).is_err());
    }

    #[test]
    fn zero_maxlag_is_fatal() {
        let request = AnalysisRequest { maxlag: 0, ..Default::default() };
        assert!(matches!(run_analysis(&request), Err(Error::Config(_))));
    }

    #[test]
    fn synthetic_source_respects_seed() {
        let source = DataSource::Synthetic(SyntheticConfig {
            seed: Some(42),
            ..Default::default()
        });
        let request = AnalysisRequest {
            source: source.clone(),
            start_year: 2005,
            end_year: 2024,
            maxlag: 2,
        };
        let a = run_analysis(&request).unwrap();
        let b = run_analysis(&request).unwrap();

        assert_eq!(a.n_obs, 20);
        let fa = a.panel.favorability();
        let fb = b.panel.favorability();
        assert_eq!(fa, fb, "seeded synthetic passes must be reproducible");
        assert_eq!(source.span(), (2005, 2024));
    }

    #[test]
    fn report_serializes_with_tagged_sections() {
        let request = AnalysisRequest { start_year: 2010, end_year: 2013, ..Default::default() };
        let report = run_analysis(&request).unwrap();
        let v = serde_json::to_value(&report).unwrap();

        assert_eq!(v["regression"]["status"], "ok");
        assert_eq!(v["granger"]["status"], "failed");
        assert!(v["granger"]["error"].as_str().unwrap().contains("Insufficient"));
        assert_eq!(v["n_obs"], 4);
        assert!(v["panel"]["records"].as_array().is_some());
    }
}
