//! Goodwill CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gw_core::ALPHA;
use gw_inference::{
    filtered_panel, pearson_matrix, run_analysis, AnalysisReport, AnalysisRequest, DataSource,
    Section,
};
use gw_panel::SyntheticConfig;
use gw_viz::{corr_heatmap_artifact, trends_artifact};

#[derive(Parser)]
#[command(name = "goodwill")]
#[command(about = "Goodwill - U.S.-Canada favorability and prosperity analytics")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pass (regression, Granger causality, correlation)
    Analyze {
        #[command(flatten)]
        panel: PanelArgs,

        /// Largest Granger lag to test
        #[arg(long, default_value = "2")]
        maxlag: usize,

        /// Print the human-readable report instead of JSON
        #[arg(long)]
        text: bool,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Visualization artifacts (plot-friendly JSON)
    Viz {
        #[command(subcommand)]
        command: VizCommands,
    },
}

#[derive(Subcommand)]
enum VizCommands {
    /// Per-indicator line series over the filtered span
    Trends {
        #[command(flatten)]
        panel: PanelArgs,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Correlation heatmap over the four indicators
    Corr {
        #[command(flatten)]
        panel: PanelArgs,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PanelArgs {
    /// Dataset source
    #[arg(long, value_enum, default_value_t = SourceArg::Literal)]
    source: SourceArg,

    /// First year of the analysis range. Defaults to the dataset's first year.
    #[arg(long)]
    start_year: Option<i32>,

    /// Last year of the analysis range. Defaults to the dataset's last year.
    #[arg(long)]
    end_year: Option<i32>,

    /// Seed for the synthetic source; omit for a fresh draw per run
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    /// Fixed hand-curated 2010-2024 table
    Literal,
    /// Seeded synthetic 2005-2024 panel
    Synthetic,
}

impl PanelArgs {
    fn to_request(&self, maxlag: usize) -> AnalysisRequest {
        let source = match self.source {
            SourceArg::Literal => DataSource::Literal,
            SourceArg::Synthetic => {
                DataSource::Synthetic(SyntheticConfig { seed: self.seed, ..Default::default() })
            }
        };
        let (span_start, span_end) = source.span();
        AnalysisRequest {
            start_year: self.start_year.unwrap_or(span_start),
            end_year: self.end_year.unwrap_or(span_end),
            source,
            maxlag,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Analyze { panel, maxlag, text, output } => {
            cmd_analyze(&panel, maxlag, text, output.as_ref())
        }
        Commands::Viz { command } => match command {
            VizCommands::Trends { panel, output } => cmd_viz_trends(&panel, output.as_ref()),
            VizCommands::Corr { panel, output } => cmd_viz_corr(&panel, output.as_ref()),
        },
    }
}

fn cmd_analyze(
    panel: &PanelArgs,
    maxlag: usize,
    text: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let request = panel.to_request(maxlag);
    let report = run_analysis(&request)?;

    if text {
        print!("{}", render_text(&report));
        return Ok(());
    }
    write_json(output, serde_json::to_value(&report)?)
}

fn cmd_viz_trends(panel: &PanelArgs, output: Option<&PathBuf>) -> Result<()> {
    let request = panel.to_request(1);
    let filtered = filtered_panel(&request)?;
    let artifact = trends_artifact(&filtered)?;
    write_json(output, serde_json::to_value(&artifact)?)
}

fn cmd_viz_corr(panel: &PanelArgs, output: Option<&PathBuf>) -> Result<()> {
    let request = panel.to_request(1);
    let filtered = filtered_panel(&request)?;
    let matrix = pearson_matrix(&filtered)?;
    let artifact = corr_heatmap_artifact(&matrix)?;
    write_json(output, serde_json::to_value(&artifact)?)
}

/// Render the report the way the dashboard's text panes do: the OLS
/// summary block, then one line per Granger lag.
fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Goodwill analysis: {} panel, {}-{} ({} observations)\n\n",
        report.source, report.start_year, report.end_year, report.n_obs
    ));

    match &report.regression {
        Section::Ok { result } => out.push_str(&result.summary_text()),
        Section::Failed { error } => {
            out.push_str(&format!("Regression unavailable: {error}\n"));
        }
    }
    out.push('\n');

    out.push_str("Granger causality (favorability -> trade volume)\n");
    match &report.granger {
        Section::Ok { result } => {
            for lag in &result.lags {
                let verdict = if lag.significant {
                    format!("significant at alpha = {ALPHA}")
                } else {
                    "not significant".to_string()
                };
                out.push_str(&format!(
                    "Lag {}: chi2 = {:.4}, p-value = {:.4} ({verdict})\n",
                    lag.lag, lag.chi2, lag.p_value
                ));
            }
        }
        Section::Failed { error } => {
            out.push_str(&format!("Granger test unavailable: {error}\n"));
        }
    }

    out
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
