use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_goodwill"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn stdout_json(out: &Output) -> serde_json::Value {
    assert!(
        out.status.success(),
        "command should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout should be valid JSON")
}

#[test]
fn analyze_literal_default_contract() {
    let v = stdout_json(&run(&["analyze"]));

    assert_eq!(v["source"], "literal");
    assert_eq!(v["start_year"], 2010);
    assert_eq!(v["end_year"], 2024);
    assert_eq!(v["n_obs"], 15);

    assert_eq!(v["regression"]["status"], "ok");
    let slope = v["regression"]["result"]["slope"]["estimate"].as_f64().unwrap();
    assert!(slope > 0.0, "literal slope should be positive, got {slope}");
    let r2 = v["regression"]["result"]["r_squared"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&r2));

    assert_eq!(v["granger"]["status"], "ok");
    let lags = v["granger"]["result"]["lags"].as_array().unwrap();
    assert_eq!(lags.len(), 2);
    for lag in lags {
        let p = lag["p_value"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    assert_eq!(v["correlation"]["status"], "ok");
    let corr = v["correlation"]["result"]["values"].as_array().unwrap();
    assert_eq!(corr.len(), 4);
    assert_eq!(corr[0][0], 1.0);
}

#[test]
fn analyze_short_range_degrades_per_section() {
    // 4 observations: regression fine, Granger at maxlag 2 impossible.
    let v = stdout_json(&run(&["analyze", "--start-year", "2010", "--end-year", "2013"]));

    assert_eq!(v["regression"]["status"], "ok");
    assert_eq!(v["correlation"]["status"], "ok");
    assert_eq!(v["granger"]["status"], "failed");
    assert!(v["granger"]["error"]
        .as_str()
        .unwrap()
        .contains("Insufficient data"));
}

#[test]
fn analyze_invalid_range_fails_fast() {
    let out = run(&["analyze", "--start-year", "2020", "--end-year", "2010"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Configuration error"), "stderr={stderr}");

    let out = run(&["analyze", "--start-year", "1999"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("span"));
}

#[test]
fn analyze_synthetic_seed_is_reproducible() {
    let args = ["analyze", "--source", "synthetic", "--seed", "42"];
    let a = stdout_json(&run(&args));
    let b = stdout_json(&run(&args));

    assert_eq!(a["source"], "synthetic");
    assert_eq!(a["n_obs"], 20);
    assert_eq!(a["panel"], b["panel"], "seeded runs must produce identical panels");
}

#[test]
fn analyze_text_mode_prints_report_blocks() {
    let out = run(&["analyze", "--text"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("OLS Regression Results"));
    assert!(text.contains("favorable_opinion_pct"));
    assert!(text.contains("Granger causality"));
    assert!(text.contains("Lag 1:"));
    assert!(text.contains("Lag 2:"));
}

#[test]
fn analyze_output_flag_writes_file() {
    let path = std::env::temp_dir().join(format!("goodwill_report_{}.json", std::process::id()));
    let out = run(&["analyze", "--output", path.to_string_lossy().as_ref()]);
    assert!(out.status.success());

    let contents = std::fs::read_to_string(&path).expect("output file should exist");
    let v: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(v["n_obs"], 15);
    std::fs::remove_file(&path).ok();
}
