//! Command-line entry point
//!
//! Thin orchestration over the library: discover the exports, run the four
//! analyses in the order the report expects, print the tables, and emit the
//! LaTeX fragment. Decisions about skipping versus aborting live here; the
//! library never recovers on its own.

use anyhow::{Context, Result};
use lst_compare::accuracy::{estimate, AccuracyMetrics, EstimatorConfig};
use lst_compare::schema::{extract_summary, Period};
use lst_compare::storage::{DatasetStore, StatsTable};
use lst_compare::{coverage, report, summary, timeseries};
use tracing_subscriber::EnvFilter;

/// Export pairs assessed for gap-filling accuracy, per period.
const ACCURACY_PAIRS: [(Period, &str, &str); 2] = [
    (
        Period::Day,
        "Stats_Raw_Terra_LST_Day_Example",
        "Stats_Final_LST_Day_Filled_Example",
    ),
    (
        Period::Night,
        "Stats_Raw_Terra_LST_Night_Example",
        "Stats_Final_LST_Night_Filled_Example",
    ),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "csvdata".to_string());
    let store = DatasetStore::open(&data_dir)
        .with_context(|| format!("cannot open data directory '{data_dir}'"))?;

    let coverage_rows = coverage::analyze_coverage(&load_all(
        &store,
        &store.names_containing(&["Pixel_Coverage"]),
    )?)
    .context("pixel coverage analysis failed")?;
    println!("Pixel coverage comparison:");
    println!("{}", report::coverage_table(&coverage_rows));

    let product_rows =
        summary::summarize_products(&load_all(&store, &store.names_containing(&["LST", "Example"]))?);
    println!("LST product statistics:");
    println!("{}", report::product_table(&product_rows));

    let config = EstimatorConfig::default();
    let mut assessed: Vec<AccuracyMetrics> = Vec::with_capacity(ACCURACY_PAIRS.len());
    for (period, raw_name, filled_name) in ACCURACY_PAIRS {
        let raw = store.load(raw_name)?;
        let filled = store.load(filled_name)?;
        let metrics = estimate(
            extract_summary(&raw, period)?,
            extract_summary(&filled, period)?,
            &config,
        )
        .with_context(|| format!("accuracy assessment failed for period '{period}'"))?;
        assessed.push(metrics);
    }
    let (day_metrics, night_metrics) = (&assessed[0], &assessed[1]);
    println!("Gap-filling accuracy assessment:");
    println!("{}", report::accuracy_table(day_metrics, night_metrics));

    let day_series = store.load("TimeSeries_Merged_LST_Day_Hanoi")?;
    let night_series = store.load("TimeSeries_Merged_LST_Night_Hanoi")?;
    let variation = timeseries::analyze_variation(&day_series, &night_series)
        .context("time-series variation analysis failed")?;
    println!("Time-series variation:");
    println!("{}", report::variation_lines(&variation));

    println!("LaTeX fragment for the accuracy table:");
    println!("{}", report::latex_accuracy_table(day_metrics, night_metrics));

    Ok(())
}

fn load_all(store: &DatasetStore, names: &[&str]) -> Result<Vec<StatsTable>> {
    names
        .iter()
        .map(|name| {
            store
                .load(name)
                .with_context(|| format!("failed to load dataset '{name}'"))
        })
        .collect()
}
