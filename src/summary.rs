//! Per-product LST statistics comparison
//!
//! Builds the descriptive-statistics table across all single-day example
//! exports (raw Terra/Aqua, merged, gap-filled). The acquisition period is
//! inferred from the product label, then the schema resolver locates the
//! four statistic columns.

use crate::schema::{self, Period};
use crate::storage::{source_label, StatsTable};
use serde::Serialize;
use tracing::warn;

/// Descriptive statistics of one product, in °C.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    /// Product label (file name with exporter affixes stripped)
    pub source: String,
    /// Mean temperature
    pub mean_c: f64,
    /// Minimum temperature
    pub min_c: f64,
    /// Maximum temperature
    pub max_c: f64,
    /// Standard deviation
    pub stddev_c: f64,
}

/// Summarize every product table that resolves completely.
///
/// A table whose statistic columns cannot all be located is skipped with a
/// warning instead of aborting the whole comparison: one misnamed export
/// should not hide the rest of the table. This is the only place in the
/// pipeline where a resolution failure is tolerated.
#[must_use]
pub fn summarize_products(tables: &[StatsTable]) -> Vec<ProductSummary> {
    let mut rows = Vec::with_capacity(tables.len());
    for table in tables {
        let source = source_label(table.name());
        let period = Period::of_label(&source);
        match schema::extract_product_statistics(table, period) {
            Ok(stats) => rows.push(ProductSummary {
                source,
                mean_c: stats.mean,
                min_c: stats.min,
                max_c: stats.max,
                stddev_c: stats.stddev,
            }),
            Err(err) => {
                warn!(dataset = table.name(), %err, "skipping product with unresolvable statistics");
            }
        }
    }
    rows
}
