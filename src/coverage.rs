//! Pixel-coverage comparison
//!
//! Each `*_Pixel_Coverage` export carries a single row with a valid-pixel
//! count and the total pixel count of the region of interest. Unlike the
//! statistics exports these two columns have fixed names, so no heuristic
//! resolution is needed here.

use crate::storage::{source_label, StatsTable};
use crate::{Error, Result};
use serde::Serialize;

/// Column holding the number of cloud-free pixels.
const VALID_PIXELS: &str = "valid_pixels";

/// Column holding the total pixel count of the region of interest.
const TOTAL_PIXELS: &str = "total_pixels_in_roi";

/// Coverage of one data product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    /// Product label (file name with exporter affixes stripped)
    pub source: String,
    /// Cloud-free pixels
    pub valid_pixels: f64,
    /// Total pixels in the region of interest
    pub total_pixels: f64,
    /// Valid / total, in percent
    pub coverage_percent: f64,
}

/// Compute the coverage row for one export.
///
/// # Errors
/// Returns error if either count column is missing or the total is zero.
pub fn coverage_row(table: &StatsTable) -> Result<CoverageRow> {
    let valid_pixels = table.f64_value(VALID_PIXELS, 0)?;
    let total_pixels = table.f64_value(TOTAL_PIXELS, 0)?;
    if total_pixels <= 0.0 {
        return Err(Error::Storage(format!(
            "dataset '{}' reports a non-positive ROI pixel count: {total_pixels}",
            table.name()
        )));
    }

    Ok(CoverageRow {
        source: source_label(table.name()),
        valid_pixels,
        total_pixels,
        coverage_percent: valid_pixels / total_pixels * 100.0,
    })
}

/// Compute coverage rows for a set of exports, preserving input order.
///
/// # Errors
/// Returns the first failure; coverage exports are machine-written, so a
/// malformed one indicates a broken upstream run rather than a skippable
/// product.
pub fn analyze_coverage(tables: &[StatsTable]) -> Result<Vec<CoverageRow>> {
    tables.iter().map(coverage_row).collect()
}
