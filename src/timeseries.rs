//! Temporal variation statistics
//!
//! The point time-series exports carry epoch-millisecond timestamps in a
//! `system:time_start` column and temperatures in `LST_Value`, with unfilled
//! dates left empty. This module reports how much the merged product varies
//! over the study period and the mean day−night contrast.

use crate::storage::StatsTable;
use crate::{stats, Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Timestamp column written by the exporter (epoch milliseconds).
const TIME_COLUMN: &str = "system:time_start";

/// Temperature column written by the exporter.
const VALUE_COLUMN: &str = "LST_Value";

/// Variation summary over the day and night series, in °C.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationSummary {
    /// Standard deviation of the day series
    pub day_variation_c: f64,
    /// Standard deviation of the night series
    pub night_variation_c: f64,
    /// Mean day temperature minus mean night temperature
    pub day_night_difference_c: f64,
    /// First and last observed timestamps of the day series
    pub span: (DateTime<Utc>, DateTime<Utc>),
}

/// Observed timestamps of a series, nulls dropped, in row order.
///
/// # Errors
/// Returns error if the time column is missing, non-numeric, or holds a
/// value outside the representable datetime range.
#[allow(clippy::cast_possible_truncation)]
pub fn observation_times(table: &StatsTable) -> Result<Vec<DateTime<Utc>>> {
    table
        .f64_column(TIME_COLUMN)?
        .into_iter()
        .map(|ms| {
            DateTime::<Utc>::from_timestamp_millis(ms as i64).ok_or_else(|| {
                Error::Storage(format!(
                    "timestamp {ms} in '{}' is out of range",
                    table.name()
                ))
            })
        })
        .collect()
}

/// Compute the variation summary from the day and night series.
///
/// # Errors
/// Returns error if either series lacks its value/time columns or has no
/// observed values at all.
pub fn analyze_variation(day: &StatsTable, night: &StatsTable) -> Result<VariationSummary> {
    let day_values = non_empty_values(day)?;
    let night_values = non_empty_values(night)?;

    let times = observation_times(day)?;
    let (first, last) = match (times.first(), times.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(Error::EmptyDataset {
                dataset: day.name().to_string(),
                reason: "no observed timestamps".to_string(),
            })
        }
    };

    Ok(VariationSummary {
        day_variation_c: stats::stddev(&day_values)?,
        night_variation_c: stats::stddev(&night_values)?,
        day_night_difference_c: stats::mean(&day_values)? - stats::mean(&night_values)?,
        span: (first, last),
    })
}

fn non_empty_values(table: &StatsTable) -> Result<Vec<f64>> {
    let values = table.f64_column(VALUE_COLUMN)?;
    if values.is_empty() {
        return Err(Error::EmptyDataset {
            dataset: table.name().to_string(),
            reason: format!("column '{VALUE_COLUMN}' has no observed values"),
        });
    }
    Ok(values)
}
