//! Semantic column resolution
//!
//! The zonal-statistics exports name their columns after whatever band and
//! reducer produced them (`LST_Day_1km_mean`, `filtered_LST_Night_1km_stdDev`,
//! `LST_mean`, ...), so fixed column names cannot be assumed. This module
//! maps a semantic role (a statistic kind plus a day/night qualifier) onto
//! an actual column by keyword matching over lower-cased names.
//!
//! Resolution is pure: it depends only on the column names and the role,
//! never mutates the table, and is deterministic. When several columns
//! satisfy a role the **last** one in file order wins; the exports list the
//! most specific band last, and published tables were produced under this
//! rule, so changing it to first-match would silently change results. Ties
//! are observable at `debug` level.

use crate::storage::StatsTable;
use crate::{Error, Result};
use std::fmt;
use tracing::debug;

/// Statistic kind half of a semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Arithmetic mean
    Mean,
    /// Minimum
    Min,
    /// Maximum
    Max,
    /// Standard deviation
    StdDev,
}

impl StatKind {
    /// Keywords accepted for this statistic in a column name.
    ///
    /// Both lexical forms of standard deviation (`stdDev`, `std`) appear in
    /// the wild, so both are accepted.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Mean => &["mean"],
            Self::Min => &["min"],
            Self::Max => &["max"],
            Self::StdDev => &["stddev", "std"],
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::StdDev => "stddev",
        };
        write!(f, "{label}")
    }
}

/// Acquisition-period half of a semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Daytime overpass
    Day,
    /// Nighttime overpass
    Night,
    /// Single-band product with no day/night split
    Unspecified,
}

impl Period {
    /// Infer the period from a source label (`Raw_Terra_LST_Day` → Day).
    #[must_use]
    pub fn of_label(label: &str) -> Self {
        if label.contains("Day") {
            Self::Day
        } else if label.contains("Night") {
            Self::Night
        } else {
            Self::Unspecified
        }
    }

    /// Whether a lower-cased column name belongs to this period.
    ///
    /// Day and Night accept their own keyword; Unspecified accepts generic
    /// `lst` columns that carry neither qualifier.
    fn matches(self, lower: &str) -> bool {
        match self {
            Self::Day => lower.contains("day") || lower.contains("lst_day"),
            Self::Night => lower.contains("night") || lower.contains("lst_night"),
            Self::Unspecified => {
                lower.contains("lst") && !lower.contains("day") && !lower.contains("night")
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::Unspecified => "unspecified",
        };
        write!(f, "{label}")
    }
}

/// A resolution key: which statistic, for which period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticRole {
    /// Statistic kind to look for
    pub kind: StatKind,
    /// Period qualifier the column must carry
    pub period: Period,
}

impl SemanticRole {
    /// Build a role.
    #[must_use]
    pub const fn new(kind: StatKind, period: Period) -> Self {
        Self { kind, period }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.period)
    }
}

/// Outcome of resolving a [`SemanticRole`] against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMatch {
    /// Exactly one winning column (last match in file order)
    Found(String),
    /// No column satisfied both the statistic and the period test
    NotFound,
}

impl ColumnMatch {
    /// The winning column name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Found(name) => Some(name),
            Self::NotFound => None,
        }
    }
}

/// Summary statistics extracted from a single-row export.
///
/// Constructed only as a whole: either both fields resolved, or the
/// extraction failed. No partially-populated value exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Mean temperature, °C
    pub mean: f64,
    /// Standard deviation, °C
    pub stddev: f64,
}

/// Per-product descriptive statistics for the comparison table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductStatistics {
    /// Mean temperature, °C
    pub mean: f64,
    /// Minimum temperature, °C
    pub min: f64,
    /// Maximum temperature, °C
    pub max: f64,
    /// Standard deviation, °C
    pub stddev: f64,
}

/// Locate the column satisfying `role`, if any.
///
/// Both the statistic-keyword test and the period test must pass (logical
/// AND). Later matches overwrite earlier ones. Ambiguity is never an error;
/// only a structurally invalid table (no columns) is.
///
/// # Errors
/// Returns [`Error::EmptyDataset`] if the table has no columns.
pub fn resolve(table: &StatsTable, role: SemanticRole) -> Result<ColumnMatch> {
    let columns = table.column_names();
    if columns.is_empty() {
        return Err(Error::EmptyDataset {
            dataset: table.name().to_string(),
            reason: "no columns".to_string(),
        });
    }

    let mut winner: Option<&str> = None;
    for &column in &columns {
        let lower = column.to_lowercase();
        let kind_hit = role.kind.keywords().iter().any(|kw| lower.contains(kw));
        if kind_hit && role.period.matches(&lower) {
            if let Some(prev) = winner {
                debug!(dataset = table.name(), %role, superseded = prev, chosen = column,
                       "multiple columns match role; keeping the later one");
            }
            winner = Some(column);
        }
    }

    match winner {
        Some(name) => {
            debug!(dataset = table.name(), %role, column = name, "resolved column");
            Ok(ColumnMatch::Found(name.to_string()))
        }
        None => Ok(ColumnMatch::NotFound),
    }
}

/// Resolve a role and read its value from the table's single data row.
fn resolve_scalar(table: &StatsTable, role: SemanticRole) -> Result<f64> {
    match resolve(table, role)? {
        ColumnMatch::Found(column) => table.f64_value(&column, 0),
        ColumnMatch::NotFound => Err(Error::SchemaResolution {
            dataset: table.name().to_string(),
            role: role.to_string(),
        }),
    }
}

/// Extract (mean, stddev) for one period from a single-row export.
///
/// # Errors
/// Returns [`Error::SchemaResolution`] naming the first unmet role if either
/// the mean or the stddev column is missing; never a partial result.
pub fn extract_summary(table: &StatsTable, period: Period) -> Result<SummaryStatistics> {
    let mean = resolve_scalar(table, SemanticRole::new(StatKind::Mean, period))?;
    let stddev = resolve_scalar(table, SemanticRole::new(StatKind::StdDev, period))?;
    Ok(SummaryStatistics { mean, stddev })
}

/// Extract all four descriptive statistics for the comparison table.
///
/// # Errors
/// Returns [`Error::SchemaResolution`] naming the first unmet role if any of
/// mean/min/max/stddev cannot be resolved.
pub fn extract_product_statistics(table: &StatsTable, period: Period) -> Result<ProductStatistics> {
    Ok(ProductStatistics {
        mean: resolve_scalar(table, SemanticRole::new(StatKind::Mean, period))?,
        min: resolve_scalar(table, SemanticRole::new(StatKind::Min, period))?,
        max: resolve_scalar(table, SemanticRole::new(StatKind::Max, period))?,
        stddev: resolve_scalar(table, SemanticRole::new(StatKind::StdDev, period))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Float64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    fn table_with_columns(columns: &[(&str, f64)]) -> StatsTable {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Float64, true))
            .collect();
        let arrays = columns
            .iter()
            .map(|(_, v)| Arc::new(Float64Array::from(vec![*v])) as arrow::array::ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap();
        StatsTable::new("test_table", batch)
    }

    #[test]
    fn test_resolve_day_and_night_means() {
        let table = table_with_columns(&[("LST_Day_1km_mean", 27.0), ("LST_Night_1km_mean", 18.0)]);

        let day = resolve(&table, SemanticRole::new(StatKind::Mean, Period::Day)).unwrap();
        assert_eq!(day.name(), Some("LST_Day_1km_mean"));

        let night = resolve(&table, SemanticRole::new(StatKind::Mean, Period::Night)).unwrap();
        assert_eq!(night.name(), Some("LST_Night_1km_mean"));
    }

    #[test]
    fn test_resolve_unspecified_rejects_qualified_columns() {
        let table = table_with_columns(&[("LST_Day_1km_mean", 27.0), ("LST_mean", 22.0)]);

        let m = resolve(&table, SemanticRole::new(StatKind::Mean, Period::Unspecified)).unwrap();
        assert_eq!(m.name(), Some("LST_mean"));
    }

    #[test]
    fn test_resolve_keeps_last_match() {
        // Two columns satisfy (mean, day); the later one must win.
        let table = table_with_columns(&[
            ("LST_Day_1km_mean", 27.0),
            ("filtered_LST_Day_1km_mean", 26.5),
        ]);

        let m = resolve(&table, SemanticRole::new(StatKind::Mean, Period::Day)).unwrap();
        assert_eq!(m.name(), Some("filtered_LST_Day_1km_mean"));
    }

    #[test]
    fn test_resolve_accepts_both_stddev_spellings() {
        let table = table_with_columns(&[("LST_Day_1km_stdDev", 2.0)]);
        let m = resolve(&table, SemanticRole::new(StatKind::StdDev, Period::Day)).unwrap();
        assert_eq!(m.name(), Some("LST_Day_1km_stdDev"));

        let table = table_with_columns(&[("LST_Day_std", 2.0)]);
        let m = resolve(&table, SemanticRole::new(StatKind::StdDev, Period::Day)).unwrap();
        assert_eq!(m.name(), Some("LST_Day_std"));
    }

    #[test]
    fn test_resolve_requires_both_tests() {
        // Statistic keyword present but wrong period
        let table = table_with_columns(&[("LST_Day_1km_mean", 27.0)]);
        let m = resolve(&table, SemanticRole::new(StatKind::Mean, Period::Night)).unwrap();
        assert_eq!(m, ColumnMatch::NotFound);

        // Period keyword present but no statistic keyword
        let table = table_with_columns(&[("LST_Day_1km", 27.0)]);
        let m = resolve(&table, SemanticRole::new(StatKind::Mean, Period::Day)).unwrap();
        assert_eq!(m, ColumnMatch::NotFound);
    }

    #[test]
    fn test_extract_summary_all_or_nothing() {
        let table = table_with_columns(&[("LST_Day_1km_mean", 27.0), ("LST_Day_1km_stdDev", 2.1)]);
        let stats = extract_summary(&table, Period::Day).unwrap();
        assert!((stats.mean - 27.0).abs() < f64::EPSILON);
        assert!((stats.stddev - 2.1).abs() < f64::EPSILON);

        // Mean present, stddev missing: the failure must name the stddev role
        let table = table_with_columns(&[("LST_Day_1km_mean", 27.0)]);
        let err = extract_summary(&table, Period::Day).unwrap_err();
        match err {
            crate::Error::SchemaResolution { dataset, role } => {
                assert_eq!(dataset, "test_table");
                assert_eq!(role, "stddev/day");
            }
            other => panic!("expected SchemaResolution, got {other:?}"),
        }
    }

    #[test]
    fn test_period_of_label() {
        assert_eq!(Period::of_label("Raw_Terra_LST_Day"), Period::Day);
        assert_eq!(Period::of_label("Merged_LST_Night"), Period::Night);
        assert_eq!(Period::of_label("Merged_LST"), Period::Unspecified);
    }

    #[test]
    fn test_product_statistics_requires_all_four() {
        let table = table_with_columns(&[
            ("LST_Day_1km_mean", 27.0),
            ("LST_Day_1km_min", 12.0),
            ("LST_Day_1km_max", 39.0),
            ("LST_Day_1km_stdDev", 2.1),
        ]);
        let stats = extract_product_statistics(&table, Period::Day).unwrap();
        assert!((stats.min - 12.0).abs() < f64::EPSILON);
        assert!((stats.max - 39.0).abs() < f64::EPSILON);

        let table = table_with_columns(&[
            ("LST_Day_1km_mean", 27.0),
            ("LST_Day_1km_max", 39.0),
            ("LST_Day_1km_stdDev", 2.1),
        ]);
        assert!(extract_product_statistics(&table, Period::Day).is_err());
    }
}
