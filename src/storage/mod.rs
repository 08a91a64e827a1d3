//! Dataset provider (CSV → Arrow)
//!
//! Each upstream export is one CSV file holding either a single row of
//! precomputed zonal statistics or a point time series. Files are parsed
//! into Arrow record batches once and treated as immutable afterwards:
//! every downstream consumer borrows the loaded table, nothing mutates it.
//!
//! Column naming in the exports is not under our control (it varies with
//! the band name and reducer that produced each file), so the loader keeps
//! whatever headers it finds; semantic interpretation happens later in
//! [`crate::schema`].

use crate::{Error, Result};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One loaded tabular dataset: a logical name plus its columnar data.
///
/// The name is carried alongside the batch so that schema-resolution
/// failures can report which upstream export is malformed.
#[derive(Debug, Clone)]
pub struct StatsTable {
    name: String,
    batch: RecordBatch,
}

impl StatsTable {
    /// Wrap an existing record batch under a logical name.
    ///
    /// Useful for tests and for callers that assemble batches themselves.
    #[must_use]
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Load a table from a CSV file.
    ///
    /// Every column whose non-empty cells all parse as `f64` becomes a
    /// nullable `Float64` column (empty cells become nulls); anything else
    /// is kept as text. A header row is required.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid CSV, or has
    /// rows wider than the header.
    pub fn load_csv<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self> {
        let name = name.into();
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if headers.is_empty() {
            return Err(Error::EmptyDataset {
                dataset: name,
                reason: "CSV header row is empty".to_string(),
            });
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (idx, column) in cells.iter_mut().enumerate() {
                column.push(record.get(idx).unwrap_or("").trim().to_string());
            }
        }

        let mut fields = Vec::with_capacity(headers.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(headers.len());
        for (header, column) in headers.iter().zip(&cells) {
            let (field, array) = build_column(header, column);
            fields.push(field);
            arrays.push(array);
        }

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema, arrays)?;
        Ok(Self { name, batch })
    }

    /// Logical dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying columnar data.
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Column names in file order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Number of data rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Read a single numeric cell by column name.
    ///
    /// # Errors
    /// Returns error if the column does not exist, is not numeric, or the
    /// cell is null / out of range.
    pub fn f64_value(&self, column: &str, row: usize) -> Result<f64> {
        let schema = self.batch.schema_ref();
        let index = schema
            .fields()
            .iter()
            .position(|f| f.name() == column)
            .ok_or_else(|| Error::Storage(format!("column not found in '{}': {column}", self.name)))?;

        if row >= self.batch.num_rows() {
            return Err(Error::EmptyDataset {
                dataset: self.name.clone(),
                reason: format!("row {row} requested but table has {} rows", self.batch.num_rows()),
            });
        }

        let array = self
            .batch
            .column(index)
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| {
                Error::Storage(format!("column '{column}' in '{}' is not numeric", self.name))
            })?;

        if array.is_null(row) {
            return Err(Error::Storage(format!(
                "column '{column}' in '{}' is null at row {row}",
                self.name
            )));
        }
        Ok(array.value(row))
    }

    /// All non-null values of a numeric column, in row order.
    ///
    /// Nulls are dropped, matching how the exports mark unobserved dates.
    ///
    /// # Errors
    /// Returns error if the column does not exist or is not numeric.
    pub fn f64_column(&self, column: &str) -> Result<Vec<f64>> {
        let schema = self.batch.schema_ref();
        let index = schema
            .fields()
            .iter()
            .position(|f| f.name() == column)
            .ok_or_else(|| Error::Storage(format!("column not found in '{}': {column}", self.name)))?;

        let array = self
            .batch
            .column(index)
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| {
                Error::Storage(format!("column '{column}' in '{}' is not numeric", self.name))
            })?;

        Ok(array.iter().flatten().collect())
    }
}

/// Build one Arrow column from raw string cells, sniffing the type.
fn build_column(header: &str, cells: &[String]) -> (Field, ArrayRef) {
    let mut parsed: Vec<Option<f64>> = Vec::with_capacity(cells.len());
    let mut numeric = true;
    let mut saw_value = false;

    for cell in cells {
        if cell.is_empty() {
            parsed.push(None);
        } else if let Ok(v) = cell.parse::<f64>() {
            parsed.push(Some(v));
            saw_value = true;
        } else {
            numeric = false;
            break;
        }
    }

    if numeric && saw_value {
        (
            Field::new(header, DataType::Float64, true),
            Arc::new(Float64Array::from(parsed)) as ArrayRef,
        )
    } else {
        let strings: Vec<Option<&str>> = cells
            .iter()
            .map(|c| if c.is_empty() { None } else { Some(c.as_str()) })
            .collect();
        (
            Field::new(header, DataType::Utf8, true),
            Arc::new(StringArray::from(strings)) as ArrayRef,
        )
    }
}

/// Directory-backed provider of named datasets.
///
/// Scans once at open time; tables are loaded lazily on request so that a
/// malformed file only fails the analyses that actually need it.
#[derive(Debug)]
pub struct DatasetStore {
    paths: BTreeMap<String, PathBuf>,
}

impl DatasetStore {
    /// Index all `*.csv` files directly under `dir` by file stem.
    ///
    /// # Errors
    /// Returns error if the directory cannot be read.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = BTreeMap::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                paths.insert(stem.to_string(), path.clone());
            }
        }
        Ok(Self { paths })
    }

    /// Logical names of all indexed datasets, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    /// Names containing every one of the given substrings.
    ///
    /// Mirrors how the upstream exporter families are distinguished
    /// (`Pixel_Coverage` files, `LST` + `Example` files, ...).
    #[must_use]
    pub fn names_containing(&self, parts: &[&str]) -> Vec<&str> {
        self.paths
            .keys()
            .filter(|name| parts.iter().all(|p| name.contains(p)))
            .map(String::as_str)
            .collect()
    }

    /// Load one dataset by logical name.
    ///
    /// # Errors
    /// Returns error if the name is unknown or the file fails to parse.
    pub fn load(&self, name: &str) -> Result<StatsTable> {
        let path = self
            .paths
            .get(name)
            .ok_or_else(|| Error::Storage(format!("no dataset named '{name}'")))?;
        StatsTable::load_csv(name, path)
    }
}

/// Derive the human-facing source label from an export file name.
///
/// `Stats_Raw_Terra_LST_Day_Example` → `Raw_Terra_LST_Day`.
#[must_use]
pub fn source_label(name: &str) -> String {
    name.trim_start_matches("Stats_")
        .trim_end_matches("_Example")
        .trim_end_matches("_Pixel_Coverage")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv_sniffs_numeric_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "stats.csv",
            "LST_Day_1km_mean,label\n27.35,hanoi\n",
        );

        let table = StatsTable::load_csv("stats", path).unwrap();
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.column_names(), vec!["LST_Day_1km_mean", "label"]);
        assert!((table.f64_value("LST_Day_1km_mean", 0).unwrap() - 27.35).abs() < f64::EPSILON);
        // Text column must not downcast to numeric
        assert!(table.f64_value("label", 0).is_err());
    }

    #[test]
    fn test_load_csv_empty_cells_become_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "series.csv",
            "system:time_start,LST_Value\n1577836800000,21.5\n1577923200000,\n1578009600000,22.9\n",
        );

        let table = StatsTable::load_csv("series", path).unwrap();
        assert_eq!(table.num_rows(), 3);
        // Null row dropped from the column view
        let values = table.f64_column("LST_Value").unwrap();
        assert_eq!(values, vec![21.5, 22.9]);
        // But reading the null cell directly is an error
        assert!(table.f64_value("LST_Value", 1).is_err());
    }

    #[test]
    fn test_store_indexes_and_filters_names() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "Stats_Merged_LST_Day_Example.csv", "a\n1\n");
        write_csv(dir.path(), "Stats_Merged_Pixel_Coverage.csv", "a\n1\n");
        write_csv(dir.path(), "notes.txt", "not a csv");

        let store = DatasetStore::open(dir.path()).unwrap();
        assert_eq!(
            store.names(),
            vec!["Stats_Merged_LST_Day_Example", "Stats_Merged_Pixel_Coverage"]
        );
        assert_eq!(
            store.names_containing(&["LST", "Example"]),
            vec!["Stats_Merged_LST_Day_Example"]
        );
        assert!(store.load("missing").is_err());
    }

    #[test]
    fn test_source_label_strips_exporter_affixes() {
        assert_eq!(
            source_label("Stats_Raw_Terra_LST_Day_Example"),
            "Raw_Terra_LST_Day"
        );
        assert_eq!(source_label("Stats_Merged_Pixel_Coverage"), "Merged");
        assert_eq!(source_label("TimeSeries_Merged_LST_Day_Hanoi"), "TimeSeries_Merged_LST_Day_Hanoi");
    }

    #[test]
    fn test_ragged_row_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "a,b\n1,2,3\n");
        // csv crate surfaces the length mismatch itself
        assert!(StatsTable::load_csv("bad", path).is_err());
    }
}
