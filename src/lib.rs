//! # lst-compare: LST Product Comparison & Gap-Filling Assessment
//!
//! Compares MODIS land-surface-temperature products (raw Terra/Aqua
//! observations, merged composites, and gap-filled outputs) across three
//! axes: pixel coverage, descriptive statistics, and a synthetic
//! cross-validation of the gap-filling step. Results feed console tables
//! and a LaTeX fragment for publication.
//!
//! The interesting parts live in two modules:
//!
//! - [`schema`] locates statistic columns in heterogeneously-named exports
//!   by keyword matching (last match wins; a load-bearing rule, see the
//!   module docs).
//! - [`accuracy`] estimates RMSE/MAE/Bias between a raw and a filled
//!   product from summary statistics alone, via seeded synthetic sampling.
//!
//! Everything else is deliberately thin: CSV ingestion into Arrow batches
//! ([`storage`]), fixed-column analyses ([`coverage`], [`timeseries`]),
//! table assembly ([`summary`]), and rendering ([`report`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use lst_compare::accuracy::{estimate, EstimatorConfig};
//! use lst_compare::schema::{extract_summary, Period};
//! use lst_compare::storage::DatasetStore;
//!
//! let store = DatasetStore::open("csvdata")?;
//! let raw = store.load("Stats_Raw_Terra_LST_Day_Example")?;
//! let filled = store.load("Stats_Final_LST_Day_Filled_Example")?;
//!
//! let metrics = estimate(
//!     extract_summary(&raw, Period::Day)?,
//!     extract_summary(&filled, Period::Day)?,
//!     &EstimatorConfig::default(),
//! )?;
//! println!("day RMSE: {:.2} °C", metrics.rmse);
//! # Ok::<(), lst_compare::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accuracy;
pub mod coverage;
pub mod error;
pub mod report;
pub mod schema;
pub mod stats;
pub mod storage;
pub mod summary;
pub mod timeseries;

pub use error::{Error, Result};
