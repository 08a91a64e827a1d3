//! Error types for lst-compare
//!
//! Every failure here is non-retryable: the pipeline is pure and
//! deterministic, so an error means a malformed upstream export or a caller
//! contract violation, never a transient condition. Nothing in the library
//! recovers locally; the orchestrating binary decides whether to skip a
//! product or abort.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// lst-compare error types
#[derive(Error, Debug)]
pub enum Error {
    /// A required semantic column could not be located in a dataset.
    /// Names the dataset and the unmet role so the caller can report which
    /// upstream export is malformed.
    #[error("schema resolution failed: dataset '{dataset}' has no column matching role {role}")]
    SchemaResolution {
        /// Logical name of the dataset that was searched
        dataset: String,
        /// Role that could not be satisfied (e.g. "stddev/day")
        role: String,
    },

    /// The accuracy estimator was invoked with unusable summary statistics
    /// (non-finite mean, non-finite or negative standard deviation).
    #[error("insufficient statistics for accuracy estimation: {0}")]
    InsufficientStatistics(String),

    /// Estimator sizing parameters are unusable; rejected before any random
    /// draw occurs.
    #[error("invalid sample size: {0}")]
    InvalidSampleSize(String),

    /// Structurally invalid dataset (no columns, or no data row where
    /// exactly one is required).
    #[error("dataset '{dataset}' is structurally invalid: {reason}")]
    EmptyDataset {
        /// Logical name of the offending dataset
        dataset: String,
        /// What was missing
        reason: String,
    },

    /// Storage-layer failure (unreadable file, non-numeric column where a
    /// numeric one is required)
    #[error("storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
