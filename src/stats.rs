//! Descriptive and error-metric primitives
//!
//! Plain slice kernels shared by the accuracy estimator and the
//! time-series analysis. Paired metrics require equal-length, non-empty
//! inputs; violations are caller bugs and surface as errors rather than
//! NaN sentinels.

use crate::{Error, Result};

/// Arithmetic mean.
///
/// # Errors
/// Returns error on an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::InsufficientStatistics(
            "mean of empty slice".to_string(),
        ));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
///
/// # Errors
/// Returns error on an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn stddev(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

fn check_paired(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return Err(Error::InsufficientStatistics(format!(
            "paired metric needs equal non-empty series, got {} and {}",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Root mean square error between two paired series.
///
/// # Errors
/// Returns error if the series are empty or of different lengths.
#[allow(clippy::cast_precision_loss)]
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_paired(actual, predicted)?;
    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    Ok(mse.sqrt())
}

/// Mean absolute error between two paired series.
///
/// # Errors
/// Returns error if the series are empty or of different lengths.
#[allow(clippy::cast_precision_loss)]
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_paired(actual, predicted)?;
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64)
}

/// Mean signed error (predicted minus actual).
///
/// Positive bias means the predicted series runs warm.
///
/// # Errors
/// Returns error if the series are empty or of different lengths.
#[allow(clippy::cast_precision_loss)]
pub fn bias(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_paired(actual, predicted)?;
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| p - a)
        .sum::<f64>()
        / actual.len() as f64)
}
