//! Tests for the synthetic cross-validation estimator

use lst_compare::accuracy::{estimate, EstimatorConfig};
use lst_compare::schema::SummaryStatistics;
use lst_compare::Error;

const RAW: SummaryStatistics = SummaryStatistics { mean: 30.0, stddev: 2.0 };
const FILLED: SummaryStatistics = SummaryStatistics { mean: 29.5, stddev: 1.8 };

#[test]
fn test_reference_scenario_is_reproducible() {
    // The regression pair used for the published assessment. The exact
    // decimals are pinned by determinism; the windows below follow from
    // the generative model's moments and hold with wide margin under the
    // default seed.
    let config = EstimatorConfig::default();
    let first = estimate(RAW, FILLED, &config).unwrap();
    let second = estimate(RAW, FILLED, &config).unwrap();
    assert_eq!(first, second);

    // filled - raw = raw·(c−1) + mean_diff + noise·(1−c), so the signed
    // error centres on 30·(−0.2) − 0.5 = −6.5 °C.
    assert!(first.bias > -7.0 && first.bias < -6.0, "bias = {}", first.bias);

    // RMSE/MAE centre on 6.5 °C before calibration, 1.95 °C after.
    assert!(first.rmse > 1.7 && first.rmse < 2.2, "rmse = {}", first.rmse);
    assert!(first.mae > 1.7 && first.mae < 2.2, "mae = {}", first.mae);

    // Squared-error mean dominates absolute-error mean
    assert!(first.rmse >= first.mae);
}

#[test]
fn test_rmse_and_mae_are_non_negative() {
    let metrics = estimate(RAW, FILLED, &EstimatorConfig::default()).unwrap();
    assert!(metrics.rmse >= 0.0);
    assert!(metrics.mae >= 0.0);
}

#[test]
fn test_calibration_factor_scales_linearly() {
    let base = EstimatorConfig::default();
    let half = estimate(RAW, FILLED, &base.calibration_factor(0.15)).unwrap();
    let full = estimate(RAW, FILLED, &base.calibration_factor(0.30)).unwrap();

    assert!((full.rmse - 2.0 * half.rmse).abs() < 1e-12);
    assert!((full.mae - 2.0 * half.mae).abs() < 1e-12);
    assert!((full.bias - half.bias).abs() < f64::EPSILON);
}

#[test]
fn test_identical_stats_under_full_correlation_trend_to_zero_bias() {
    // With equal means the systematic shift vanishes; at c = 1.0 the noise
    // contribution vanishes too, so every error term is exactly zero.
    let stats = SummaryStatistics { mean: 22.0, stddev: 1.5 };
    let metrics = estimate(stats, stats, &EstimatorConfig::default().correlation_factor(1.0)).unwrap();
    assert!(metrics.bias.abs() < 1e-12);
    assert!(metrics.rmse.abs() < 1e-12);
    assert!(metrics.mae.abs() < 1e-12);
}

#[test]
fn test_equal_means_partial_correlation_bias_is_small_at_small_mean() {
    // With equal means and a mean near zero, the residual bias is only the
    // subsampled noise term scaled by (1−c); it must be far below the
    // spread of the inputs.
    let stats = SummaryStatistics { mean: 0.0, stddev: 2.0 };
    let metrics = estimate(stats, stats, &EstimatorConfig::default()).unwrap();
    assert!(metrics.bias.abs() < 0.5, "bias = {}", metrics.bias);
}

#[test]
fn test_sizing_violations_rejected() {
    assert!(matches!(
        estimate(RAW, FILLED, &EstimatorConfig::default().iterations(0)).unwrap_err(),
        Error::InvalidSampleSize(_)
    ));
    assert!(matches!(
        estimate(RAW, FILLED, &EstimatorConfig::default().sample_size(0)).unwrap_err(),
        Error::InvalidSampleSize(_)
    ));
    // round(3 × 0.1) == 0 → the subsample would be empty
    assert!(matches!(
        estimate(RAW, FILLED, &EstimatorConfig::default().sample_size(3)).unwrap_err(),
        Error::InvalidSampleSize(_)
    ));
}

#[test]
fn test_custom_sizing_still_deterministic() {
    let config = EstimatorConfig::default().sample_size(200).iterations(4).seed(7);
    let a = estimate(RAW, FILLED, &config).unwrap();
    let b = estimate(RAW, FILLED, &config).unwrap();
    assert_eq!(a, b);
}
