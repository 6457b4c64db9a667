#![cfg(feature = "dev")]
//! Tests for the variogram estimator.
//!
//! These tests verify the variogram utilities for:
//! - Empirical semivariance at requested lags
//! - Spherical model fitting and the effective range
//! - Block-size suggestion across covariates, sequential and parallel
//!
//! ## Test Organization
//!
//! 1. **Semivariance** - Pair selection, empty bins, metrics
//! 2. **Model Fit** - Recovery of known parameters, failure modes
//! 3. **Block Size** - Per-covariate ranges and their median
//! 4. **Configuration** - Builder validation

use approx::assert_relative_eq;

use spacv::prelude::*;

fn line(n: usize) -> Vec<Point<f64>> {
    (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
}

fn spherical(h: f64, range: f64, sill: f64) -> f64 {
    if h <= range {
        sill * (1.5 * h / range - 0.5 * (h / range).powi(3))
    } else {
        sill
    }
}

// ============================================================================
// Semivariance Tests
// ============================================================================

/// Test a linear trend along a line.
///
/// Values equal positions, so a pair at distance d contributes d^2 and the
/// semivariance at lag d is d^2 / 2.
#[test]
fn test_semivariance_linear_trend() {
    let points = line(5);
    let values: Vec<f64> = (0..5).map(|i| i as f64).collect();
    let sv = semivariance_at_lags(&points, &values, &[1.0, 2.0, 3.0, 4.0], 0.5, Euclidean).unwrap();

    assert_eq!(sv.len(), 4);
    assert_relative_eq!(sv[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(sv[1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(sv[2], 4.5, epsilon = 1e-12);
    assert_relative_eq!(sv[3], 8.0, epsilon = 1e-12);
}

/// Test that pairs with equal values still count.
///
/// Pairs (0, 1) with difference 0 and (1, 2) with difference 2 give
/// 4 / (2 * 2) = 1.
#[test]
fn test_semivariance_counts_zero_differences() {
    let points = line(3);
    let sv = semivariance_at_lags(&points, &[1.0, 1.0, 3.0], &[1.0], 0.1, Euclidean).unwrap();
    assert_relative_eq!(sv[0], 1.0, epsilon = 1e-12);
}

/// Test that an empty lag bin yields zero without failing.
#[test]
fn test_semivariance_empty_bin() {
    let points = line(4);
    let values = vec![0.0, 1.0, 0.0, 1.0];
    let sv = semivariance_at_lags(&points, &values, &[1.0, 100.0, 2.0], 0.25, Euclidean).unwrap();
    assert_eq!(sv.len(), 3);
    assert_eq!(sv[1], 0.0);
    assert!(sv.iter().all(|v| *v >= 0.0));
}

/// Test that overlapping bins share pairs.
#[test]
fn test_semivariance_wide_bandwidth() {
    let points = line(4);
    let values: Vec<f64> = (0..4).map(|i| i as f64).collect();
    let sv = semivariance_at_lags(&points, &values, &[1.0, 2.0], 1.0, Euclidean).unwrap();

    // Lag 1 takes distances 1 and 2: (3 * 1 + 2 * 4) / (2 * 5)
    assert_relative_eq!(sv[0], 1.1, epsilon = 1e-12);
    // Lag 2 takes distances 1, 2 and 3: (3 + 8 + 9) / (2 * 6)
    assert_relative_eq!(sv[1], 20.0 / 12.0, epsilon = 1e-12);
}

/// Test great-circle lags in metres.
#[test]
fn test_semivariance_haversine() {
    let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
    let one_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    let sv =
        semivariance_at_lags(&points, &[0.0, 2.0], &[one_degree, 1.0], 1.0, Haversine).unwrap();
    assert_relative_eq!(sv[0], 2.0, epsilon = 1e-12);
    assert_eq!(sv[1], 0.0);
}

/// Test input validation.
#[test]
fn test_semivariance_errors() {
    let points = line(3);
    assert_eq!(
        semivariance_at_lags(&points, &[1.0, 2.0], &[1.0], 0.5, Euclidean).unwrap_err(),
        SpacvError::MismatchedInputs {
            expected: 3,
            got: 2
        }
    );
    assert!(matches!(
        semivariance_at_lags(&points, &[1.0, 2.0, 3.0], &[], 0.5, Euclidean),
        Err(SpacvError::InvalidLags(_))
    ));
    assert!(matches!(
        semivariance_at_lags(&points, &[1.0, 2.0, 3.0], &[-1.0], 0.5, Euclidean),
        Err(SpacvError::InvalidLags(_))
    ));
    assert_eq!(
        semivariance_at_lags(&points, &[1.0, 2.0, 3.0], &[1.0], -0.5, Euclidean).unwrap_err(),
        SpacvError::InvalidBandwidth(-0.5)
    );
}

// ============================================================================
// Model Fit Tests
// ============================================================================

/// Test recovery of a noiseless spherical variogram.
#[test]
fn test_fit_recovers_spherical_range() {
    let lags: Vec<f64> = (1..=20).map(|h| h as f64).collect();
    let sv: Vec<f64> = lags.iter().map(|&h| spherical(h, 8.0, 3.0)).collect();

    let model = fit_spherical(&lags, &sv, 0.0).unwrap();
    assert_relative_eq!(model.range, 8.0, epsilon = 1e-3);
    assert_relative_eq!(model.sill, 3.0, epsilon = 1e-3);
    assert_relative_eq!(model.evaluate(4.0), spherical(4.0, 8.0, 3.0), epsilon = 1e-3);

    let range = fit_effective_range(&sv, &lags).unwrap();
    assert_relative_eq!(range, model.range, epsilon = 1e-12);
}

/// Test that the fitted parameters respect the bounds.
#[test]
fn test_fit_stays_within_bounds() {
    // Unbounded growth: the best spherical fit wants a range past the last lag
    let lags: Vec<f64> = (1..=6).map(|h| h as f64).collect();
    let sv: Vec<f64> = lags.iter().map(|h| h * h).collect();

    let model = fit_spherical(&lags, &sv, 0.0).unwrap();
    assert!(model.range > 0.0 && model.range <= 6.0);
    assert!(model.sill >= 0.0 && model.sill <= 36.0);
}

/// Test failure modes of the fit.
#[test]
fn test_fit_errors() {
    assert!(matches!(
        fit_effective_range(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]),
        Err(SpacvError::FitFailed { .. })
    ));
    assert_eq!(
        fit_effective_range(&[1.0], &[1.0]).unwrap_err(),
        SpacvError::TooFewInstances { got: 1, min: 2 }
    );
    assert_eq!(
        fit_effective_range(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err(),
        SpacvError::MismatchedInputs {
            expected: 3,
            got: 2
        }
    );
}

/// Test the estimator wrapper end to end.
#[test]
fn test_estimator_samples_and_fit() {
    let points = line(30);
    let values: Vec<f64> = (0..30).map(|i| ((i as f64) / 3.0).sin()).collect();
    let lags: Vec<f64> = (1..=8).map(|h| h as f64).collect();

    let estimator = Variogram::new().lags(lags.clone()).bandwidth(0.5).build().unwrap();
    let samples = estimator.samples(&points, &values).unwrap();
    let sv = estimator.semivariance_at_lags(&points, &values).unwrap();

    assert_eq!(samples.len(), lags.len());
    for ((lag, s), (want_lag, want_s)) in samples.iter().zip(lags.iter().zip(&sv)) {
        assert_eq!(lag, want_lag);
        assert_eq!(s, want_s);
    }

    let range = estimator.effective_range(&points, &values).unwrap();
    assert_relative_eq!(range, fit_effective_range(&sv, &lags).unwrap(), epsilon = 1e-12);
}

// ============================================================================
// Block Size Tests
// ============================================================================

fn covariates(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            vec![(x / 3.0).sin(), (i % 4) as f64, (x / 7.0).cos() * 2.0]
        })
        .collect()
}

/// Test one range per covariate and their median.
#[test]
fn test_suggest_block_size_median() {
    let points = line(40);
    let lags: Vec<f64> = (1..=10).map(|h| h as f64).collect();

    let suggestion =
        suggest_block_size(&points, &covariates(40), &lags, 0.5, Euclidean, 1).unwrap();
    assert_eq!(suggestion.ranges.len(), 3);
    assert!(suggestion.ranges.iter().all(|r| *r > 0.0 && *r <= 10.0));

    let mut sorted = suggestion.ranges.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(suggestion.block_size, sorted[1]);
}

/// Test that each range equals the single-covariate estimate.
#[test]
fn test_suggest_block_size_matches_single_fits() {
    let points = line(40);
    let lags: Vec<f64> = (1..=10).map(|h| h as f64).collect();
    let cov = covariates(40);
    let estimator = Variogram::new().lags(lags).bandwidth(0.5).build().unwrap();

    let suggestion = estimator.suggest_block_size(&points, &cov).unwrap();
    for (j, range) in suggestion.ranges.iter().enumerate() {
        let column: Vec<f64> = cov.iter().map(|r| r[j]).collect();
        assert_eq!(*range, estimator.effective_range(&points, &column).unwrap());
    }
}

/// Test that the worker pool returns the sequential result.
#[test]
fn test_suggest_block_size_parallel_matches_sequential() {
    let points = line(40);
    let lags: Vec<f64> = (1..=10).map(|h| h as f64).collect();
    let cov = covariates(40);

    let sequential = suggest_block_size(&points, &cov, &lags, 0.5, Euclidean, 1).unwrap();
    let parallel = suggest_block_size(&points, &cov, &lags, 0.5, Euclidean, 4).unwrap();
    let all_cores = suggest_block_size(&points, &cov, &lags, 0.5, Euclidean, 0).unwrap();
    assert_eq!(sequential, parallel);
    assert_eq!(sequential, all_cores);
}

/// Test that one failing covariate fails the whole suggestion.
#[test]
fn test_suggest_block_size_propagates_failure() {
    let points = line(10);
    let lags: Vec<f64> = (1..=4).map(|h| h as f64).collect();
    // Second covariate is constant: all semivariances are zero
    let cov: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 5.0]).collect();

    for workers in [1, 2] {
        assert!(matches!(
            suggest_block_size(&points, &cov, &lags, 0.5, Euclidean, workers),
            Err(SpacvError::FitFailed { .. })
        ));
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test builder validation errors.
#[test]
fn test_variogram_builder_errors() {
    assert!(matches!(
        Variogram::<f64>::new().bandwidth(1.0).build(),
        Err(SpacvError::InvalidLags(_))
    ));
    assert!(matches!(
        Variogram::new().lags(vec![1.0]).build(),
        Err(SpacvError::InvalidBandwidth(_))
    ));
    assert_eq!(
        Variogram::new()
            .lags(vec![1.0])
            .lags(vec![2.0])
            .bandwidth(1.0)
            .build()
            .unwrap_err(),
        SpacvError::DuplicateParameter { parameter: "lags" }
    );
    assert!(matches!(
        Variogram::new().lags(vec![1.0]).bandwidth(1.0).nugget(f64::NAN).build(),
        Err(SpacvError::InvalidNumericValue(_))
    ));
}
