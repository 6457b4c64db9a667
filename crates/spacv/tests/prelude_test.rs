#![cfg(feature = "dev")]
//! Tests for the prelude module.
//!
//! These tests verify that the prelude exports all necessary types and traits
//! for convenient usage of the spacv API. The prelude should provide a
//! one-stop import for common spatial cross-validation workflows.
//!
//! ## Test Organization
//!
//! 1. **Import Verification** - All prelude exports are accessible
//! 2. **Selectors** - Enum variants can be used without qualification
//! 3. **Workflows** - Complete pipelines work with prelude imports

use spacv::prelude::*;

// ============================================================================
// Import Verification Tests
// ============================================================================

/// Test that every builder is reachable through its alias.
#[test]
fn test_prelude_builders() {
    assert!(HBlock::<f64>::new().build().is_ok());
    assert!(SLoo::new().buffer_radius(1.0).build().is_ok());
    assert!(Aoa::<f64>::new().build().is_ok());
    assert!(Variogram::new().lags(vec![1.0, 2.0]).bandwidth(0.5).build().is_ok());
    assert_eq!(KFold::new(3).k, 3);
}

/// Test that the selector variants are exported.
#[test]
fn test_prelude_selectors() {
    let _ = HBlock::<f64>::new().method(Unique);
    let _ = HBlock::<f64>::new().method(Systematic).direction(Diagonal);
    let _ = HBlock::<f64>::new().method(Random).direction(Anti);
    let _ = Aoa::<f64>::new().metric(Euclidean);
    let _ = Aoa::<f64>::new().metric(Haversine);
    assert_eq!(DistanceMetric::default(), Euclidean);
    assert_eq!(GridMethod::default(), Unique);
    assert_eq!(Direction::default(), Diagonal);
}

/// Test that error values display a readable message.
#[test]
fn test_prelude_error_display() {
    let err = SLoo::<f64>::new().build().unwrap_err();
    assert!(!err.to_string().is_empty());
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(!boxed.to_string().is_empty());
}

// ============================================================================
// Workflow Tests
// ============================================================================

/// Test a full pipeline: block size, grid folds, applicability.
#[test]
fn test_prelude_pipeline() {
    let x: Vec<f64> = (0..36).map(|i| (i % 6) as f64).collect();
    let y: Vec<f64> = (0..36).map(|i| (i / 6) as f64).collect();
    let points = points_from_xy(&x, &y).unwrap();
    let covariates: Vec<Vec<f64>> = points
        .iter()
        .map(|p| vec![(p.x / 2.0).sin() + p.y * 0.1, (p.x * p.y).sqrt()])
        .collect();

    let suggestion = Variogram::new()
        .lags(vec![1.0, 2.0, 3.0, 4.0])
        .bandwidth(0.5)
        .build()
        .unwrap()
        .suggest_block_size(&points, &covariates)
        .unwrap();
    assert_eq!(suggestion.ranges.len(), 2);

    let splitter = HBlock::new()
        .tiles(3, 3)
        .buffer_radius(0.5)
        .build()
        .unwrap();
    let folds: Vec<Fold> = splitter.iterate_folds(&points).unwrap().collect();
    assert_eq!(folds.iter().map(|f| f.test.len()).sum::<usize>(), 36);

    let fold_indices: Vec<Vec<usize>> = folds.iter().map(|f| f.test.clone()).collect();
    let result = Aoa::new()
        .fold_indices(fold_indices)
        .build()
        .unwrap()
        .compute(&vec![vec![0.5, 1.0], vec![40.0, -3.0]], &covariates)
        .unwrap();
    assert_eq!(result.mask.len(), 2);
}
