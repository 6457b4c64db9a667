//! Input validation for splitter, variogram and applicability configuration.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before any computation.
//! They check input lengths, finite values and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SpacvError;
use crate::primitives::fold::Fold;
use crate::primitives::geometry::Point;
use crate::primitives::input::FeatureMatrix;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for configuration and input data.
///
/// All methods return `Result<(), SpacvError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a point set: non-empty, all coordinates finite.
    pub fn validate_points<T: Float>(points: &[Point<T>]) -> Result<(), SpacvError> {
        if points.is_empty() {
            return Err(SpacvError::EmptyInput);
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(SpacvError::InvalidNumericValue(format!(
                "points[{}]=({}, {})",
                i,
                points[i].x.to_f64().unwrap_or(f64::NAN),
                points[i].y.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate that every value in a slice is finite.
    pub fn validate_finite<T: Float>(vals: &[T], name: &str) -> Result<(), SpacvError> {
        if let Some(i) = vals.iter().position(|v| !v.is_finite()) {
            return Err(SpacvError::InvalidNumericValue(format!(
                "{}[{}]={}",
                name,
                i,
                vals[i].to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate that two inputs agree in length.
    pub fn validate_lengths(expected: usize, got: usize) -> Result<(), SpacvError> {
        if expected != got {
            return Err(SpacvError::MismatchedInputs { expected, got });
        }
        Ok(())
    }

    /// Validate a feature matrix: at least `min_rows` rows, all values finite.
    pub fn validate_features<T: Float>(
        m: &FeatureMatrix<'_, T>,
        min_rows: usize,
        name: &str,
    ) -> Result<(), SpacvError> {
        if m.n_rows() < min_rows {
            return Err(SpacvError::TooFewInstances {
                got: m.n_rows(),
                min: min_rows,
            });
        }
        Self::validate_finite(m.as_slice(), name)
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a buffer radius.
    pub fn validate_buffer_radius<T: Float>(radius: T) -> Result<(), SpacvError> {
        if !radius.is_finite() || radius < T::zero() {
            return Err(SpacvError::InvalidBufferRadius(
                radius.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate tile counts along both axes.
    pub fn validate_tile_counts(tiles_x: usize, tiles_y: usize) -> Result<(), SpacvError> {
        if tiles_x == 0 || tiles_y == 0 {
            return Err(SpacvError::InvalidTileCount {
                x: tiles_x,
                y: tiles_y,
            });
        }
        Ok(())
    }

    /// Validate the number of tile groups.
    pub fn validate_n_groups(n_groups: usize) -> Result<(), SpacvError> {
        if n_groups == 0 {
            return Err(SpacvError::InvalidGroupCount(n_groups));
        }
        Ok(())
    }

    /// Validate a quantile level in `[0, 1]`.
    pub fn validate_quantile<T: Float>(q: T) -> Result<(), SpacvError> {
        if !q.is_finite() || q < T::zero() || q > T::one() {
            return Err(SpacvError::InvalidQuantile(q.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate a lag bandwidth.
    pub fn validate_bandwidth<T: Float>(bw: T) -> Result<(), SpacvError> {
        if !bw.is_finite() || bw < T::zero() {
            return Err(SpacvError::InvalidBandwidth(bw.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate lag distances: non-empty, finite, non-negative.
    pub fn validate_lags<T: Float>(lags: &[T]) -> Result<(), SpacvError> {
        if lags.is_empty() {
            return Err(SpacvError::InvalidLags("no lags requested".to_string()));
        }
        if let Some(i) = lags.iter().position(|l| !l.is_finite() || *l < T::zero()) {
            return Err(SpacvError::InvalidLags(format!(
                "lags[{}]={} (must be >= 0 and finite)",
                i,
                lags[i].to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate the number of folds for k-fold cross-validation.
    pub fn validate_kfold(k: usize, n: usize) -> Result<(), SpacvError> {
        if k < 2 {
            return Err(SpacvError::InvalidInput(format!(
                "k-fold must be at least 2, got {k}"
            )));
        }
        if n < k {
            return Err(SpacvError::TooFewInstances { got: n, min: k });
        }
        Ok(())
    }

    /// Validate fold membership: indices in range, each listed at most once.
    pub fn validate_folds(folds: &[Vec<usize>], n: usize) -> Result<(), SpacvError> {
        let mut seen = vec![false; n];
        for (f, fold) in folds.iter().enumerate() {
            for &i in fold {
                if i >= n {
                    return Err(SpacvError::InvalidFolds(format!(
                        "fold {f} lists index {i} but there are only {n} training instances"
                    )));
                }
                if seen[i] {
                    return Err(SpacvError::InvalidFolds(format!(
                        "index {i} appears in more than one fold"
                    )));
                }
                seen[i] = true;
            }
        }
        Ok(())
    }

    /// Validate that a splitter's fold only refers to existing points.
    pub fn validate_fold(index: usize, fold: &Fold, n: usize) -> Result<(), SpacvError> {
        if let Some(&i) = fold.test.iter().chain(fold.exclude.iter()).find(|&&i| i >= n) {
            return Err(SpacvError::InvalidFolds(format!(
                "fold {index} lists index {i} but there are only {n} points"
            )));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), SpacvError> {
        if let Some(param) = duplicate_param {
            return Err(SpacvError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
