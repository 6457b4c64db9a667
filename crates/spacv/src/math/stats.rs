//! Descriptive statistics used by the estimators.
//!
//! ## Purpose
//!
//! Column standardisation, NaN-aware means, quickselect medians and linearly
//! interpolated quantiles.
//!
//! ## Design notes
//!
//! * **Population moments**: Standard deviations divide by `n`, not `n - 1`.
//! * **Missing values**: NaN marks "not compared" in distance rows; the
//!   NaN-aware helpers skip them instead of treating them as zero.
//! * **Quantiles**: Linear interpolation between closest ranks, `q * (n - 1)`.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::primitives::input::FeatureMatrix;

// ============================================================================
// Standardisation
// ============================================================================

/// Result of standardising a feature matrix column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized<T> {
    /// Standardised values, row-major, same shape as the input.
    pub data: Vec<T>,
    /// Columns whose standard deviation was zero (left centred, not scaled).
    pub constant_columns: Vec<usize>,
}

/// Subtract each column's mean and divide by its population standard deviation.
pub fn standardize<T: Float>(m: &FeatureMatrix<'_, T>) -> Standardized<T> {
    let n = m.n_rows();
    let d = m.n_features();
    let mut data = m.as_slice().to_vec();
    let mut constant_columns = Vec::new();
    if n == 0 {
        return Standardized {
            data,
            constant_columns,
        };
    }

    let nf = T::from(n).unwrap_or_else(T::nan);
    for j in 0..d {
        let mean = (0..n).fold(T::zero(), |acc, i| acc + data[i * d + j]) / nf;
        let var = (0..n).fold(T::zero(), |acc, i| {
            let dev = data[i * d + j] - mean;
            acc + dev * dev
        }) / nf;
        let std = var.sqrt();
        let scale = if std > T::zero() {
            std
        } else {
            constant_columns.push(j);
            T::one()
        };
        for i in 0..n {
            data[i * d + j] = (data[i * d + j] - mean) / scale;
        }
    }

    Standardized {
        data,
        constant_columns,
    }
}

// ============================================================================
// Means
// ============================================================================

/// Arithmetic mean; NaN for an empty slice.
pub fn mean<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::nan();
    }
    let sum = vals.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(vals.len()).unwrap_or_else(T::nan)
}

/// Mean of the non-NaN values; NaN if every value is NaN.
pub fn nan_mean<T: Float>(vals: &[T]) -> T {
    let (sum, count) = vals
        .iter()
        .filter(|v| !v.is_nan())
        .fold((T::zero(), 0usize), |(s, c), &v| (s + v, c + 1));
    if count == 0 {
        return T::nan();
    }
    sum / T::from(count).unwrap_or_else(T::nan)
}

/// Minimum of the non-NaN values; NaN if every value is NaN.
pub fn nan_min<T: Float>(vals: &[T]) -> T {
    vals.iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<T>, &v| Some(acc.map_or(v, |m| m.min(v))))
        .unwrap_or_else(T::nan)
}

// ============================================================================
// Order statistics
// ============================================================================

/// Median computed in place with quickselect; zero for an empty slice.
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 0 {
        // Even length: average with the largest value of the lower half
        let lower = vals[..mid].iter().fold(vals[0], |m, &v| m.max(v));
        (lower + upper) / (T::one() + T::one())
    } else {
        upper
    }
}

/// Quantile `q` in `[0, 1]` with linear interpolation; NaN for an empty slice.
pub fn quantile<T: Float>(vals: &[T], q: T) -> T {
    if vals.is_empty() {
        return T::nan();
    }
    let mut sorted = vals.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));

    let last = sorted.len() - 1;
    let pos = q * T::from(last).unwrap_or_else(T::nan);
    let lo = pos.floor().to_usize().unwrap_or(0).min(last);
    let hi = pos.ceil().to_usize().unwrap_or(last).min(last);
    let frac = pos - pos.floor();
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
