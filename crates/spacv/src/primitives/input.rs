//! Input abstractions for feature matrices.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for row-major feature matrices,
//! allowing the applicability-domain and cross-validation entry points to
//! accept nested vectors, flat slices with a column count, or `ndarray`
//! matrices through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Flat slices and standard-layout `ndarray`
//!   matrices are borrowed; nested vectors are flattened once.
//! * **Fail-fast validation**: Ragged rows and non-contiguous arrays are rejected.
//!
//! ## Invariants
//!
//! * `data.len() == n_rows * n_features`.
//! * Row `i` occupies `data[i * n_features..(i + 1) * n_features]`.

// External dependencies
use ndarray::{ArrayBase, Data, Ix2};
use num_traits::Float;
use std::borrow::Cow;

// Internal dependencies
use crate::primitives::errors::SpacvError;

// ============================================================================
// Feature matrix
// ============================================================================

/// Row-major feature matrix view.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix<'a, T: Clone> {
    data: Cow<'a, [T]>,
    n_features: usize,
}

impl<'a, T: Float> FeatureMatrix<'a, T> {
    /// Borrow a flat row-major buffer with `n_features` columns.
    pub fn from_flat(data: &'a [T], n_features: usize) -> Result<Self, SpacvError> {
        if n_features == 0 {
            if data.is_empty() {
                return Ok(Self {
                    data: Cow::Borrowed(data),
                    n_features,
                });
            }
            return Err(SpacvError::InvalidInput(
                "n_features must be at least 1".to_string(),
            ));
        }
        if data.len() % n_features != 0 {
            return Err(SpacvError::InvalidInput(format!(
                "buffer of {} values is not a multiple of {} features",
                data.len(),
                n_features
            )));
        }
        Ok(Self {
            data: Cow::Borrowed(data),
            n_features,
        })
    }

    /// Number of rows (instances).
    pub fn n_rows(&self) -> usize {
        if self.n_features == 0 {
            0
        } else {
            self.data.len() / self.n_features
        }
    }

    /// Number of columns (features).
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Column `j` copied into a vector.
    pub fn column(&self, j: usize) -> Vec<T> {
        (0..self.n_rows()).map(|i| self.row(i)[j]).collect()
    }

    /// Whole buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Copy the selected rows into a new owned matrix.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureMatrix<'a, T> {
        let mut data = Vec::with_capacity(indices.len() * self.n_features);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        FeatureMatrix {
            data: Cow::Owned(data),
            n_features: self.n_features,
        }
    }
}

// ============================================================================
// Input trait
// ============================================================================

/// Trait for types that can be viewed as a row-major feature matrix.
pub trait FeatureInput<T: Float> {
    /// Convert the input to a feature matrix view.
    fn as_feature_matrix(&self) -> Result<FeatureMatrix<'_, T>, SpacvError>;
}

impl<T: Float> FeatureInput<T> for FeatureMatrix<'_, T> {
    fn as_feature_matrix(&self) -> Result<FeatureMatrix<'_, T>, SpacvError> {
        Ok(FeatureMatrix {
            data: Cow::Borrowed(self.as_slice()),
            n_features: self.n_features,
        })
    }
}

impl<T: Float> FeatureInput<T> for [Vec<T>] {
    fn as_feature_matrix(&self) -> Result<FeatureMatrix<'_, T>, SpacvError> {
        let n_features = self.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(self.len() * n_features);
        for (i, row) in self.iter().enumerate() {
            if row.len() != n_features {
                return Err(SpacvError::InvalidInput(format!(
                    "row {} has {} features, expected {}",
                    i,
                    row.len(),
                    n_features
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(FeatureMatrix {
            data: Cow::Owned(data),
            n_features,
        })
    }
}

impl<T: Float> FeatureInput<T> for Vec<Vec<T>> {
    fn as_feature_matrix(&self) -> Result<FeatureMatrix<'_, T>, SpacvError> {
        self.as_slice().as_feature_matrix()
    }
}

impl<T: Float, S> FeatureInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_feature_matrix(&self) -> Result<FeatureMatrix<'_, T>, SpacvError> {
        let data = self.as_slice().ok_or_else(|| {
            SpacvError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })?;
        Ok(FeatureMatrix {
            data: Cow::Borrowed(data),
            n_features: self.ncols(),
        })
    }
}
