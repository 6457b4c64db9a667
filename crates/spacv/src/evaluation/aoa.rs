//! Dissimilarity index and area of applicability (AOA).
//!
//! ## Purpose
//!
//! This module estimates whether new observations fall inside the region of
//! feature space where a model's cross-validated error is trustworthy. Each
//! new point receives a dissimilarity index (DI): its distance to the nearest
//! training instance, divided by the average distance between training
//! instances. Points whose DI does not exceed a quantile of the training
//! instances' own nearest-other DI are inside the AOA.
//!
//! ## Design notes
//!
//! * **Independent standardisation**: Training and new data are each scaled by
//!   their *own* column means and standard deviations. New data is not scaled
//!   with training statistics.
//! * **Fold-aware distances**: When fold membership is supplied, a training
//!   instance is never compared against instances of its own fold.
//! * **Missing, not zero**: Self-distances and masked distances are NaN and are
//!   skipped by every mean and minimum.
//! * **One metric**: New-to-training and training-to-training distances use the
//!   same metric, so DI and threshold share units.
//!
//! ## Invariants
//!
//! * DI values are non-negative.
//! * `mask[i] == 1` exactly when `dissimilarity[i] <= threshold`.
//! * At least two training instances are required; with two or more the
//!   estimate never fails on fold layout. If every instance shares one fold,
//!   normaliser, threshold and DI are NaN and the mask is all zero.
//!
//! ## Non-goals
//!
//! * This module does not weight features by model importance.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::distance::DistanceMetric;
use crate::math::neighbors::NearestIndex;
use crate::math::stats::{mean, nan_mean, nan_min, quantile, standardize};
use crate::primitives::errors::SpacvError;
use crate::primitives::input::{FeatureInput, FeatureMatrix};

// ============================================================================
// Result
// ============================================================================

/// Output of an applicability estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct AoaResult<T> {
    /// Dissimilarity index per new point.
    pub dissimilarity: Vec<T>,

    /// 1 where the new point is inside the area of applicability, 0 otherwise.
    pub mask: Vec<u8>,

    /// DI threshold (quantile of `training_dissimilarity`).
    pub threshold: T,

    /// Average training distance used to normalise every DI (NaN when fully masked).
    pub normalizer: T,

    /// Normalised nearest-other distance per training instance (NaN when fully masked).
    pub training_dissimilarity: Vec<T>,
}

impl<T: Float> AoaResult<T> {
    /// Quantile `q` of the training dissimilarities, ignoring masked instances.
    pub fn training_quantile(&self, q: T) -> T {
        let valid: Vec<T> = self
            .training_dissimilarity
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        quantile(&valid, q)
    }

    /// Number of new points inside the area of applicability.
    pub fn inside_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m == 1).count()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the applicability estimator.
#[derive(Debug, Clone)]
pub struct AoaBuilder<T> {
    /// Quantile of the training DI used as threshold (default 0.95).
    pub threshold: Option<T>,

    /// Distance metric (default Euclidean).
    pub metric: Option<DistanceMetric>,

    /// Training indices grouped by cross-validation fold.
    pub fold_indices: Option<Vec<Vec<usize>>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for AoaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> AoaBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            threshold: None,
            metric: None,
            fold_indices: None,
            duplicate_param: None,
        }
    }

    /// Set the threshold quantile.
    pub fn threshold(mut self, q: T) -> Self {
        if self.threshold.is_some() {
            self.duplicate_param = Some("threshold");
        }
        self.threshold = Some(q);
        self
    }

    /// Set the distance metric.
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        if self.metric.is_some() {
            self.duplicate_param = Some("metric");
        }
        self.metric = Some(metric);
        self
    }

    /// Supply fold membership of the training instances.
    pub fn fold_indices(mut self, folds: Vec<Vec<usize>>) -> Self {
        if self.fold_indices.is_some() {
            self.duplicate_param = Some("fold_indices");
        }
        self.fold_indices = Some(folds);
        self
    }

    /// Validate the configuration and build the estimator.
    pub fn build(self) -> Result<AoaEstimator<T>, SpacvError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        let threshold = self
            .threshold
            .unwrap_or_else(|| T::from(0.95).unwrap_or_else(T::nan));
        Validator::validate_quantile(threshold)?;

        Ok(AoaEstimator {
            threshold,
            metric: self.metric.unwrap_or_default(),
            fold_indices: self.fold_indices,
        })
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Configured applicability estimator.
#[derive(Debug, Clone)]
pub struct AoaEstimator<T> {
    threshold: T,
    metric: DistanceMetric,
    fold_indices: Option<Vec<Vec<usize>>>,
}

impl<T: Float> AoaEstimator<T> {
    /// Score `new_data` against `training_data`.
    pub fn compute<N, R>(&self, new_data: &N, training_data: &R) -> Result<AoaResult<T>, SpacvError>
    where
        N: FeatureInput<T> + ?Sized,
        R: FeatureInput<T> + ?Sized,
    {
        let train = training_data.as_feature_matrix()?;
        let new = new_data.as_feature_matrix()?;
        aoa_matrices(
            &new,
            &train,
            self.threshold,
            self.fold_indices.as_deref(),
            self.metric,
        )
    }
}

/// Score `new_data` against `training_data` in one call.
pub fn aoa<T, N, R>(
    new_data: &N,
    training_data: &R,
    threshold: T,
    fold_indices: Option<&[Vec<usize>]>,
    metric: DistanceMetric,
) -> Result<AoaResult<T>, SpacvError>
where
    T: Float,
    N: FeatureInput<T> + ?Sized,
    R: FeatureInput<T> + ?Sized,
{
    Validator::validate_quantile(threshold)?;
    let train = training_data.as_feature_matrix()?;
    let new = new_data.as_feature_matrix()?;
    aoa_matrices(&new, &train, threshold, fold_indices, metric)
}

fn aoa_matrices<T: Float>(
    new: &FeatureMatrix<'_, T>,
    train: &FeatureMatrix<'_, T>,
    threshold: T,
    fold_indices: Option<&[Vec<usize>]>,
    metric: DistanceMetric,
) -> Result<AoaResult<T>, SpacvError> {
    // Step 1: Preconditions
    Validator::validate_features(train, 2, "training_data")?;
    Validator::validate_features(new, 0, "new_data")?;
    let n = train.n_rows();
    let d = train.n_features();
    if new.n_rows() > 0 {
        Validator::validate_lengths(d, new.n_features())?;
    }
    metric.check_features(d)?;
    if let Some(folds) = fold_indices {
        Validator::validate_folds(folds, n)?;
    }

    // Step 2: Independent standardisation
    let train_std = standardize(train);
    let new_std = standardize(new);
    for (name, s) in [("training_data", &train_std), ("new_data", &new_std)] {
        if !s.constant_columns.is_empty() {
            log::warn!(
                "{} has zero-variance columns {:?}; they are centred but not scaled",
                name,
                s.constant_columns
            );
        }
    }

    // Step 3: Nearest training instance for each new point
    let index = NearestIndex::new(&train_std.data, d, metric);
    let mindist: Vec<T> = (0..new.n_rows())
        .map(|i| {
            let row = &new_std.data[i * d..(i + 1) * d];
            index.nearest(row).map_or_else(T::nan, |(_, dist)| dist)
        })
        .collect();

    // Step 4: Pairwise training distances, diagonal missing
    let row = |i: usize| &train_std.data[i * d..(i + 1) * d];
    let mut dist = vec![T::nan(); n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let v = metric.features(row(i), row(j));
            dist[i * n + j] = v;
            dist[j * n + i] = v;
        }
    }

    // Step 5: Never compare an instance with its own fold
    if let Some(folds) = fold_indices {
        let mut fold_of: Vec<Option<usize>> = vec![None; n];
        for (f, fold) in folds.iter().enumerate() {
            for &i in fold {
                fold_of[i] = Some(f);
            }
        }
        for i in 0..n {
            if let Some(fi) = fold_of[i] {
                for j in 0..n {
                    if fold_of[j] == Some(fi) {
                        dist[i * n + j] = T::nan();
                    }
                }
            }
        }
    }

    // Step 6: Global normaliser from per-instance mean distances
    let row_means: Vec<T> = (0..n).map(|i| nan_mean(&dist[i * n..(i + 1) * n])).collect();
    let valid_means: Vec<T> = row_means.iter().copied().filter(|v| !v.is_nan()).collect();
    let mut normalizer = if valid_means.is_empty() {
        log::warn!(
            "all {} training instances share one fold; dissimilarities and threshold are undefined",
            n
        );
        T::nan()
    } else {
        mean(&valid_means)
    };
    if !normalizer.is_nan() && (!(normalizer > T::zero()) || !normalizer.is_finite()) {
        log::warn!("average training distance is zero; dissimilarities are left unnormalised");
        normalizer = T::one();
    }

    // Step 7: Threshold from the training nearest-other distances
    let training_dissimilarity: Vec<T> = (0..n)
        .map(|i| nan_min(&dist[i * n..(i + 1) * n]) / normalizer)
        .collect();
    let valid_mins: Vec<T> = training_dissimilarity
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    let threshold = quantile(&valid_mins, threshold);

    // Step 8: Dissimilarity index and applicability mask
    let dissimilarity: Vec<T> = mindist.into_iter().map(|m| m / normalizer).collect();
    let mask: Vec<u8> = dissimilarity
        .iter()
        .map(|&di| u8::from(di <= threshold))
        .collect();

    Ok(AoaResult {
        dissimilarity,
        mask,
        threshold,
        normalizer,
        training_dissimilarity,
    })
}
