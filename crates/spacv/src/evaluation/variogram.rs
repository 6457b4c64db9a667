//! Empirical variogram and spatial block-size suggestion.
//!
//! ## Purpose
//!
//! This module measures how fast the similarity of a covariate decays with
//! distance. It computes empirical semivariance at requested lag distances,
//! fits a spherical model to those samples, and reports the fitted range as
//! the distance beyond which autocorrelation is negligible. The median range
//! across covariates is suggested as the block size for grid-block CV.
//!
//! ## Design notes
//!
//! * **Pairs once**: Pairwise point distances are computed once per call
//!   (upper triangle only) and shared read-only by every covariate task.
//! * **Lag bins**: A pair contributes to a lag when its distance lies in
//!   `[lag - bandwidth, lag + bandwidth]`; bins may overlap.
//! * **Zero differences count**: A pair with equal values adds 0 to the sum
//!   but still adds 1 to the pair count.
//! * **Parallel covariates**: Per-covariate fits are independent tasks on the
//!   [`TaskExecutor`]; any failing covariate fails the whole suggestion.
//!
//! ## Invariants
//!
//! * One semivariance per requested lag, in request order.
//! * Semivariances are non-negative; an empty bin yields 0 and a warning.
//!
//! ## Non-goals
//!
//! * This module does not fit nugget, exponential or Gaussian models.
//! * This module does not plot variograms.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::spherical::{fit_spherical, SphericalModel};
use crate::engine::executor::TaskExecutor;
use crate::engine::validator::Validator;
use crate::math::distance::DistanceMetric;
use crate::math::stats::median_inplace;
use crate::primitives::errors::SpacvError;
use crate::primitives::geometry::Point;
use crate::primitives::input::FeatureInput;

// ============================================================================
// Pairwise distances
// ============================================================================

/// Condensed upper-triangular distance matrix.
struct PairDistances<T> {
    n: usize,
    dist: Vec<T>,
}

impl<T: Float> PairDistances<T> {
    fn new(points: &[Point<T>], metric: DistanceMetric) -> Self {
        let n = points.len();
        let mut dist = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                dist.push(metric.points(&points[i], &points[j]));
            }
        }
        Self { n, dist }
    }

    /// Semivariance of `values` at every lag.
    fn semivariance(&self, values: &[T], lags: &[T], bandwidth: T) -> Vec<T> {
        let two = T::one() + T::one();
        lags.iter()
            .map(|&lag| {
                let (lo, hi) = (lag - bandwidth, lag + bandwidth);
                let mut sum = T::zero();
                let mut count = 0usize;
                let mut k = 0;
                for i in 0..self.n {
                    for j in (i + 1)..self.n {
                        let d = self.dist[k];
                        k += 1;
                        // Equal-valued pairs stay in the count
                        if d >= lo && d <= hi {
                            let diff = values[i] - values[j];
                            sum = sum + diff * diff;
                            count += 1;
                        }
                    }
                }
                if count == 0 {
                    log::warn!(
                        "no point pairs within {} of lag {}; semivariance set to 0",
                        bandwidth.to_f64().unwrap_or(f64::NAN),
                        lag.to_f64().unwrap_or(f64::NAN)
                    );
                    T::zero()
                } else {
                    sum / (two * T::from(count).unwrap_or_else(T::nan))
                }
            })
            .collect()
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Empirical semivariance of `values` at each lag distance.
pub fn semivariance_at_lags<T: Float>(
    points: &[Point<T>],
    values: &[T],
    lags: &[T],
    bandwidth: T,
    metric: DistanceMetric,
) -> Result<Vec<T>, SpacvError> {
    Validator::validate_points(points)?;
    Validator::validate_lengths(points.len(), values.len())?;
    Validator::validate_finite(values, "values")?;
    Validator::validate_lags(lags)?;
    Validator::validate_bandwidth(bandwidth)?;

    Ok(PairDistances::new(points, metric).semivariance(values, lags, bandwidth))
}

/// Fitted spherical range for `(lag, semivariance)` samples, nugget 0.
pub fn fit_effective_range<T: Float>(semivariances: &[T], lags: &[T]) -> Result<T, SpacvError> {
    fit_spherical(lags, semivariances, T::zero()).map(|m| m.range)
}

// ============================================================================
// Block-size suggestion
// ============================================================================

/// Per-covariate effective ranges and their median.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSizeSuggestion<T> {
    /// Effective range per covariate, in column order.
    pub ranges: Vec<T>,

    /// Median of `ranges`; the suggested block size.
    pub block_size: T,
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the variogram estimator.
#[derive(Debug, Clone)]
pub struct VariogramBuilder<T> {
    /// Lag distances at which semivariance is sampled (required).
    pub lags: Option<Vec<T>>,

    /// Half-width of each lag bin (required).
    pub bandwidth: Option<T>,

    /// Distance metric between points (default Euclidean).
    pub metric: Option<DistanceMetric>,

    /// Fixed nugget of the spherical model (default 0).
    pub nugget: Option<T>,

    /// Worker count for per-covariate fits (default 1, 0 = all cores).
    pub workers: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for VariogramBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> VariogramBuilder<T> {
    /// Create a new builder; lags and bandwidth must be set before `build()`.
    pub fn new() -> Self {
        Self {
            lags: None,
            bandwidth: None,
            metric: None,
            nugget: None,
            workers: None,
            duplicate_param: None,
        }
    }

    /// Set the lag distances.
    pub fn lags(mut self, lags: Vec<T>) -> Self {
        if self.lags.is_some() {
            self.duplicate_param = Some("lags");
        }
        self.lags = Some(lags);
        self
    }

    /// Set the lag bin half-width.
    pub fn bandwidth(mut self, bandwidth: T) -> Self {
        if self.bandwidth.is_some() {
            self.duplicate_param = Some("bandwidth");
        }
        self.bandwidth = Some(bandwidth);
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

    /// Set the model nugget.
    pub fn nugget(mut self, nugget: T) -> Self {
        if self.nugget.is_some() {
            self.duplicate_param = Some("nugget");
        }
        self.nugget = Some(nugget);
        self
    }

    /// Set the worker count.
    pub fn workers(mut self, workers: usize) -> Self {
        if self.workers.is_some() {
            self.duplicate_param = Some("workers");
        }
        self.workers = Some(workers);
        self
    }

    /// Validate the configuration and build the estimator.
    pub fn build(self) -> Result<VariogramEstimator<T>, SpacvError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        let lags = self
            .lags
            .ok_or_else(|| SpacvError::InvalidLags("no lags requested".to_string()))?;
        Validator::validate_lags(&lags)?;
        let bandwidth = self
            .bandwidth
            .ok_or(SpacvError::InvalidBandwidth(f64::NAN))?;
        Validator::validate_bandwidth(bandwidth)?;
        let nugget = self.nugget.unwrap_or_else(T::zero);
        Validator::validate_finite(&[nugget], "nugget")?;

        Ok(VariogramEstimator {
            lags,
            bandwidth,
            metric: self.metric.unwrap_or_default(),
            nugget,
            executor: TaskExecutor::new(self.workers.unwrap_or(1)),
        })
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Configured variogram estimator.
#[derive(Debug, Clone)]
pub struct VariogramEstimator<T> {
    lags: Vec<T>,
    bandwidth: T,
    metric: DistanceMetric,
    nugget: T,
    executor: TaskExecutor,
}

impl<T: Float> VariogramEstimator<T> {
    /// Requested lag distances.
    pub fn lags(&self) -> &[T] {
        &self.lags
    }

    /// Semivariance of `values` at every configured lag.
    pub fn semivariance_at_lags(
        &self,
        points: &[Point<T>],
        values: &[T],
    ) -> Result<Vec<T>, SpacvError> {
        semivariance_at_lags(points, values, &self.lags, self.bandwidth, self.metric)
    }

    /// Semivariance samples as `(lag, semivariance)` pairs.
    pub fn samples(&self, points: &[Point<T>], values: &[T]) -> Result<Vec<(T, T)>, SpacvError> {
        let sv = self.semivariance_at_lags(points, values)?;
        Ok(self.lags.iter().copied().zip(sv).collect())
    }

    /// Fit a spherical model to the empirical variogram of `values`.
    pub fn fit(&self, points: &[Point<T>], values: &[T]) -> Result<SphericalModel<T>, SpacvError> {
        let sv = self.semivariance_at_lags(points, values)?;
        fit_spherical(&self.lags, &sv, self.nugget)
    }

    /// Effective range of `values`.
    pub fn effective_range(&self, points: &[Point<T>], values: &[T]) -> Result<T, SpacvError> {
        self.fit(points, values).map(|m| m.range)
    }
}

impl<T: Float + Send + Sync> VariogramEstimator<T> {
    /// Effective range of every covariate column and their median.
    pub fn suggest_block_size<X>(
        &self,
        points: &[Point<T>],
        covariates: &X,
    ) -> Result<BlockSizeSuggestion<T>, SpacvError>
    where
        X: FeatureInput<T> + ?Sized,
    {
        Validator::validate_points(points)?;
        let m = covariates.as_feature_matrix()?;
        Validator::validate_lengths(points.len(), m.n_rows())?;
        Validator::validate_features(&m, 1, "covariates")?;

        let pairs = PairDistances::new(points, self.metric);
        let columns: Vec<Vec<T>> = (0..m.n_features()).map(|j| m.column(j)).collect();

        let ranges = self.executor.run(columns, |values| {
            let sv = pairs.semivariance(&values, &self.lags, self.bandwidth);
            fit_spherical(&self.lags, &sv, self.nugget).map(|model| model.range)
        })?;

        let mut scratch = ranges.clone();
        let block_size = median_inplace(&mut scratch);
        log::debug!(
            "suggested block size {} from {} covariates",
            block_size.to_f64().unwrap_or(f64::NAN),
            ranges.len()
        );

        Ok(BlockSizeSuggestion { ranges, block_size })
    }
}

/// Suggest a block size from the effective ranges of every covariate column.
pub fn suggest_block_size<T, X>(
    points: &[Point<T>],
    covariates: &X,
    lags: &[T],
    bandwidth: T,
    metric: DistanceMetric,
    workers: usize,
) -> Result<BlockSizeSuggestion<T>, SpacvError>
where
    T: Float + Send + Sync,
    X: FeatureInput<T> + ?Sized,
{
    VariogramBuilder::new()
        .lags(lags.to_vec())
        .bandwidth(bandwidth)
        .metric(metric)
        .workers(workers)
        .build()?
        .suggest_block_size(points, covariates)
}
