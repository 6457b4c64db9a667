//! Cross-validation driver.
//!
//! ## Purpose
//!
//! This module runs a model through every fold of a splitter: for each fold
//! it trains on the effective training set (all points minus the test set
//! minus the dead zone) and scores on the test set with a caller-supplied
//! scorer.
//!
//! ## Design notes
//!
//! * **Generic Strategy**: Any [`SpatialSplitter`] drives the loop.
//! * **Fallback**: Without a splitter, a shuffled 5-fold split (seed 0, no
//!   spatial awareness) is used as a convenience default.
//! * **Opaque scores**: Whether higher or lower is better is up to the caller.
//!
//! ## Invariants
//!
//! * One score per fold, in fold emission order.
//! * Training and test sets are disjoint in each fold.
//! * A fold naming a point outside the input is `InvalidFolds`, not a panic.
//!
//! ## Non-goals
//!
//! * This module does not choose, tune or persist models.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::SpacvError;
use crate::primitives::geometry::Point;
use crate::primitives::input::{FeatureInput, FeatureMatrix};
use crate::splitters::kfold::KFoldSplitter;
use crate::splitters::SpatialSplitter;

/// A trainable model.
pub trait Model<T: Float> {
    /// Fit the model to `features` (one row per instance) and `labels`.
    fn fit(&mut self, features: &FeatureMatrix<'_, T>, labels: &[T]) -> Result<(), SpacvError>;
}

/// Score a model on every fold produced by `cv` (or a shuffled 5-fold split).
pub fn cross_val_score<T, M, X, S>(
    model: &mut M,
    points: &[Point<T>],
    features: &X,
    labels: &[T],
    cv: Option<&dyn SpatialSplitter<T>>,
    mut scorer: S,
) -> Result<Vec<T>, SpacvError>
where
    T: Float,
    M: Model<T>,
    X: FeatureInput<T> + ?Sized,
    S: FnMut(&M, &FeatureMatrix<'_, T>, &[T]) -> T,
{
    Validator::validate_points(points)?;
    let m = features.as_feature_matrix()?;
    let n = points.len();
    Validator::validate_lengths(n, m.n_rows())?;
    Validator::validate_lengths(n, labels.len())?;

    let fallback = KFoldSplitter::default();
    let splitter: &dyn SpatialSplitter<T> = match cv {
        Some(s) => s,
        None => {
            log::debug!("no splitter supplied; using shuffled {}-fold", fallback.k);
            &fallback
        }
    };

    let mut scores = Vec::new();
    for (f, fold) in splitter.split(points)?.enumerate() {
        Validator::validate_fold(f, &fold, n)?;
        let train = fold.train_indices(n);
        if train.is_empty() {
            return Err(SpacvError::EmptyTrainingFold { fold: f });
        }

        let train_x = m.select_rows(&train);
        let train_y: Vec<T> = train.iter().map(|&i| labels[i]).collect();
        model.fit(&train_x, &train_y)?;

        let test_x = m.select_rows(&fold.test);
        let test_y: Vec<T> = fold.test.iter().map(|&i| labels[i]).collect();
        scores.push(scorer(&*model, &test_x, &test_y));
    }

    log::debug!("cross-validation scored {} folds", scores.len());
    Ok(scores)
}
