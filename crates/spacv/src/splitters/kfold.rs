//! Shuffled k-fold splitter without spatial awareness.
//!
//! Used by the cross-validation driver when no spatial splitter is supplied.
//! Indices are optionally shuffled and cut into `k` folds. The first `n % k`
//! folds hold `n / k + 1` points and the rest `n / k`; nothing is excluded.

// External dependencies
use num_traits::Float;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::SpacvError;
use crate::primitives::fold::Fold;
use crate::primitives::geometry::Point;
use crate::splitters::{Folds, SpatialSplitter};

/// Shuffled k-fold splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFoldSplitter {
    /// Number of folds.
    pub k: usize,
    /// Shuffle indices before cutting folds.
    pub shuffle: bool,
    /// Shuffle seed; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for KFoldSplitter {
    /// Five shuffled folds with seed 0.
    fn default() -> Self {
        Self {
            k: 5,
            shuffle: true,
            seed: Some(0),
        }
    }
}

impl KFoldSplitter {
    /// `k` shuffled folds with a fixed seed.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Set the shuffle seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable shuffling.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Folds over `n` instances.
    pub fn folds(&self, n: usize) -> Result<impl Iterator<Item = Fold>, SpacvError> {
        Validator::validate_kfold(self.k, n)?;

        let mut indices: Vec<usize> = (0..n).collect();
        if self.shuffle {
            let mut rng = match self.seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            indices.shuffle(&mut rng);
        }

        let k = self.k;
        let (base, extra) = (n / k, n % k);
        Ok((0..k).map(move |fold| {
            let start = fold * base + fold.min(extra);
            let end = start + base + usize::from(fold < extra);
            let mut test = indices[start..end].to_vec();
            test.sort_unstable();
            Fold::new(test, Vec::new())
        }))
    }
}

impl<T: Float> SpatialSplitter<T> for KFoldSplitter {
    fn split<'a>(&'a self, points: &'a [Point<T>]) -> Result<Folds<'a>, SpacvError> {
        Ok(Box::new(self.folds(points.len())?))
    }
}
