//! Buffered spatial leave-one-out (SLOO) splitter.
//!
//! ## Purpose
//!
//! Yields one fold per point: the point is the test set, and every other
//! point within `buffer_radius` of it is excluded from training.
//!
//! ## Invariants
//!
//! * Exactly `n` folds for `n` points; no fold is skipped.
//! * Without shuffling, fold `i` tests the singleton `{i}`.
//! * A fold's own test point never appears in its excluded set.
//! * Shuffling changes only the emission order, never a fold's content.

// External dependencies
use num_traits::Float;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::vec::IntoIter;

// Internal dependencies
use crate::algorithms::buffer::points_within_buffer;
use crate::engine::validator::Validator;
use crate::primitives::errors::SpacvError;
use crate::primitives::fold::Fold;
use crate::primitives::geometry::Point;
use crate::splitters::{Folds, SpatialSplitter};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the buffered leave-one-out splitter.
#[derive(Debug, Clone)]
pub struct SLooBuilder<T> {
    /// Radius of the circular dead zone around each test point (required).
    pub buffer_radius: Option<T>,

    /// Shuffle the processing order.
    pub shuffle: Option<bool>,

    /// Seed for the shuffle; `None` draws from system entropy.
    pub seed: Option<u64>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SLooBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SLooBuilder<T> {
    /// Create a new builder; a buffer radius must be set before `build()`.
    pub fn new() -> Self {
        Self {
            buffer_radius: None,
            shuffle: None,
            seed: None,
            duplicate_param: None,
        }
    }

    /// Set the dead-zone radius.
    pub fn buffer_radius(mut self, radius: T) -> Self {
        if self.buffer_radius.is_some() {
            self.duplicate_param = Some("buffer_radius");
        }
        self.buffer_radius = Some(radius);
        self
    }

    /// Enable or disable shuffling of the fold emission order.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        if self.shuffle.is_some() {
            self.duplicate_param = Some("shuffle");
        }
        self.shuffle = Some(shuffle);
        self
    }

    /// Seed the shuffle for reproducible emission order.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and build the splitter.
    pub fn build(self) -> Result<SLooSplitter<T>, SpacvError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        let buffer_radius = self.buffer_radius.ok_or(SpacvError::MissingBufferRadius)?;
        Validator::validate_buffer_radius(buffer_radius)?;

        Ok(SLooSplitter {
            buffer_radius,
            shuffle: self.shuffle.unwrap_or(false),
            seed: self.seed,
        })
    }
}

// ============================================================================
// Splitter
// ============================================================================

/// Buffered leave-one-out splitter.
#[derive(Debug, Clone)]
pub struct SLooSplitter<T> {
    buffer_radius: T,
    shuffle: bool,
    seed: Option<u64>,
}

impl<T: Float> SLooSplitter<T> {
    /// Dead-zone radius.
    pub fn buffer_radius(&self) -> T {
        self.buffer_radius
    }

    /// Return the lazy fold sequence over `points`.
    pub fn iterate_folds<'a>(&self, points: &'a [Point<T>]) -> Result<SLooFolds<'a, T>, SpacvError> {
        Validator::validate_points(points)?;

        let mut order: Vec<usize> = (0..points.len()).collect();
        if self.shuffle {
            let mut rng = match self.seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            order.shuffle(&mut rng);
        }

        Ok(SLooFolds {
            points,
            order: order.into_iter(),
            buffer_radius: self.buffer_radius,
        })
    }
}

impl<T: Float> SpatialSplitter<T> for SLooSplitter<T> {
    fn split<'a>(&'a self, points: &'a [Point<T>]) -> Result<Folds<'a>, SpacvError> {
        Ok(Box::new(self.iterate_folds(points)?))
    }
}

// ============================================================================
// Fold iterator
// ============================================================================

/// Lazy SLOO fold sequence, one fold per point.
#[derive(Debug)]
pub struct SLooFolds<'a, T> {
    points: &'a [Point<T>],
    order: IntoIter<usize>,
    buffer_radius: T,
}

impl<T: Float> Iterator for SLooFolds<'_, T> {
    type Item = Fold;

    fn next(&mut self) -> Option<Fold> {
        let i = self.order.next()?;
        let exclude = points_within_buffer(self.points, &self.points[i], self.buffer_radius, &[i]);
        Some(Fold::new(vec![i], exclude))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T: Float> ExactSizeIterator for SLooFolds<'_, T> {}
