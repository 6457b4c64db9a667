//! Layer 5: Splitters
//!
//! # Purpose
//!
//! This layer turns a point set into a sequence of train/test folds:
//! - Grid-block splitting with buffered dead zones (HBLOCK)
//! - Buffered spatial leave-one-out (SLOO)
//! - Conventional shuffled k-fold (non-spatial fallback)
//!
//! Every splitter produces a finite, non-restartable iterator of [`Fold`]s.
//! Consumers drive it to completion or drop it; folds share no state.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Evaluation
//!   ↓
//! Layer 5: Splitters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SpacvError;
use crate::primitives::fold::Fold;
use crate::primitives::geometry::Point;

/// Grid-block splitter.
pub mod hblock;

/// Buffered leave-one-out splitter.
pub mod sloo;

/// Shuffled k-fold splitter.
pub mod kfold;

/// Boxed fold sequence returned through the [`SpatialSplitter`] seam.
pub type Folds<'a> = Box<dyn Iterator<Item = Fold> + 'a>;

/// A cross-validation splitter over a point set.
pub trait SpatialSplitter<T: Float> {
    /// Produce the folds for `points`; configuration and input errors surface here,
    /// before the first fold is emitted.
    fn split<'a>(&'a self, points: &'a [Point<T>]) -> Result<Folds<'a>, SpacvError>;
}
