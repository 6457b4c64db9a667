//! High-level API for spatial cross-validation.
//!
//! ## Purpose
//!
//! This module is the user-facing surface of the crate. It gathers the fluent
//! builders for every splitter and estimator, the value types they exchange,
//! and the one-call free functions, so callers never reach into the layers.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Every builder starts from `::new()` with sensible defaults.
//! * **Validated**: Parameters are validated when `.build()` is called;
//!   setting a parameter twice is reported there as well.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//! * **Plain outputs**: Folds are index vectors, scores and masks are plain
//!   vectors; no internal type is needed to consume a result.
//!
//! ## Key concepts
//!
//! * **Splitters**: [`HBlockBuilder`] (grid blocks), [`SLooBuilder`] (buffered
//!   leave-one-out) and [`KFoldSplitter`] all implement [`SpatialSplitter`].
//! * **Estimators**: [`AoaBuilder`] for the area of applicability and
//!   [`VariogramBuilder`] for semivariance and block-size suggestion.
//! * **Driver**: [`cross_val_score`] runs a [`Model`] through any splitter.
//!
//! ### Configuration Flow
//!
//! 1. Create a builder via `HBlock::new()`, `SLoo::new()`, `Aoa::new()` or
//!    `Variogram::new()`.
//! 2. Chain configuration methods (`.tiles()`, `.buffer_radius()`, etc.).
//! 3. Call `.build()` and use the returned splitter or estimator.

// Publicly re-exported types
pub use crate::algorithms::assignment::assign_points_to_tiles;
pub use crate::algorithms::buffer::points_within_buffer;
pub use crate::algorithms::grid::{
    Direction, FixedTiles, GridBuilder, GridMethod, TileProvider, TileSpec,
};
pub use crate::algorithms::spherical::{fit_spherical, SphericalModel};
pub use crate::evaluation::aoa::{aoa, AoaBuilder, AoaEstimator, AoaResult};
pub use crate::evaluation::cv::{cross_val_score, Model};
pub use crate::evaluation::variogram::{
    fit_effective_range, semivariance_at_lags, suggest_block_size, BlockSizeSuggestion,
    VariogramBuilder, VariogramEstimator,
};
pub use crate::math::distance::{DistanceMetric, EARTH_RADIUS_M};
pub use crate::primitives::errors::SpacvError;
pub use crate::primitives::fold::Fold;
pub use crate::primitives::geometry::{BoundingBox, Point, Polygon, Region, Tile};
pub use crate::primitives::input::{FeatureInput, FeatureMatrix};
pub use crate::splitters::hblock::{HBlockBuilder, HBlockFolds, HBlockSplitter};
pub use crate::splitters::kfold::KFoldSplitter;
pub use crate::splitters::sloo::{SLooBuilder, SLooFolds, SLooSplitter};
pub use crate::splitters::{Folds, SpatialSplitter};

// External dependencies
use num_traits::Float;

/// Build points from parallel coordinate slices.
pub fn points_from_xy<T: Float>(x: &[T], y: &[T]) -> Result<Vec<Point<T>>, SpacvError> {
    if x.len() != y.len() {
        return Err(SpacvError::MismatchedInputs {
            expected: x.len(),
            got: y.len(),
        });
    }
    Ok(x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)).collect())
}
