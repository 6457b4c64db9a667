//! # spacv: Spatial Cross-Validation for Rust
//!
//! Spatially aware train/test splitting and applicability-domain estimation
//! for geographically referenced samples.
//!
//! ## What is spatial cross-validation?
//!
//! Neighbouring samples in space tend to be similar. A random train/test
//! split therefore leaks information from the training set into the test set
//! and makes a model look better than it is on genuinely new locations.
//! Spatial cross-validation holds out whole regions (or single points with a
//! surrounding dead zone) instead, so that the error estimate reflects
//! prediction at a distance.
//!
//! This crate provides:
//!
//! - **Grid-block splitting (HBLOCK)**: tiles over the study area, one fold per
//!   populated tile, with an optional buffer excluded from training.
//! - **Buffered leave-one-out (SLOO)**: one fold per point, excluding every
//!   point within a radius.
//! - **Cross-validation driver**: fits a model on every fold and collects scores.
//! - **Area of applicability (AOA)**: a dissimilarity index telling whether new
//!   observations resemble the training data.
//! - **Variogram estimator**: empirical semivariance, spherical model fit and
//!   a suggested block size.
//!
//! ## Quick Start
//!
//! ### Grid-block folds
//!
//! ```rust
//! use spacv::prelude::*;
//!
//! // A 5x5 lattice of sample locations
//! let points: Vec<Point<f64>> = (0..5)
//!     .flat_map(|i| (0..5).map(move |j| Point::new(i as f64, j as f64)))
//!     .collect();
//!
//! let splitter = HBlock::new()
//!     .tiles(5, 5)          // 5 x 5 grid over the bounding box
//!     .method(Unique)       // one fold per cell
//!     .buffer_radius(0.0)   // no dead zone
//!     .build()?;
//!
//! let folds: Vec<Fold> = splitter.iterate_folds(&points)?.collect();
//! assert_eq!(folds.len(), 25);
//! assert!(folds.iter().all(|f| f.test.len() == 1 && f.exclude.is_empty()));
//! # Result::<(), SpacvError>::Ok(())
//! ```
//!
//! ### Buffered leave-one-out
//!
//! ```rust
//! use spacv::prelude::*;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(2.0, 0.0),
//!     Point::new(3.0, 0.0),
//! ];
//!
//! let splitter = SLoo::new().buffer_radius(1.5).build()?;
//! let folds: Vec<Fold> = splitter.iterate_folds(&points)?.collect();
//!
//! assert_eq!(folds[1].test, vec![1]);
//! assert_eq!(folds[1].exclude, vec![0, 2]);
//! assert_eq!(folds[1].train_indices(points.len()), vec![3]);
//! # Result::<(), SpacvError>::Ok(())
//! ```
//!
//! ### Area of applicability
//!
//! ```rust
//! use spacv::prelude::*;
//!
//! let training = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0]];
//! let new_data = vec![vec![1.5]];
//!
//! let result = Aoa::new()
//!     .threshold(0.95)
//!     .build()?
//!     .compute(&new_data, &training)?;
//!
//! assert_eq!(result.dissimilarity.len(), 1);
//! assert!(result.dissimilarity[0] >= 0.0);
//! assert_eq!(result.mask[0] == 1, result.dissimilarity[0] <= result.threshold);
//! # Result::<(), SpacvError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every operation returns `Result<_, SpacvError>`. Configuration problems
//! (a missing buffer radius, a quantile outside `[0, 1]`, a parameter set
//! twice) are reported by `.build()`; data problems (non-finite coordinates,
//! mismatched lengths, too few instances) are reported before any work is done.
//!
//! ```rust
//! use spacv::prelude::*;
//!
//! match SLoo::<f64>::new().build() {
//!     Ok(_) => unreachable!(),
//!     Err(e) => assert_eq!(e, SpacvError::MissingBufferRadius),
//! }
//! ```
//!
//! ## Logging
//!
//! Degenerate but recoverable situations (an empty variogram lag bin, all
//! points in one tile, a zero-variance feature) are reported through the
//! [`log`](https://docs.rs/log) facade. Install any logger to see them.
//!
//! ## References
//!
//! - Roberts, D. R. et al. (2017). "Cross-validation strategies for data with
//!   temporal, spatial, hierarchical, or phylogenetic structure"
//! - Meyer, H. & Pebesma, E. (2021). "Predicting into unknown space? Estimating
//!   the area of applicability of spatial prediction models"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - distances, statistics and nearest-neighbour search.
mod math;

// Layer 3: Algorithms - tiling, assignment, buffering and model fitting.
mod algorithms;

// Layer 4: Engine - validation and execution control.
mod engine;

// Layer 5: Splitters - fold generation.
mod splitters;

// Layer 6: Evaluation - cross-validation, AOA and variograms.
mod evaluation;

// High-level fluent API for spatial cross-validation.
mod api;

// Standard spacv prelude.
pub mod prelude {
    pub use crate::api::{
        aoa, assign_points_to_tiles, cross_val_score, fit_effective_range, fit_spherical,
        points_from_xy, points_within_buffer, semivariance_at_lags, suggest_block_size,
        AoaBuilder as Aoa, AoaEstimator, AoaResult, BlockSizeSuggestion, BoundingBox,
        Direction::Anti,
        Direction::Diagonal,
        DistanceMetric::Euclidean,
        DistanceMetric::Haversine,
        FeatureInput, FeatureMatrix, FixedTiles, Fold, Folds, GridBuilder, HBlockFolds,
        HBlockSplitter, SLooFolds, SLooSplitter, VariogramEstimator, EARTH_RADIUS_M,
        GridMethod::Random,
        GridMethod::Systematic,
        GridMethod::Unique,
        HBlockBuilder as HBlock, KFoldSplitter as KFold, Model, Point, Polygon, Region,
        SLooBuilder as SLoo, SpacvError, SpatialSplitter, SphericalModel, Tile, TileProvider,
        TileSpec, VariogramBuilder as Variogram, Direction, DistanceMetric, GridMethod,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod splitters {
        pub use crate::splitters::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
