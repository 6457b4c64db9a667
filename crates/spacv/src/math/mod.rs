//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Distance metrics (Euclidean, great-circle)
//! - Descriptive statistics (standardisation, NaN-aware means, quantiles)
//! - Nearest-neighbour search
//!
//! These are reusable building blocks with no splitter-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Evaluation
//!   ↓
//! Layer 5: Splitters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Distance metrics.
pub mod distance;

/// Descriptive statistics.
pub mod stats;

/// Nearest-neighbour index.
pub mod neighbors;
