//! Layer 6: Evaluation
//!
//! # Purpose
//!
//! This layer turns folds and features into scores and summaries:
//! - Cross-validation driver over any spatial splitter
//! - Dissimilarity index and area of applicability (AOA)
//! - Empirical variogram, spherical fit and block-size suggestion
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Evaluation ← You are here
//!   ↓
//! Layer 5: Splitters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Cross-validation driver.
pub mod cv;

/// Area of applicability.
pub mod aoa;

/// Variogram estimator.
pub mod variogram;
