//! Error types for spatial cross-validation operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while building
//! splitters, assigning points to tiles, estimating variograms and scoring
//! the area of applicability.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Duplicate builder parameters are recorded and reported by `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Configuration errors**: Invalid parameters caught before any computation.
//! 2. **Input errors**: Empty inputs, mismatched lengths, non-finite values.
//! 3. **Numeric fit failures**: Non-converging variogram fits.
//! 4. **Collaborator failures**: Errors reported by a model or the worker pool.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * Degenerate-input situations with a defined fallback are logged, not raised.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for spatial cross-validation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SpacvError {
    /// Input arrays are empty.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Fewer instances than the operation requires.
    TooFewInstances {
        /// Number of instances provided.
        got: usize,
        /// Minimum required instances.
        min: usize,
    },

    /// Two inputs that must agree in length do not.
    MismatchedInputs {
        /// Expected number of elements.
        expected: usize,
        /// Number of elements provided.
        got: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Buffer radius must be finite and non-negative.
    InvalidBufferRadius(f64),

    /// A buffered leave-one-out splitter was built without a buffer radius.
    MissingBufferRadius,

    /// Tile counts along each axis must be at least 1.
    InvalidTileCount {
        /// Tiles along the x axis.
        x: usize,
        /// Tiles along the y axis.
        y: usize,
    },

    /// Number of tile groups must be at least 1.
    InvalidGroupCount(usize),

    /// Quantile threshold must lie in [0, 1].
    InvalidQuantile(f64),

    /// Lag bandwidth must be finite and non-negative.
    InvalidBandwidth(f64),

    /// Lag distances are empty, non-finite or negative.
    InvalidLags(String),

    /// Unrecognised name for a selector (metric, grid method, direction).
    UnknownOption {
        /// Kind of selector.
        kind: &'static str,
        /// The name that was not recognised.
        value: String,
    },

    /// Fold membership is not a valid partition of the training indices.
    InvalidFolds(String),

    /// The selected distance metric cannot be used with this input.
    UnsupportedMetric {
        /// Name of the metric.
        metric: &'static str,
        /// Why it cannot be used.
        reason: String,
    },

    /// A fold left no instances to train on after removing test and excluded points.
    EmptyTrainingFold {
        /// Position of the fold in emission order.
        fold: usize,
    },

    /// Nonlinear least-squares fit of the variogram model did not converge.
    FitFailed {
        /// Iterations performed before giving up.
        iterations: usize,
        /// Description of the failure.
        reason: String,
    },

    /// The model collaborator reported a failure during `fit`.
    Model(String),

    /// The worker pool could not be created.
    WorkerPool(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SpacvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::TooFewInstances { got, min } => {
                write!(f, "Too few instances: got {got}, need at least {min}")
            }
            Self::MismatchedInputs { expected, got } => {
                write!(f, "Length mismatch: expected {expected} elements, got {got}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidBufferRadius(r) => {
                write!(f, "Invalid buffer_radius: {r} (must be >= 0 and finite)")
            }
            Self::MissingBufferRadius => {
                write!(f, "buffer_radius is required for buffered leave-one-out")
            }
            Self::InvalidTileCount { x, y } => {
                write!(f, "Invalid tile counts: {x}x{y} (each axis must be >= 1)")
            }
            Self::InvalidGroupCount(n) => write!(f, "Invalid n_groups: {n} (must be >= 1)"),
            Self::InvalidQuantile(q) => {
                write!(f, "Invalid quantile: {q} (must be >= 0 and <= 1)")
            }
            Self::InvalidBandwidth(bw) => {
                write!(f, "Invalid bandwidth: {bw} (must be >= 0 and finite)")
            }
            Self::InvalidLags(msg) => write!(f, "Invalid lags: {msg}"),
            Self::UnknownOption { kind, value } => write!(f, "Unknown {kind}: '{value}'"),
            Self::InvalidFolds(msg) => write!(f, "Invalid fold indices: {msg}"),
            Self::UnsupportedMetric { metric, reason } => {
                write!(f, "Metric '{metric}' cannot be used here: {reason}")
            }
            Self::EmptyTrainingFold { fold } => {
                write!(f, "Fold {fold} has no training instances left")
            }
            Self::FitFailed { iterations, reason } => {
                write!(f, "Variogram fit failed after {iterations} iterations: {reason}")
            }
            Self::Model(msg) => write!(f, "Model failure: {msg}"),
            Self::WorkerPool(msg) => write!(f, "Worker pool failure: {msg}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for SpacvError {}
