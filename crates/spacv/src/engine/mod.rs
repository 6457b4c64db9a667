//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer handles validation and execution control:
//! - Fail-fast validation of configuration and inputs
//! - Bounded worker pool for independent tasks
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
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input validation.
pub mod validator;

/// Worker pool execution.
pub mod executor;
