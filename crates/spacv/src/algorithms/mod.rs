//! Layer 3: Algorithms
//!
//! This layer implements the geometric and numerical building blocks of
//! spatial cross-validation: tiling the study area, assigning points to
//! tiles, collecting points inside a buffered region, and fitting the
//! spherical variogram model. It is orchestrated by the splitters and
//! evaluation layers.

// Regular grid tiling and the tile provider seam.
pub mod grid;

// Point-to-tile assignment with nearest-centroid fallback.
pub mod assignment;

// Buffered region membership shared by HBLOCK and SLOO.
pub mod buffer;

// Spherical variogram model and bounded least-squares fit.
pub mod spherical;
