//! Grid-block (HBLOCK) splitter with buffered dead zones.
//!
//! ## Purpose
//!
//! Partitions the study area into tiles and yields one fold per populated
//! tile: the tile's points are the test set, and (for a positive buffer
//! radius) every other point within `buffer_radius` of the tile is excluded
//! from training.
//!
//! ## Design notes
//!
//! * **Assignment first**: The full point-to-tile assignment is computed
//!   before the first fold is emitted; buffering happens lazily per fold.
//! * **Pluggable tiles**: Tiles come from any [`TileProvider`]; the default is
//!   the regular [`GridBuilder`].
//!
//! ## Invariants
//!
//! * Folds are emitted in ascending tile id order; tiles without points are skipped.
//! * Every point index is in exactly one fold's test set.
//! * With `buffer_radius == 0` the excluded set is always empty.
//! * The excluded set never intersects the fold's test set.

// External dependencies
use num_traits::Float;
use std::collections::BTreeMap;
use std::vec::IntoIter;

// Internal dependencies
use crate::algorithms::assignment::assign_points_to_tiles;
use crate::algorithms::buffer::points_within_buffer;
use crate::algorithms::grid::{Direction, GridBuilder, GridMethod, TileProvider, TileSpec};
use crate::engine::validator::Validator;
use crate::primitives::errors::SpacvError;
use crate::primitives::fold::Fold;
use crate::primitives::geometry::{Point, Tile};
use crate::splitters::{Folds, SpatialSplitter};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for the grid-block splitter.
#[derive(Debug, Clone)]
pub struct HBlockBuilder<T, P = GridBuilder> {
    /// Tiles along (x, y).
    pub tiles: Option<(usize, usize)>,

    /// Cell grouping method.
    pub method: Option<GridMethod>,

    /// Dead-zone radius around each test tile.
    pub buffer_radius: Option<T>,

    /// Diagonal orientation for systematic grouping.
    pub direction: Option<Direction>,

    /// Number of groups for systematic and random grouping.
    pub n_groups: Option<usize>,

    /// Source of the tile partition.
    pub provider: P,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for HBlockBuilder<T, GridBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> HBlockBuilder<T, GridBuilder> {
    /// Create a new builder with default settings (5x5 unique tiles, no buffer).
    pub fn new() -> Self {
        Self {
            tiles: None,
            method: None,
            buffer_radius: None,
            direction: None,
            n_groups: None,
            provider: GridBuilder::default(),
            duplicate_param: None,
        }
    }
}

impl<T: Float, P: TileProvider<T>> HBlockBuilder<T, P> {
    /// Set the number of tiles along x and y.
    pub fn tiles(mut self, tiles_x: usize, tiles_y: usize) -> Self {
        if self.tiles.is_some() {
            self.duplicate_param = Some("tiles");
        }
        self.tiles = Some((tiles_x, tiles_y));
        self
    }

    /// Set the cell grouping method.
    pub fn method(mut self, method: GridMethod) -> Self {
        if self.method.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method = Some(method);
        self
    }

    /// Set the dead-zone buffer radius (same units as the coordinates).
    pub fn buffer_radius(mut self, radius: T) -> Self {
        if self.buffer_radius.is_some() {
            self.duplicate_param = Some("buffer_radius");
        }
        self.buffer_radius = Some(radius);
        self
    }

    /// Set the diagonal orientation used by systematic grouping.
    pub fn direction(mut self, direction: Direction) -> Self {
        if self.direction.is_some() {
            self.duplicate_param = Some("direction");
        }
        self.direction = Some(direction);
        self
    }

    /// Set the number of groups for systematic and random grouping.
    pub fn n_groups(mut self, n_groups: usize) -> Self {
        if self.n_groups.is_some() {
            self.duplicate_param = Some("n_groups");
        }
        self.n_groups = Some(n_groups);
        self
    }

    /// Replace the tile provider.
    pub fn tile_provider<Q: TileProvider<T>>(self, provider: Q) -> HBlockBuilder<T, Q> {
        HBlockBuilder {
            tiles: self.tiles,
            method: self.method,
            buffer_radius: self.buffer_radius,
            direction: self.direction,
            n_groups: self.n_groups,
            provider,
            duplicate_param: self.duplicate_param,
        }
    }

    /// Validate the configuration and build the splitter.
    pub fn build(self) -> Result<HBlockSplitter<T, P>, SpacvError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = TileSpec::default();
        let (tiles_x, tiles_y) = self.tiles.unwrap_or((defaults.tiles_x, defaults.tiles_y));
        let n_groups = self.n_groups.unwrap_or(defaults.n_groups);
        let buffer_radius = self.buffer_radius.unwrap_or_else(T::zero);

        Validator::validate_tile_counts(tiles_x, tiles_y)?;
        Validator::validate_n_groups(n_groups)?;
        Validator::validate_buffer_radius(buffer_radius)?;

        Ok(HBlockSplitter {
            spec: TileSpec {
                tiles_x,
                tiles_y,
                method: self.method.unwrap_or(defaults.method),
                direction: self.direction.unwrap_or(defaults.direction),
                n_groups,
            },
            buffer_radius,
            provider: self.provider,
        })
    }
}

// ============================================================================
// Splitter
// ============================================================================

/// Grid-block splitter.
#[derive(Debug, Clone)]
pub struct HBlockSplitter<T, P = GridBuilder> {
    spec: TileSpec,
    buffer_radius: T,
    provider: P,
}

impl<T: Float, P: TileProvider<T>> HBlockSplitter<T, P> {
    /// Tiling parameters handed to the provider.
    pub fn spec(&self) -> &TileSpec {
        &self.spec
    }

    /// Dead-zone buffer radius.
    pub fn buffer_radius(&self) -> T {
        self.buffer_radius
    }

    /// Build tiles, assign every point, and return the lazy fold sequence.
    pub fn iterate_folds<'a>(
        &self,
        points: &'a [Point<T>],
    ) -> Result<HBlockFolds<'a, T>, SpacvError> {
        Validator::validate_points(points)?;

        let mut tiles = self.provider.construct_tiles(points, &self.spec)?;
        tiles.sort_by_key(|t| t.id);
        if let Some(w) = tiles.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(SpacvError::InvalidInput(format!(
                "tile id {} is not unique",
                w[0].id
            )));
        }

        let ids = assign_points_to_tiles(points, &tiles)?;
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, id) in ids.into_iter().enumerate() {
            members.entry(id).or_default().push(i);
        }
        if members.len() == 1 {
            log::warn!(
                "all {} points fall in a single tile; HBLOCK yields one fold with no training data",
                points.len()
            );
        }
        log::debug!(
            "{} of {} tiles hold points",
            members.len(),
            tiles.len()
        );

        let pending: Vec<(Tile<T>, Vec<usize>)> = tiles
            .into_iter()
            .map(|t| {
                let test = members.remove(&t.id).unwrap_or_default();
                (t, test)
            })
            .collect();

        Ok(HBlockFolds {
            points,
            pending: pending.into_iter(),
            buffer_radius: self.buffer_radius,
        })
    }
}

impl<T: Float, P: TileProvider<T>> SpatialSplitter<T> for HBlockSplitter<T, P> {
    fn split<'a>(&'a self, points: &'a [Point<T>]) -> Result<Folds<'a>, SpacvError> {
        Ok(Box::new(self.iterate_folds(points)?))
    }
}

// ============================================================================
// Fold iterator
// ============================================================================

/// Lazy HBLOCK fold sequence, one fold per populated tile.
#[derive(Debug)]
pub struct HBlockFolds<'a, T> {
    points: &'a [Point<T>],
    pending: IntoIter<(Tile<T>, Vec<usize>)>,
    buffer_radius: T,
}

impl<T: Float> Iterator for HBlockFolds<'_, T> {
    type Item = Fold;

    fn next(&mut self) -> Option<Fold> {
        for (tile, test) in self.pending.by_ref() {
            if test.is_empty() {
                continue;
            }
            let exclude = if self.buffer_radius > T::zero() {
                points_within_buffer(self.points, &tile, self.buffer_radius, &test)
            } else {
                Vec::new()
            };
            return Some(Fold::new(test, exclude));
        }
        None
    }
}
