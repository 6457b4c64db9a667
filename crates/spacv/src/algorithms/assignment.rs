//! Point-to-tile assignment.
//!
//! ## Purpose
//!
//! Maps every point to exactly one tile id. A strict containment test runs
//! first; points it cannot place (typically those lying on an edge shared by
//! two tiles, or on the outer boundary of the grid) are assigned to the tile
//! whose centroid is nearest in the planar projection.
//!
//! ## Invariants
//!
//! * Output length equals the number of points; no point is left unassigned.
//! * With overlapping tiles, the first containing tile in partition order wins.
//! * Nearest-centroid ties go to the tile listed first in the partition.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceMetric;
use crate::math::neighbors::NearestIndex;
use crate::primitives::errors::SpacvError;
use crate::primitives::geometry::{Point, Region, Tile};

/// Assign each point to a tile id.
pub fn assign_points_to_tiles<T: Float>(
    points: &[Point<T>],
    tiles: &[Tile<T>],
) -> Result<Vec<usize>, SpacvError> {
    if tiles.is_empty() {
        return Err(SpacvError::InvalidInput(
            "tile partition is empty".to_string(),
        ));
    }

    let mut assigned: Vec<Option<usize>> = points
        .iter()
        .map(|p| tiles.iter().find(|t| t.contains(p)).map(|t| t.id))
        .collect();

    let unresolved = assigned.iter().filter(|a| a.is_none()).count();
    if unresolved > 0 {
        let centroids: Vec<T> = tiles
            .iter()
            .flat_map(|t| {
                let c = t.centroid();
                [c.x, c.y]
            })
            .collect();
        let index = NearestIndex::new(&centroids, 2, DistanceMetric::Euclidean);

        for (slot, p) in assigned.iter_mut().zip(points.iter()) {
            if slot.is_none() {
                *slot = index.nearest(&[p.x, p.y]).map(|(row, _)| tiles[row].id);
            }
        }
        log::debug!(
            "{} of {} points resolved by nearest tile centroid",
            unresolved,
            points.len()
        );
    }

    assigned
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            a.ok_or_else(|| {
                SpacvError::InvalidNumericValue(format!("point {i} could not be assigned to a tile"))
            })
        })
        .collect()
}
