#![cfg(feature = "dev")]
//! Tests for tiling and point-to-tile assignment.
//!
//! These tests verify the geometric algorithms behind HBLOCK for:
//! - Regular grids over the bounding box and their groupings
//! - Strict containment with nearest-centroid fallback
//! - Buffered membership around tiles and points
//!
//! ## Test Organization
//!
//! 1. **Grid** - Cell layout and grouping methods
//! 2. **Assignment** - Interior, boundary and outlying points
//! 3. **Buffer** - Dead-zone membership

use spacv::internals::algorithms::assignment::assign_points_to_tiles;
use spacv::internals::algorithms::buffer::points_within_buffer;
use spacv::internals::algorithms::grid::{
    Direction, GridBuilder, GridMethod, TileProvider, TileSpec,
};
use spacv::internals::primitives::errors::SpacvError;
use spacv::internals::primitives::geometry::{Point, Polygon, Region, Tile};

fn corners() -> Vec<Point<f64>> {
    vec![Point::new(0.0, 0.0), Point::new(3.0, 3.0)]
}

fn spec(method: GridMethod, direction: Direction) -> TileSpec {
    TileSpec {
        tiles_x: 3,
        tiles_y: 3,
        method,
        direction,
        n_groups: 3,
    }
}

fn tile_containing(tiles: &[Tile<f64>], p: Point<f64>) -> usize {
    tiles
        .iter()
        .find(|t| t.contains(&p))
        .map(|t| t.id)
        .unwrap_or(usize::MAX)
}

// ============================================================================
// Grid Tests
// ============================================================================

/// Test unique ids: row-major from the minimum corner.
#[test]
fn test_grid_unique_ids() {
    let tiles = GridBuilder::default()
        .construct_tiles(&corners(), &spec(GridMethod::Unique, Direction::Diagonal))
        .unwrap();
    assert_eq!(tiles.len(), 9);
    assert_eq!(tile_containing(&tiles, Point::new(0.5, 0.5)), 0);
    assert_eq!(tile_containing(&tiles, Point::new(2.5, 0.5)), 2);
    assert_eq!(tile_containing(&tiles, Point::new(0.5, 2.5)), 6);
    assert_eq!(tile_containing(&tiles, Point::new(2.5, 2.5)), 8);
}

/// Test diagonal grouping.
#[test]
fn test_grid_systematic_diagonal() {
    let tiles = GridBuilder::default()
        .construct_tiles(&corners(), &spec(GridMethod::Systematic, Direction::Diagonal))
        .unwrap();
    assert_eq!(tiles.len(), 3);
    for p in [(0.5, 0.5), (1.5, 1.5), (2.5, 2.5)] {
        assert_eq!(tile_containing(&tiles, Point::new(p.0, p.1)), 0);
    }
    assert_eq!(tile_containing(&tiles, Point::new(1.5, 0.5)), 1);
    assert_eq!(tile_containing(&tiles, Point::new(0.5, 1.5)), 2);
}

/// Test anti-diagonal grouping.
#[test]
fn test_grid_systematic_anti() {
    let tiles = GridBuilder::default()
        .construct_tiles(&corners(), &spec(GridMethod::Systematic, Direction::Anti))
        .unwrap();
    for p in [(0.5, 0.5), (2.5, 1.5), (1.5, 2.5)] {
        assert_eq!(tile_containing(&tiles, Point::new(p.0, p.1)), 0);
    }
    assert_eq!(tile_containing(&tiles, Point::new(1.5, 0.5)), 1);
    assert_eq!(tile_containing(&tiles, Point::new(0.5, 1.5)), 1);
}

/// Test that random ids stay in range and follow the seed.
#[test]
fn test_grid_random() {
    let s = TileSpec {
        tiles_x: 6,
        tiles_y: 6,
        method: GridMethod::Random,
        direction: Direction::Diagonal,
        n_groups: 4,
    };
    let a = GridBuilder::with_seed(5).construct_tiles(&corners(), &s).unwrap();
    let b = GridBuilder::with_seed(5).construct_tiles(&corners(), &s).unwrap();
    assert_eq!(a, b);
    assert!(a.iter().all(|t| t.id < 4));
    assert_eq!(a.iter().map(|t| t.parts.len()).sum::<usize>(), 36);
    assert!(a.windows(2).all(|w| w[0].id < w[1].id));
}

/// Test that the outer grid edge is exactly the bounding box.
#[test]
fn test_grid_covers_bounding_box() {
    let points = vec![Point::new(0.1, 0.2), Point::new(0.7, 0.9)];
    let s = TileSpec {
        tiles_x: 3,
        tiles_y: 7,
        ..TileSpec::default()
    };
    let tiles = GridBuilder::default().construct_tiles(&points, &s).unwrap();
    let last = &tiles[tiles.len() - 1].parts[0];
    let max_x = last.vertices().iter().fold(f64::MIN, |m, p| m.max(p.x));
    let max_y = last.vertices().iter().fold(f64::MIN, |m, p| m.max(p.y));
    assert_eq!(max_x, 0.7);
    assert_eq!(max_y, 0.9);
}

/// Test grid errors.
#[test]
fn test_grid_errors() {
    let s = TileSpec {
        tiles_x: 0,
        ..TileSpec::default()
    };
    assert_eq!(
        GridBuilder::default().construct_tiles(&corners(), &s).unwrap_err(),
        SpacvError::InvalidTileCount { x: 0, y: 5 }
    );
    assert_eq!(
        TileProvider::<f64>::construct_tiles(&GridBuilder::default(), &[], &TileSpec::default())
            .unwrap_err(),
        SpacvError::EmptyInput
    );
}

// ============================================================================
// Assignment Tests
// ============================================================================

/// Test interior, shared-edge and outlying points.
#[test]
fn test_assignment_fallbacks() {
    let tiles = vec![
        Tile::new(10, Polygon::rectangle(0.0, 0.0, 1.0, 1.0)),
        Tile::new(20, Polygon::rectangle(1.0, 0.0, 2.0, 1.0)),
    ];
    let points = vec![
        Point::new(0.5, 0.5),
        Point::new(1.5, 0.5),
        // Shared edge: equidistant centroids, first tile wins
        Point::new(1.0, 0.5),
        // Outside: nearest centroid
        Point::new(7.0, 0.5),
        Point::new(-3.0, 2.0),
    ];
    assert_eq!(
        assign_points_to_tiles(&points, &tiles).unwrap(),
        vec![10, 20, 10, 20, 10]
    );
}

/// Test that an edge shared by two parts of one tile belongs to that tile.
///
/// Tile 0 has a far-away third part, which pulls its centroid away from the
/// shared edge; the edge point must still not fall back to tile 1.
#[test]
fn test_assignment_shared_edge_within_tile() {
    let tiles = vec![
        Tile {
            id: 0,
            parts: vec![
                Polygon::rectangle(0.0, 0.0, 1.0, 1.0),
                Polygon::rectangle(1.0, 0.0, 2.0, 1.0),
                Polygon::rectangle(10.0, 0.0, 11.0, 1.0),
            ],
        },
        Tile::new(1, Polygon::rectangle(0.0, 1.0, 2.0, 2.0)),
    ];
    let points = vec![
        Point::new(1.0, 0.5),
        Point::new(1.0, 1.5),
        Point::new(10.5, 0.5),
    ];

    assert!(tiles[0].contains(&points[0]));
    assert!(!tiles[1].contains(&points[0]));
    assert_eq!(assign_points_to_tiles(&points, &tiles).unwrap(), vec![0, 1, 0]);
}

/// Test the edges between parts and the outer edge of a multi-part tile.
#[test]
fn test_tile_union_containment() {
    let tile = Tile {
        id: 0,
        parts: vec![
            Polygon::rectangle(0.0, 0.0, 1.0, 1.0),
            Polygon::rectangle(1.0, 0.0, 2.0, 1.0),
            Polygon::rectangle(0.0, 1.0, 1.0, 2.0),
            Polygon::rectangle(1.0, 1.0, 2.0, 2.0),
        ],
    };
    // Shared edge and the vertex shared by all four parts
    assert!(tile.contains(&Point::new(1.0, 0.25)));
    assert!(tile.contains(&Point::new(1.0, 1.0)));
    // Outer boundary stays outside
    assert!(!tile.contains(&Point::new(2.0, 1.0)));
    assert!(!tile.contains(&Point::new(0.0, 0.0)));

    // Parts touching only at a corner do not enclose that corner
    let diagonal = Tile {
        id: 1,
        parts: vec![
            Polygon::rectangle(0.0, 0.0, 1.0, 1.0),
            Polygon::rectangle(1.0, 1.0, 2.0, 2.0),
        ],
    };
    assert!(!diagonal.contains(&Point::new(1.0, 1.0)));
}

/// Test that a grid grouped into one tile owns its inner grid lines.
#[test]
fn test_grid_single_group_owns_inner_edges() {
    let s = TileSpec {
        n_groups: 1,
        ..spec(GridMethod::Systematic, Direction::Diagonal)
    };
    let tiles = GridBuilder::default().construct_tiles(&corners(), &s).unwrap();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].parts.len(), 9);

    for p in [Point::new(1.0, 1.5), Point::new(2.0, 2.0), Point::new(0.5, 1.0)] {
        assert_eq!(tile_containing(&tiles, p), 0);
    }
}

/// Test that an empty partition is rejected.
#[test]
fn test_assignment_empty_partition() {
    assert!(matches!(
        assign_points_to_tiles::<f64>(&[Point::new(0.0, 0.0)], &[]),
        Err(SpacvError::InvalidInput(_))
    ));
}

// ============================================================================
// Buffer Tests
// ============================================================================

/// Test the dead zone around a tile.
#[test]
fn test_buffer_around_tile() {
    let tile = Tile::new(0, Polygon::rectangle(0.0, 0.0, 1.0, 1.0));
    let points = vec![
        Point::new(0.5, 0.5),
        Point::new(1.5, 0.5),
        Point::new(2.5, 0.5),
        Point::new(1.5, 1.5),
    ];
    assert_eq!(points_within_buffer(&points, &tile, 0.8, &[0]), vec![1, 3]);
    assert_eq!(points_within_buffer(&points, &tile, 0.8, &[]), vec![0, 1, 3]);
}
