//! Planar geometry capability used by the splitters.
//!
//! ## Purpose
//!
//! This module defines the minimal geometry the splitting logic needs: points,
//! simple polygons, multi-part tiles, and a [`Region`] trait exposing strict
//! containment, distance-to-region and centroid. Any geometry backend that can
//! answer these three questions can drive the splitters.
//!
//! ## Design notes
//!
//! * **Exact buffers**: A point lies in the buffer of radius `r` around a region
//!   iff its distance to the region is `<= r` (Minkowski buffer, boundary inclusive).
//! * **Strict containment**: Points on a polygon edge are *not* contained; the
//!   assigner resolves them separately. For a multi-part tile, containment is
//!   the interior of the union, so an edge shared by two parts is inside.
//! * **Generics**: All types are generic over `Float`.
//!
//! ## Invariants
//!
//! * Polygons have at least three vertices; the ring is implicitly closed.
//! * `distance_to` is zero for points inside or on the boundary of a region.
//!
//! ## Non-goals
//!
//! * No holes, no self-intersection checks, no coordinate reference systems.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SpacvError;

// ============================================================================
// Point
// ============================================================================

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T> {
    /// Easting / longitude.
    pub x: T,
    /// Northing / latitude.
    pub y: T,
}

impl<T: Float> Point<T> {
    /// Create a point from its coordinates.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Planar Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point<T>) -> T {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Region capability
// ============================================================================

/// Geometry capability required by the splitters.
pub trait Region<T: Float> {
    /// Strict containment: `true` only for points in the interior.
    fn contains(&self, p: &Point<T>) -> bool;

    /// Distance from `p` to the region; zero inside or on the boundary.
    fn distance_to(&self, p: &Point<T>) -> T;

    /// Representative centre of the region.
    fn centroid(&self) -> Point<T>;

    /// Whether `p` falls inside the region grown outward by `radius`.
    fn buffer_covers(&self, p: &Point<T>, radius: T) -> bool {
        self.distance_to(p) <= radius
    }
}

impl<T: Float> Region<T> for Point<T> {
    fn contains(&self, _p: &Point<T>) -> bool {
        false
    }

    fn distance_to(&self, p: &Point<T>) -> T {
        self.distance(p)
    }

    fn centroid(&self) -> Point<T> {
        *self
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// A simple polygon given by its exterior ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<T> {
    ring: Vec<Point<T>>,
}

impl<T: Float> Polygon<T> {
    /// Create a polygon from its vertices (the closing vertex may be omitted).
    pub fn new(mut ring: Vec<Point<T>>) -> Result<Self, SpacvError> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(SpacvError::InvalidInput(format!(
                "polygon needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        if ring.iter().any(|p| !p.is_finite()) {
            return Err(SpacvError::InvalidNumericValue(
                "polygon vertex is not finite".to_string(),
            ));
        }
        Ok(Self { ring })
    }

    /// Axis-aligned rectangle spanning `[min_x, max_x] x [min_y, max_y]`.
    pub fn rectangle(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            ring: vec![
                Point::new(min_x, min_y),
                Point::new(max_x, min_y),
                Point::new(max_x, max_y),
                Point::new(min_x, max_y),
            ],
        }
    }

    /// Vertices of the exterior ring.
    pub fn vertices(&self) -> &[Point<T>] {
        &self.ring
    }

    /// Iterate over the ring's edges, including the closing edge.
    fn edges(&self) -> impl Iterator<Item = (Point<T>, Point<T>)> + '_ {
        let n = self.ring.len();
        (0..n).map(move |i| (self.ring[i], self.ring[(i + 1) % n]))
    }

    /// Signed shoelace area (positive for counter-clockwise rings).
    pub fn signed_area(&self) -> T {
        let two = T::one() + T::one();
        self.edges()
            .fold(T::zero(), |acc, (a, b)| acc + (a.x * b.y - b.x * a.y))
            / two
    }

    /// Absolute area.
    pub fn area(&self) -> T {
        self.signed_area().abs()
    }

    /// Whether `p` lies exactly on one of the ring's edges.
    pub fn on_boundary(&self, p: &Point<T>) -> bool {
        self.edges().any(|(a, b)| {
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            cross == T::zero()
                && p.x >= a.x.min(b.x)
                && p.x <= a.x.max(b.x)
                && p.y >= a.y.min(b.y)
                && p.y <= a.y.max(b.y)
        })
    }

    /// Even-odd ray casting; boundary points may land on either side.
    fn crossing_test(&self, p: &Point<T>) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_int = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_int {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Distance from `p` to the segment `[a, b]`.
fn segment_distance<T: Float>(p: &Point<T>, a: &Point<T>, b: &Point<T>) -> T {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 <= T::zero() {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2)
        .max(T::zero())
        .min(T::one());
    p.distance(&Point::new(a.x + t * dx, a.y + t * dy))
}

impl<T: Float> Region<T> for Polygon<T> {
    fn contains(&self, p: &Point<T>) -> bool {
        self.crossing_test(p) && !self.on_boundary(p)
    }

    fn distance_to(&self, p: &Point<T>) -> T {
        if self.crossing_test(p) || self.on_boundary(p) {
            return T::zero();
        }
        self.edges()
            .map(|(a, b)| segment_distance(p, &a, &b))
            .fold(T::infinity(), T::min)
    }

    fn centroid(&self) -> Point<T> {
        let area = self.signed_area();
        if area == T::zero() {
            return vertex_mean(&self.ring);
        }
        let six = T::from(6.0).unwrap_or_else(T::nan);
        let (cx, cy) = self.edges().fold((T::zero(), T::zero()), |(cx, cy), (a, b)| {
            let w = a.x * b.y - b.x * a.y;
            (cx + (a.x + b.x) * w, cy + (a.y + b.y) * w)
        });
        Point::new(cx / (six * area), cy / (six * area))
    }
}

fn vertex_mean<T: Float>(points: &[Point<T>]) -> Point<T> {
    let n = T::from(points.len().max(1)).unwrap_or_else(T::one);
    let (sx, sy) = points
        .iter()
        .fold((T::zero(), T::zero()), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

// ============================================================================
// Tile
// ============================================================================

/// One cell (possibly multi-part) of a spatial partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<T> {
    /// Stable identifier; tiles are emitted as folds in ascending id order.
    pub id: usize,
    /// Polygons making up the tile.
    pub parts: Vec<Polygon<T>>,
}

impl<T: Float> Tile<T> {
    /// Single-part tile.
    pub fn new(id: usize, polygon: Polygon<T>) -> Self {
        Self {
            id,
            parts: vec![polygon],
        }
    }
}

impl<T: Float> Tile<T> {
    /// Closed containment in at least one part.
    fn covers(&self, p: &Point<T>) -> bool {
        self.parts
            .iter()
            .any(|part| part.crossing_test(p) || part.on_boundary(p))
    }
}

impl<T: Float> Region<T> for Tile<T> {
    /// Interior of the union of the parts.
    ///
    /// A point on an edge shared by two parts of the same tile is inside the
    /// tile. Such points are confirmed by sampling a small ring around them.
    fn contains(&self, p: &Point<T>) -> bool {
        if self.parts.iter().any(|part| part.contains(p)) {
            return true;
        }
        let touching: Vec<&Polygon<T>> =
            self.parts.iter().filter(|part| part.on_boundary(p)).collect();
        if touching.len() < 2 {
            return false;
        }

        let extent = touching
            .iter()
            .flat_map(|part| part.ring.iter())
            .fold(T::zero(), |m, v| m.max((v.x - p.x).abs()).max((v.y - p.y).abs()));
        let eps = extent * T::epsilon().sqrt();
        let step = T::from(core::f64::consts::PI / 8.0).unwrap_or_else(T::nan);
        (0..8).all(|k| {
            let angle = step * T::from(2 * k + 1).unwrap_or_else(T::nan);
            self.covers(&Point::new(p.x + eps * angle.cos(), p.y + eps * angle.sin()))
        })
    }

    fn distance_to(&self, p: &Point<T>) -> T {
        self.parts
            .iter()
            .map(|part| part.distance_to(p))
            .fold(T::infinity(), T::min)
    }

    /// Area-weighted centroid of the parts.
    fn centroid(&self) -> Point<T> {
        let total = self
            .parts
            .iter()
            .fold(T::zero(), |acc, part| acc + part.area());
        if total == T::zero() {
            let centres: Vec<Point<T>> = self.parts.iter().map(|p| p.centroid()).collect();
            return vertex_mean(&centres);
        }
        let (sx, sy) = self.parts.iter().fold((T::zero(), T::zero()), |(sx, sy), part| {
            let c = part.centroid();
            let a = part.area();
            (sx + c.x * a, sy + c.y * a)
        });
        Point::new(sx / total, sy / total)
    }
}

// ============================================================================
// Bounding box
// ============================================================================

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<T> {
    /// Lower-left corner.
    pub min: Point<T>,
    /// Upper-right corner.
    pub max: Point<T>,
}

impl<T: Float> BoundingBox<T> {
    /// Bounds of a non-empty point set; `None` when empty.
    pub fn of(points: &[Point<T>]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some(Self { min, max })
    }

    /// Extent along x.
    pub fn width(&self) -> T {
        self.max.x - self.min.x
    }

    /// Extent along y.
    pub fn height(&self) -> T {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_points_are_not_contained() {
        let square = Polygon::rectangle(0.0, 0.0, 1.0, 1.0);
        assert!(square.contains(&Point::new(0.5, 0.5)));
        assert!(!square.contains(&Point::new(1.0, 0.5)));
        assert!(!square.contains(&Point::new(0.0, 0.0)));
        assert_eq!(square.distance_to(&Point::new(1.0, 0.5)), 0.0);
    }

    #[test]
    fn distance_outside_rectangle() {
        let square = Polygon::rectangle(0.0, 0.0, 1.0, 1.0);
        assert!((square.distance_to(&Point::new(2.0, 0.5)) - 1.0).abs() < 1e-12);
        assert!((square.distance_to(&Point::new(4.0, 5.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_multi_part_tile() {
        let tile = Tile {
            id: 0,
            parts: vec![
                Polygon::rectangle(0.0, 0.0, 1.0, 1.0),
                Polygon::rectangle(2.0, 0.0, 3.0, 1.0),
            ],
        };
        let c = tile.centroid();
        assert!((c.x - 1.5).abs() < 1e-12);
        assert!((c.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn closing_vertex_is_dropped() {
        let p = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(p.vertices().len(), 3);
        assert!((p.area() - 0.5).abs() < 1e-12);
    }
}
