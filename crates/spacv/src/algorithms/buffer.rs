//! Buffer-and-exclude primitive shared by the buffered splitters.
//!
//! Given a reference region and a radius, collects the indices of all points
//! inside the region grown outward by the radius, minus a caller-supplied set
//! (the fold's own test indices).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::geometry::{Point, Region};

/// Ascending indices of points within `radius` of `region`, skipping `exclude`.
pub fn points_within_buffer<T, R>(
    points: &[Point<T>],
    region: &R,
    radius: T,
    exclude: &[usize],
) -> Vec<usize>
where
    T: Float,
    R: Region<T> + ?Sized,
{
    let mut skip = vec![false; points.len()];
    for &i in exclude {
        if let Some(s) = skip.get_mut(i) {
            *s = true;
        }
    }

    points
        .iter()
        .enumerate()
        .filter(|&(i, p)| !skip[i] && region.buffer_covers(p, radius))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::geometry::Polygon;

    #[test]
    fn circular_buffer_around_point() {
        let pts: Vec<Point<f64>> = (0..4).map(|i| Point::new(i as f64, 0.0)).collect();
        assert_eq!(points_within_buffer(&pts, &pts[1], 1.5, &[1]), vec![0, 2]);
    }

    #[test]
    fn polygon_buffer_is_boundary_inclusive() {
        let pts = vec![
            Point::new(0.5, 0.5),
            Point::new(1.5, 0.5),
            Point::new(2.0, 0.5),
            Point::new(2.5, 0.5),
        ];
        let square = Polygon::rectangle(0.0, 0.0, 1.0, 1.0);
        assert_eq!(points_within_buffer(&pts, &square, 1.0, &[0]), vec![1, 2]);
    }
}
