//! Nearest-neighbour index over row-major coordinates.
//!
//! ## Purpose
//!
//! A static k-d tree answering single nearest-neighbour queries, used for
//! nearest-centroid tile assignment and for the dissimilarity of new points
//! to the training set. Non-Euclidean metrics fall back to an exhaustive scan.
//!
//! ## Invariants
//!
//! * Queries are deterministic: on equal distances the lowest row index wins,
//!   independent of tree shape.
//! * The index owns a copy of its rows; it never changes after construction.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceMetric;

#[derive(Debug, Clone)]
struct Node {
    row: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Nearest-neighbour index over `n` rows of `dims` coordinates.
#[derive(Debug, Clone)]
pub struct NearestIndex<T> {
    data: Vec<T>,
    dims: usize,
    metric: DistanceMetric,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl<T: Float> NearestIndex<T> {
    /// Build an index over the flat row-major buffer `data`.
    pub fn new(data: &[T], dims: usize, metric: DistanceMetric) -> Self {
        let n = if dims == 0 { 0 } else { data.len() / dims };
        let mut index = Self {
            data: data.to_vec(),
            dims,
            metric,
            nodes: Vec::with_capacity(n),
            root: None,
        };
        if metric == DistanceMetric::Euclidean && n > 0 {
            let mut rows: Vec<usize> = (0..n).collect();
            index.root = index.build(&mut rows, 0);
        }
        index
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        if self.dims == 0 {
            0
        } else {
            self.data.len() / self.dims
        }
    }

    /// Whether the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.dims..(i + 1) * self.dims]
    }

    fn build(&mut self, rows: &mut [usize], depth: usize) -> Option<usize> {
        if rows.is_empty() {
            return None;
        }
        let axis = depth % self.dims;
        let mid = rows.len() / 2;
        {
            let data = &self.data;
            let dims = self.dims;
            rows.select_nth_unstable_by(mid, |&a, &b| {
                data[a * dims + axis]
                    .partial_cmp(&data[b * dims + axis])
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            });
        }
        let row = rows[mid];
        let (lower, rest) = rows.split_at_mut(mid);
        let upper = &mut rest[1..];

        let slot = self.nodes.len();
        self.nodes.push(Node {
            row,
            axis,
            left: None,
            right: None,
        });
        let left = self.build(lower, depth + 1);
        let right = self.build(upper, depth + 1);
        self.nodes[slot].left = left;
        self.nodes[slot].right = right;
        Some(slot)
    }

    /// Nearest row to `query`, returned as `(row, distance)`.
    pub fn nearest(&self, query: &[T]) -> Option<(usize, T)> {
        if self.is_empty() {
            return None;
        }
        match self.metric {
            DistanceMetric::Euclidean => {
                let mut best = (usize::MAX, T::infinity());
                self.search(self.root, query, &mut best);
                Some((best.0, best.1.sqrt()))
            }
            metric => (0..self.len())
                .map(|i| (i, metric.features(self.row(i), query)))
                .fold(None, |acc: Option<(usize, T)>, cand| match acc {
                    Some(b) if b.1 <= cand.1 => Some(b),
                    _ => Some(cand),
                }),
        }
    }

    fn search(&self, node: Option<usize>, query: &[T], best: &mut (usize, T)) {
        let Some(slot) = node else {
            return;
        };
        let node = &self.nodes[slot];
        let row = self.row(node.row);
        let d2 = row
            .iter()
            .zip(query.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b));
        if d2 < best.1 || (d2 == best.1 && node.row < best.0) {
            *best = (node.row, d2);
        }

        let diff = query[node.axis] - row[node.axis];
        let (near, far) = if diff < T::zero() {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.search(near, query, best);
        if diff * diff <= best.1 {
            self.search(far, query, best);
        }
    }
}
