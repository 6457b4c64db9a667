//! Train/test fold produced by the splitters.
//!
//! ## Invariants
//!
//! * `test` and `exclude` are disjoint.
//! * Indices refer to positions in the point set the splitter was run on.

/// One train/test split with an optional dead zone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fold {
    /// Indices held out for testing.
    pub test: Vec<usize>,
    /// Indices removed from training because they fall in the dead zone.
    pub exclude: Vec<usize>,
}

impl Fold {
    /// Create a fold from its test and excluded indices.
    pub fn new(test: Vec<usize>, exclude: Vec<usize>) -> Self {
        Self { test, exclude }
    }

    /// Effective training indices: `0..n` minus test minus excluded, ascending.
    pub fn train_indices(&self, n: usize) -> Vec<usize> {
        let mut keep = vec![true; n];
        for &i in self.test.iter().chain(self.exclude.iter()) {
            if i < n {
                keep[i] = false;
            }
        }
        keep.iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect()
    }
}
