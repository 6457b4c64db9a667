//! Bounded worker pool for independent per-task computations.
//!
//! ## Purpose
//!
//! Fans out side-effect-free tasks (one per covariate in the variogram
//! estimator) to a fixed-size pool and joins every result before returning.
//!
//! ## Design notes
//!
//! * **Parallelism**: Uses a dedicated `rayon` thread pool when the `parallel`
//!   feature is enabled; otherwise tasks run sequentially.
//! * **Ordering**: Results are returned in submission order.
//! * **Failure**: The first failing task fails the whole call; no partial results.
//!
//! ## Non-goals
//!
//! * No cancellation, no shared mutable state between tasks.

// Feature-gated imports
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::primitives::errors::SpacvError;

/// Fixed-size pool executing independent tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskExecutor {
    /// Worker count; `1` runs inline, `0` uses every available core.
    pub workers: usize,
}

impl Default for TaskExecutor {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl TaskExecutor {
    /// Executor with the given worker count.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Run `f` on every task and collect the results in submission order.
    pub fn run<I, R, F>(&self, tasks: Vec<I>, f: F) -> Result<Vec<R>, SpacvError>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R, SpacvError> + Send + Sync,
    {
        if self.workers == 1 || tasks.len() <= 1 {
            return tasks.into_iter().map(f).collect();
        }
        self.run_pool(tasks, f)
    }

    #[cfg(feature = "parallel")]
    fn run_pool<I, R, F>(&self, tasks: Vec<I>, f: F) -> Result<Vec<R>, SpacvError>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R, SpacvError> + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| SpacvError::WorkerPool(e.to_string()))?;
        log::debug!(
            "dispatching {} tasks to {} workers",
            tasks.len(),
            pool.current_num_threads()
        );
        pool.install(|| tasks.into_par_iter().map(&f).collect())
    }

    #[cfg(not(feature = "parallel"))]
    fn run_pool<I, R, F>(&self, tasks: Vec<I>, f: F) -> Result<Vec<R>, SpacvError>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R, SpacvError> + Send + Sync,
    {
        log::warn!(
            "{} workers requested but the `parallel` feature is disabled; running sequentially",
            self.workers
        );
        tasks.into_iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_keep_submission_order() {
        let out = TaskExecutor::new(4)
            .run((0..32).collect(), |i: usize| Ok(i * i))
            .unwrap();
        assert_eq!(out, (0..32).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn one_failure_fails_the_call() {
        let err = TaskExecutor::new(3)
            .run((0..8).collect(), |i: usize| {
                if i == 5 {
                    Err(SpacvError::Model("boom".to_string()))
                } else {
                    Ok(i)
                }
            })
            .unwrap_err();
        assert_eq!(err, SpacvError::Model("boom".to_string()));
    }
}
