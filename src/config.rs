//! Configuration for building grouping indexes

use serde::{Deserialize, Serialize};

/// Row count above which the index sort is handed to rayon by default
pub const DEFAULT_MIN_PARALLEL_ROWS: usize = 50_000;

/// Configuration for [`GroupIndex`](crate::index::GroupIndex) construction
///
/// The sort strategy never changes the resulting index: both paths use a
/// stable sort, so the permutation is identical either way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Whether the sort may run on the rayon thread pool
    pub parallel: bool,
    /// Minimum number of rows before parallel sorting kicks in
    pub min_parallel_rows: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_rows: DEFAULT_MIN_PARALLEL_ROWS,
        }
    }
}

impl GroupingConfig {
    /// Create a new grouping configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that always sorts on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Enable or disable parallel sorting
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the minimum row count for parallel sorting
    pub fn with_min_parallel_rows(mut self, min_parallel_rows: usize) -> Self {
        self.min_parallel_rows = min_parallel_rows;
        self
    }

    /// Determine if parallelization should be used for `rows` input rows
    pub fn should_parallelize(&self, rows: usize) -> bool {
        self.parallel && rows >= self.min_parallel_rows && rayon::current_num_threads() > 1
    }
}
