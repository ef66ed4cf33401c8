//! In-place quicksort with a sequential and a multi-threaded entry point.
//!
//! Both paths partition around the last element of a range (Lomuto). The
//! parallel path shares sub-ranges of at least `gate` elements between a
//! fixed number of worker threads through a LIFO task queue, and finishes
//! shorter ones sequentially on the worker that produced them.
//!
//! ```
//! use quick_sort::{SortConfig, parallel_sort_with, sequential_sort};
//!
//! let mut a = vec![5, 3, 8, 3, 1, 9, 2];
//! let mut b = a.clone();
//!
//! let config = SortConfig::builder().workers(2).gate(2).build().unwrap();
//! parallel_sort_with(&mut a, &config);
//! sequential_sort(&mut b);
//!
//! assert_eq!(a, [1, 2, 3, 3, 5, 8, 9]);
//! assert_eq!(a, b);
//! ```

mod config;
mod parallel;
mod partition;
mod report;
mod sequential;

pub use config::{
    ConfigError, DEFAULT_GATE, DEFAULT_IDLE_TIMEOUT, DEFAULT_WORKERS, ParallelSorter, SortConfig,
    SortConfigBuilder,
};
pub use partition::partition;
pub use report::{SortPath, SortReport, WorkerReport};

/// Sorts `data` in place on the calling thread.
pub fn sequential_sort<T: Ord>(data: &mut [T]) {
    sequential::sort(data);
}

/// Sorts `data` in place with the default configuration.
pub fn parallel_sort<T: Ord + Send>(data: &mut [T]) -> SortReport {
    parallel::sort(data, &SortConfig::default())
}

/// Sorts `data` in place with `config.workers()` threads, or on the calling
/// thread when `data` is shorter than `config.gate()`.
///
/// Returns once every worker has been joined. A panic raised by `T::cmp` on
/// a worker is re-raised here.
pub fn parallel_sort_with<T: Ord + Send>(data: &mut [T], config: &SortConfig) -> SortReport {
    parallel::sort(data, config)
}
