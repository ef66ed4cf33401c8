use std::time::Duration;

use crate::report::SortReport;
use crate::{parallel, sequential};

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_GATE: usize = 5000;
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be positive")]
    ZeroWorkers,
    #[error("idle timeout must be positive")]
    ZeroIdleTimeout,
}

/// Settings of one parallel sort run.
///
/// - `workers`: number of OS threads spawned per run.
/// - `gate`: minimum range length that is shared through the task queue;
///   shorter ranges are sorted sequentially by whoever produced them.
/// - `idle_timeout`: how long an idle worker waits on the queue before it
///   re-checks for quiescence. Very small values only cost wakeups; large
///   values do not delay shutdown because the last busy worker broadcasts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortConfig {
    workers: usize,
    gate: usize,
    idle_timeout: Duration,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            gate: DEFAULT_GATE,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl SortConfig {
    pub fn builder() -> SortConfigBuilder {
        SortConfigBuilder::default()
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[inline]
    pub fn gate(&self) -> usize {
        self.gate
    }

    #[inline]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

#[derive(Clone, Debug, Default)]
pub struct SortConfigBuilder {
    workers: Option<usize>,
    gate: Option<usize>,
    idle_timeout: Option<Duration>,
}

impl SortConfigBuilder {
    pub fn workers(&mut self, value: usize) -> &mut Self {
        self.workers = Some(value);
        self
    }

    pub fn gate(&mut self, value: usize) -> &mut Self {
        self.gate = Some(value);
        self
    }

    pub fn idle_timeout(&mut self, value: Duration) -> &mut Self {
        self.idle_timeout = Some(value);
        self
    }

    pub fn build(&self) -> Result<SortConfig, ConfigError> {
        let workers = self.workers.unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        let idle_timeout = self.idle_timeout.unwrap_or(DEFAULT_IDLE_TIMEOUT);
        if idle_timeout.is_zero() {
            return Err(ConfigError::ZeroIdleTimeout);
        }

        Ok(SortConfig {
            workers,
            gate: self.gate.unwrap_or(DEFAULT_GATE),
            idle_timeout,
        })
    }
}

/// A sorter that owns its configuration.
///
/// Setters take `&mut self` while sorting borrows `&self` for the whole run,
/// so the configuration cannot change under an in-flight sort.
#[derive(Clone, Debug, Default)]
pub struct ParallelSorter {
    config: SortConfig,
}

impl ParallelSorter {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn set_worker_count(&mut self, workers: usize) -> Result<(), ConfigError> {
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        self.config.workers = workers;
        Ok(())
    }

    pub fn set_parallel_gate(&mut self, gate: usize) {
        self.config.gate = gate;
    }

    pub fn set_idle_timeout(&mut self, idle_timeout: Duration) -> Result<(), ConfigError> {
        if idle_timeout.is_zero() {
            return Err(ConfigError::ZeroIdleTimeout);
        }
        self.config.idle_timeout = idle_timeout;
        Ok(())
    }

    pub fn sequential_sort<T: Ord>(&self, data: &mut [T]) {
        sequential::sort(data);
    }

    pub fn parallel_sort<T: Ord + Send>(&self, data: &mut [T]) -> SortReport {
        parallel::sort(data, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SortConfig::builder().build().unwrap();
        assert_eq!(config, SortConfig::default());
        assert_eq!(config.workers(), 4);
        assert_eq!(config.gate(), 5000);
        assert_eq!(config.idle_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn builder_rejects_invalid_values() {
        assert_eq!(
            SortConfig::builder().workers(0).build(),
            Err(ConfigError::ZeroWorkers)
        );
        assert_eq!(
            SortConfig::builder().idle_timeout(Duration::ZERO).build(),
            Err(ConfigError::ZeroIdleTimeout)
        );

        let config = SortConfig::builder().workers(8).gate(0).build().unwrap();
        assert_eq!(config.workers(), 8);
        assert_eq!(config.gate(), 0);
    }

    #[test]
    fn setters_apply_to_later_runs() {
        let mut sorter = ParallelSorter::default();
        sorter.set_worker_count(2).unwrap();
        sorter.set_parallel_gate(2);
        assert_eq!(sorter.set_worker_count(0), Err(ConfigError::ZeroWorkers));
        assert_eq!(sorter.config().workers(), 2);
        assert_eq!(sorter.config().gate(), 2);

        let mut data = vec![5, 3, 8, 3, 1, 9, 2];
        let report = sorter.parallel_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3, 3, 5, 8, 9]);
        assert_eq!(report.workers.len(), 2);

        let mut data = vec![2, 1];
        sorter.sequential_sort(&mut data);
        assert_eq!(data, vec![1, 2]);
    }
}
