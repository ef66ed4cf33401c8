use std::thread::ThreadId;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortPath {
    /// The input was below the gate; no thread was spawned.
    Sequential,
    Parallel,
}

/// Counters collected by one worker over a run.
#[derive(Clone, Debug)]
pub struct WorkerReport {
    pub index: usize,
    pub thread_id: ThreadId,
    /// Tasks taken from the queue. Each one is partitioned exactly once.
    pub partitions: usize,
    /// Sub-ranges pushed back onto the queue.
    pub shared: usize,
    /// Sub-ranges below the gate sorted in place by this worker.
    pub finished_locally: usize,
    pub idle_waits: usize,
}

impl WorkerReport {
    pub(crate) fn new(index: usize, thread_id: ThreadId) -> Self {
        Self {
            index,
            thread_id,
            partitions: 0,
            shared: 0,
            finished_locally: 0,
            idle_waits: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SortReport {
    pub path: SortPath,
    pub workers: Vec<WorkerReport>,
    /// Largest number of tasks queued at once.
    pub peak_queue_len: usize,
}

impl SortReport {
    pub(crate) fn sequential() -> Self {
        Self {
            path: SortPath::Sequential,
            workers: Vec::new(),
            peak_queue_len: 0,
        }
    }

    pub fn total_partitions(&self) -> usize {
        self.workers.iter().map(|w| w.partitions).sum()
    }

    /// Workers that partitioned at least one task.
    pub fn active_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.partitions > 0).count()
    }
}
