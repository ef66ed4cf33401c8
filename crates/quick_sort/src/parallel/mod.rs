//! Parallel quicksort over a fixed set of scoped worker threads.
//!
//! The caller's slice is seeded as one task. Each worker pops a task,
//! partitions it, pushes halves that are at least `gate` long back onto the
//! shared queue and sorts shorter halves itself. Workers leave once the
//! queue is empty and no task is in flight.

mod queue;
mod worker;

use std::panic;
use std::thread;

use self::queue::{Task, TaskQueue};
use crate::config::SortConfig;
use crate::report::{SortPath, SortReport};
use crate::sequential;

pub(crate) fn sort<T: Ord + Send>(data: &mut [T], config: &SortConfig) -> SortReport {
    if data.len() < config.gate() {
        sequential::sort(data);
        return SortReport::sequential();
    }

    // Sub-ranges shorter than two elements are already sorted, sharing them
    // would only churn the queue.
    let share_at = config.gate().max(2);
    let len = data.len();
    let workers = config.workers();
    let idle_timeout = config.idle_timeout();
    assert!(workers > 0, "parallel sort needs at least one worker");
    log::debug!(
        "parallel sort of {} elements: workers={}, gate={}",
        len,
        workers,
        config.gate()
    );

    let queue = TaskQueue::new(Task { data });

    let reports = thread::scope(|scope| {
        let queue = &queue;
        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let spawned = thread::Builder::new()
                .name(format!("quick-sort-worker-{index}"))
                .spawn_scoped(scope, move || {
                    worker::run(index, queue, share_at, idle_timeout)
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(error) => log::warn!("failed to spawn sort worker {index}: {error}"),
            }
        }

        if handles.is_empty() {
            log::error!("no sort worker could be spawned, sorting on the calling thread");
            return vec![worker::run(0, queue, share_at, idle_timeout)];
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut first_panic = None;
        for handle in handles {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(payload) => {
                    first_panic.get_or_insert(payload);
                }
            }
        }
        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
        reports
    });

    let peak_queue_len = queue.finish();
    log::debug!(
        "parallel sort of {} elements done: {} partitions across {} workers, peak queue length {}",
        len,
        reports.iter().map(|r| r.partitions).sum::<usize>(),
        reports.len(),
        peak_queue_len
    );

    SortReport {
        path: SortPath::Parallel,
        workers: reports,
        peak_queue_len,
    }
}
