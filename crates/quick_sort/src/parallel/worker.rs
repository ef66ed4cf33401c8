use std::thread;
use std::time::Duration;

use super::queue::{Task, TaskQueue};
use crate::partition::partition;
use crate::report::WorkerReport;
use crate::sequential;

/// Keeps a taken task counted in flight until the worker is done with it,
/// including when it unwinds out of a panicking comparison.
struct InFlight<'q, 'data, T> {
    queue: &'q TaskQueue<'data, T>,
}

impl<T> Drop for InFlight<'_, '_, T> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.queue.abort();
        } else {
            self.queue.complete();
        }
    }
}

/// Worker loop: take, partition, share or finish the halves, repeat until
/// the queue reports quiescence.
pub(crate) fn run<T: Ord>(
    index: usize,
    queue: &TaskQueue<'_, T>,
    share_at: usize,
    idle_timeout: Duration,
) -> WorkerReport {
    let mut report = WorkerReport::new(index, thread::current().id());

    while let Some(task) = queue.take(idle_timeout, &mut report) {
        let _in_flight = InFlight { queue };
        process(task, queue, share_at, &mut report);
    }

    log::trace!(
        "worker {} exiting: partitions={}, shared={}, finished_locally={}, idle_waits={}",
        index,
        report.partitions,
        report.shared,
        report.finished_locally,
        report.idle_waits
    );
    report
}

fn process<'data, T: Ord>(
    task: Task<'data, T>,
    queue: &TaskQueue<'data, T>,
    share_at: usize,
    report: &mut WorkerReport,
) {
    let Task { data } = task;
    if data.len() < 2 {
        return;
    }

    let split = partition(data);
    report.partitions += 1;

    let (left, rest) = data.split_at_mut(split);
    let right = &mut rest[1..];

    for data in [left, right] {
        if data.len() >= share_at {
            queue.push(Task { data });
            report.shared += 1;
        } else {
            sequential::sort(data);
            report.finished_locally += 1;
        }
    }
}
