use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::report::WorkerReport;

/// A sub-slice of the caller's slice waiting to be partitioned. Tasks never
/// overlap: each one is carved out of its parent with `split_at_mut`.
pub(crate) struct Task<'data, T> {
    pub(crate) data: &'data mut [T],
}

struct State<'data, T> {
    tasks: Vec<Task<'data, T>>,
    /// Workers holding a task they have not completed yet.
    in_flight: usize,
    aborted: bool,
    peak_len: usize,
}

impl<T> State<'_, T> {
    #[inline]
    fn is_quiescent(&self) -> bool {
        self.tasks.is_empty() && self.in_flight == 0
    }
}

/// LIFO task queue shared by the workers of one run.
///
/// The in-flight count lives under the same lock as the tasks: popping a
/// task and counting it in flight is one step, so a worker that sees an
/// empty queue and zero in flight knows nothing can be pushed any more.
pub(crate) struct TaskQueue<'data, T> {
    state: Mutex<State<'data, T>>,
    not_empty: Condvar,
}

impl<'data, T> TaskQueue<'data, T> {
    pub(crate) fn new(seed: Task<'data, T>) -> Self {
        Self {
            state: Mutex::new(State {
                tasks: vec![seed],
                in_flight: 0,
                aborted: false,
                peak_len: 1,
            }),
            not_empty: Condvar::new(),
        }
    }

    /// Enqueue a task and wake one sleeping worker.
    pub(crate) fn push(&self, task: Task<'data, T>) {
        let mut state = self.state.lock();
        state.tasks.push(task);
        state.peak_len = state.peak_len.max(state.tasks.len());
        drop(state);
        self.not_empty.notify_one();
    }

    /// Take the most recently pushed task and count it in flight.
    ///
    /// Blocks while the queue is empty but some worker is still busy, waking
    /// at least every `idle_timeout` to re-check. Returns `None` once the run
    /// is quiescent or aborted.
    pub(crate) fn take(
        &self,
        idle_timeout: Duration,
        report: &mut WorkerReport,
    ) -> Option<Task<'data, T>> {
        let mut state = self.state.lock();
        loop {
            if state.aborted {
                return None;
            }
            if let Some(task) = state.tasks.pop() {
                state.in_flight += 1;
                return Some(task);
            }
            if state.in_flight == 0 {
                return None;
            }

            report.idle_waits += 1;
            if self.not_empty.wait_for(&mut state, idle_timeout).timed_out() {
                log::trace!(
                    "worker {} idle for {:?}, {} task(s) in flight",
                    report.index,
                    idle_timeout,
                    state.in_flight
                );
            }
        }
    }

    /// Mark one in-flight task as done. The worker that makes the run
    /// quiescent wakes everybody so they can exit.
    pub(crate) fn complete(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.in_flight > 0);
        state.in_flight -= 1;
        let quiescent = state.is_quiescent();
        drop(state);
        if quiescent {
            self.not_empty.notify_all();
        }
    }

    /// Called instead of `complete` when a worker unwinds with a task in
    /// hand. Remaining workers stop taking tasks.
    pub(crate) fn abort(&self) {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.aborted = true;
        drop(state);
        self.not_empty.notify_all();
    }

    /// Tear the queue down after every worker has exited and return the peak
    /// queue length.
    pub(crate) fn finish(self) -> usize {
        let state = self.state.into_inner();
        debug_assert!(state.aborted || state.is_quiescent());
        state.peak_len
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use super::*;

    fn report() -> WorkerReport {
        WorkerReport::new(0, thread::current().id())
    }

    #[test]
    fn take_is_lifo() {
        let mut data = [0_u8; 6];
        let (a, rest) = data.split_at_mut(1);
        let (b, c) = rest.split_at_mut(2);

        let queue = TaskQueue::new(Task { data: a });
        queue.push(Task { data: b });
        queue.push(Task { data: c });

        let mut r = report();
        let timeout = Duration::from_millis(10);
        assert_eq!(queue.take(timeout, &mut r).map(|t| t.data.len()), Some(3));
        assert_eq!(queue.take(timeout, &mut r).map(|t| t.data.len()), Some(2));
        assert_eq!(queue.take(timeout, &mut r).map(|t| t.data.len()), Some(1));
        for _ in 0..3 {
            queue.complete();
        }
        assert!(queue.take(timeout, &mut r).is_none());
        assert_eq!(r.idle_waits, 0);
        assert_eq!(queue.finish(), 3);
    }

    #[test]
    fn idle_worker_waits_for_in_flight_work() {
        let mut data = [0_u8; 5];
        let (a, b) = data.split_at_mut(2);
        let queue = TaskQueue::new(Task { data: a });

        let mut r = report();
        let held = queue.take(Duration::from_millis(10), &mut r);
        assert!(held.is_some());

        thread::scope(|scope| {
            let waiter = scope.spawn(|| {
                let mut r = report();
                let task = queue.take(Duration::from_millis(5), &mut r);
                task.map(|t| t.data.len())
            });

            thread::sleep(Duration::from_millis(30));
            queue.push(Task { data: b });
            assert_eq!(waiter.join().unwrap(), Some(3));
        });
    }

    #[test]
    fn last_completion_wakes_sleepers() {
        let mut data = [0_u8; 2];
        let queue = TaskQueue::new(Task { data: &mut data[..] });
        let mut r = report();
        assert!(queue.take(Duration::from_secs(60), &mut r).is_some());

        thread::scope(|scope| {
            let waiter = scope.spawn(|| {
                let mut r = report();
                let start = Instant::now();
                let task = queue.take(Duration::from_secs(60), &mut r);
                (task.is_none(), start.elapsed())
            });

            thread::sleep(Duration::from_millis(20));
            queue.complete();
            let (done, elapsed) = waiter.join().unwrap();
            assert!(done);
            assert!(elapsed < Duration::from_secs(30));
        });
    }

    #[test]
    fn abort_releases_sleepers() {
        let mut data = [0_u8; 5];
        let (a, b) = data.split_at_mut(2);
        let queue = TaskQueue::new(Task { data: a });
        let mut r = report();
        assert!(queue.take(Duration::from_secs(60), &mut r).is_some());

        queue.abort();
        queue.push(Task { data: b });
        assert!(queue.take(Duration::from_secs(60), &mut r).is_none());
    }
}
