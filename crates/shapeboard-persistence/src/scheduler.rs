//! Debounced save scheduling.
//!
//! [`SaveScheduler`] coalesces rapid mutations into a single write: every
//! call to [`SaveScheduler::schedule`] replaces the pending deadline, so the
//! task runs only after a full idle window has elapsed since the most recent
//! mutation (trailing-edge debounce with reset). At most one deadline is
//! pending at any time. [`SaveScheduler::flush`] runs the task synchronously
//! on the caller's thread for teardown paths.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Idle window before a scheduled save fires.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(5000);

type Task = Box<dyn Fn() + Send + Sync>;

struct Inner {
    deadline: Option<Instant>,
    shutdown: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    signal: Condvar,
    task: Task,
}

/// A cancellable single-shot timer driving a save task.
pub struct SaveScheduler {
    shared: Arc<Shared>,
    delay: Duration,
    worker: Option<JoinHandle<()>>,
}

impl SaveScheduler {
    /// Creates a scheduler running `task` after each idle window of `delay`.
    pub fn new(delay: Duration, task: impl Fn() + Send + Sync + 'static) -> Self {
        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                deadline: None,
                shutdown: false,
            }),
            signal: Condvar::new(),
            task: Box::new(task),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("shapeboard-save".to_string())
            .spawn(move || run_worker(worker_shared))
            .expect("failed to spawn save scheduler thread");

        Self {
            shared,
            delay,
            worker: Some(worker),
        }
    }

    /// Re-arms the idle timer, cancelling any pending deadline.
    pub fn schedule(&self) {
        let mut inner = self.shared.inner.lock();
        inner.deadline = Some(Instant::now() + self.delay);
        trace!(delay_ms = self.delay.as_millis() as u64, "save re-armed");
        self.shared.signal.notify_one();
    }

    /// Cancels any pending deadline without running the task.
    pub fn cancel(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.deadline.take().is_some() {
            debug!("pending save cancelled");
        }
        self.shared.signal.notify_one();
    }

    /// Cancels the timer and runs the task immediately on this thread.
    pub fn flush(&self) {
        {
            let mut inner = self.shared.inner.lock();
            inner.deadline = None;
            self.shared.signal.notify_one();
        }
        debug!("flushing save");
        (self.shared.task)();
    }

    /// Whether a save is currently pending.
    pub fn has_pending(&self) -> bool {
        self.shared.inner.lock().deadline.is_some()
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        {
            let mut inner = self.shared.inner.lock();
            inner.shutdown = true;
            self.shared.signal.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(shared: Arc<Shared>) {
    let mut inner = shared.inner.lock();
    loop {
        if inner.shutdown {
            return;
        }
        match inner.deadline {
            None => {
                shared.signal.wait(&mut inner);
            }
            Some(deadline) => {
                if Instant::now() >= deadline {
                    inner.deadline = None;
                    drop(inner);
                    trace!("save timer fired");
                    (shared.task)();
                    inner = shared.inner.lock();
                } else {
                    // Wakes early when re-armed or cancelled; the deadline is
                    // re-read on the next iteration.
                    let _ = shared.signal.wait_until(&mut inner, deadline);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_scheduler(delay: Duration) -> (SaveScheduler, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let task_count = Arc::clone(&count);
        let scheduler = SaveScheduler::new(delay, move || {
            task_count.fetch_add(1, Ordering::SeqCst);
        });
        (scheduler, count)
    }

    #[test]
    fn test_rapid_schedules_fire_once() {
        let (scheduler, count) = counting_scheduler(Duration::from_millis(50));

        for _ in 0..5 {
            scheduler.schedule();
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        thread::sleep(Duration::from_millis(150));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_timer_measures_from_last_schedule() {
        let (scheduler, count) = counting_scheduler(Duration::from_millis(80));

        scheduler.schedule();
        thread::sleep(Duration::from_millis(50));
        scheduler.schedule();
        // The original deadline has passed, but the reset one has not.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        thread::sleep(Duration::from_millis(100));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_suppresses_save() {
        let (scheduler, count) = counting_scheduler(Duration::from_millis(30));

        scheduler.schedule();
        scheduler.cancel();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_flush_runs_immediately() {
        let (scheduler, count) = counting_scheduler(Duration::from_secs(60));

        scheduler.schedule();
        scheduler.flush();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!scheduler.has_pending());

        // The cancelled deadline must not fire a second save.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_flush_without_pending_still_runs_task() {
        let (scheduler, count) = counting_scheduler(Duration::from_millis(30));
        scheduler.flush();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
