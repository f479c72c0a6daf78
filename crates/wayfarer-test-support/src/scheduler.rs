//! Test scheduler — hand-fired `Scheduler` implementation for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wayfarer_core::time::{Scheduler, TimerHandle, TimerTask};

/// A scheduler that records every timer and fires them only on request.
///
/// Timers never fire on their own. Tests inspect what was scheduled through
/// the accessors and run a timer's task with [`ManualScheduler::fire_next`]
/// or [`ManualScheduler::force_fire`].
#[derive(Default)]
pub struct ManualScheduler {
    entries: Mutex<Vec<Entry>>,
}

struct Entry {
    delay: Duration,
    task: Option<TimerTask>,
    cancelled: Arc<AtomicBool>,
}

impl ManualScheduler {
    /// Create a scheduler with no timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of timers ever scheduled.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn scheduled_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Number of timers that are scheduled, unfired, and not cancelled.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn pending_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.task.is_some() && !entry.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Delay of the most recently scheduled timer.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_delay(&self) -> Option<Duration> {
        self.entries.lock().unwrap().last().map(|entry| entry.delay)
    }

    /// Whether the timer at `index` (in scheduling order) was cancelled.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the internal mutex is poisoned.
    pub fn is_cancelled(&self, index: usize) -> bool {
        self.entries.lock().unwrap()[index].cancelled.load(Ordering::SeqCst)
    }

    /// Fires the oldest pending timer, running its task to completion.
    ///
    /// # Panics
    ///
    /// Panics if no pending timer exists or the internal mutex is poisoned.
    pub async fn fire_next(&self) {
        let task = {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries
                .iter_mut()
                .find(|entry| entry.task.is_some() && !entry.cancelled.load(Ordering::SeqCst))
                .expect("fire_next called with no pending timer");
            entry.task.take().expect("pending timer lost its task")
        };
        task.await;
    }

    /// Runs the task of the timer at `index` even if that timer was
    /// cancelled. Simulates a timer whose cancellation arrived only after
    /// it had already fired.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, the timer already fired, or the
    /// internal mutex is poisoned.
    pub async fn force_fire(&self, index: usize) {
        let task = {
            let mut entries = self.entries.lock().unwrap();
            entries[index]
                .task
                .take()
                .expect("force_fire called on a timer that already fired")
        };
        task.await;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: TimerTask) -> Box<dyn TimerHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.entries.lock().unwrap().push(Entry {
            delay,
            task: Some(task),
            cancelled: Arc::clone(&cancelled),
        });
        Box::new(ManualTimer { cancelled })
    }
}

struct ManualTimer {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle for ManualTimer {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
