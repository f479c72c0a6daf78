//! Time ports: wall clock and one-shot timer scheduling.
//!
//! Both are injected into the orchestration core so tests can drive it
//! with a hand-set clock and hand-fired timers.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Abstraction over wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Work to run when a timer fires.
pub type TimerTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Handle to a pending timer.
///
/// Cancelling is idempotent and only stops a timer that has not fired yet.
/// Dropping the handle does not cancel the timer.
pub trait TimerHandle: Send + Sync {
    /// Cancels the timer if it has not fired.
    fn cancel(&self);
}

/// Capability to run a task once, after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedules `task` to run after `delay` and returns a cancellation
    /// handle.
    fn schedule_after(&self, delay: Duration, task: TimerTask) -> Box<dyn TimerHandle>;
}

/// Production scheduler that runs each task on a spawned tokio task after
/// an async sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: TimerTask) -> Box<dyn TimerHandle> {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        Box::new(SpawnedTimer { handle })
    }
}

struct SpawnedTimer {
    handle: tokio::task::JoinHandle<()>,
}

impl TimerHandle for SpawnedTimer {
    fn cancel(&self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use tokio::sync::Notify;

    use super::*;

    #[test]
    fn test_system_clock_returns_current_time() {
        // Arrange
        let clock = SystemClock;

        // Act
        let before = Utc::now();
        let observed = clock.now();
        let after = Utc::now();

        // Assert
        assert!(observed >= before);
        assert!(observed <= after);
    }

    #[tokio::test]
    async fn test_scheduled_task_runs_after_delay() {
        // Arrange
        let notify = Arc::new(Notify::new());
        let notified = Arc::clone(&notify);
        let task = Box::pin(async move {
            notified.notify_one();
        });

        // Act
        let _handle = TokioScheduler.schedule_after(Duration::from_millis(5), task);

        // Assert
        tokio::time::timeout(Duration::from_secs(5), notify.notified())
            .await
            .expect("scheduled task should have fired");
    }

    #[tokio::test]
    async fn test_cancelled_timer_never_runs_its_task() {
        // Arrange
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let task = Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
        });
        let handle = TokioScheduler.schedule_after(Duration::from_millis(50), task);

        // Act
        handle.cancel();
        tokio::time::sleep(Duration::from_millis(120)).await;

        // Assert
        assert!(!fired.load(Ordering::SeqCst));
    }
}
