use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Time source for the simulated async sources.
///
/// Production code uses [`TokioClock`]; tests run it under tokio's paused
/// clock so delays elapse without wall-clock waits.
pub trait Clock: Clone + Send + Sync + 'static {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Owns a spawned timer task and aborts it when dropped.
///
/// Every exit path (explicit cancel, replacement, owner teardown) goes through
/// `Drop`, so a callback scheduled inside the task cannot run afterwards.
#[derive(Debug)]
pub struct TimerGuard {
    handle: JoinHandle<()>,
}

impl TimerGuard {
    pub fn spawn<F>(task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(task),
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
