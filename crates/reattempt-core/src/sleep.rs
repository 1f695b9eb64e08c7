//! Wait capabilities injected into the retrier.
//!
//! The retry loop never sleeps directly: it asks one of these traits to wait,
//! which keeps the blocking and suspending execution modes symmetric and lets
//! tests substitute a recording implementation for real time.
use std::time::Duration;

use async_trait::async_trait;

/// Blocking wait used by [`crate::retrier::Retrier::run`].
pub trait Sleeper: Send + Sync {
    /// Block the calling thread for `wait`.
    fn sleep(&self, wait: Duration);
}

/// Default blocking sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, wait: Duration) {
        std::thread::sleep(wait);
    }
}

/// Suspending wait used by [`crate::retrier::Retrier::run_async`].
#[async_trait]
pub trait AsyncSleeper: Send + Sync {
    /// Suspend the calling task for `wait`.
    async fn sleep(&self, wait: Duration);
}

/// Default suspending sleeper backed by [`tokio::time::sleep`].
///
/// This yields to the runtime for the duration of the wait; it never blocks
/// the executor thread, so concurrent sessions keep making progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl AsyncSleeper for TokioSleeper {
    async fn sleep(&self, wait: Duration) {
        tokio::time::sleep(wait).await;
    }
}
