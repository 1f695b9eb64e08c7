//! The retry executor.
//!
//! [`Retrier`] drives a caller-supplied operation to completion according to a
//! validated [`BackoffStrategy`]. One instance is reusable across sessions;
//! each run owns its own attempt state, so concurrent sessions need no
//! coordination.
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reattempt_model::{BackoffStrategy, ModelResult};

use crate::observe;
use crate::schedule::{AttemptState, Verdict};
use crate::sleep::{AsyncSleeper, Sleeper, ThreadSleeper, TokioSleeper};

/// Retry executor for operations failing with error type `E`.
///
/// The blocking ([`run`](Retrier::run)) and suspending
/// ([`run_async`](Retrier::run_async)) drivers share one decision path: the
/// only difference between them is how the operation is invoked and how the
/// wait is performed.
///
/// By default every error is considered retryable and attempts are silent;
/// [`retry_if`](Retrier::retry_if) narrows the retryable set and
/// [`on_retry`](Retrier::on_retry) attaches an observer.
pub struct Retrier<E> {
    strategy: BackoffStrategy,
    classify: Box<dyn Fn(&E) -> bool + Send + Sync>,
    observer: Option<Box<dyn Fn(&E, Duration) + Send + Sync>>,
    sleeper: Arc<dyn Sleeper>,
    async_sleeper: Arc<dyn AsyncSleeper>,
}

impl<E: 'static> Retrier<E> {
    /// Create an executor from a strategy.
    ///
    /// The strategy is validated here; an invalid configuration never reaches
    /// a running session.
    pub fn new(strategy: BackoffStrategy) -> ModelResult<Self> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            classify: Box::new(|_| true),
            observer: None,
            sleeper: Arc::new(ThreadSleeper),
            async_sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Restrict retries to errors matching `pred`.
    ///
    /// Errors rejected by the predicate propagate immediately, without
    /// consuming an attempt or waiting.
    pub fn retry_if(mut self, pred: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        self.classify = Box::new(pred);
        self
    }

    /// Attach an observer invoked on every retryable failure.
    ///
    /// The observer receives the error and the delay about to be applied.
    /// It runs exactly once per retry, before the wait; a panic inside it
    /// unwinds through the session and is never caught or retried.
    pub fn on_retry(mut self, observer: impl Fn(&E, Duration) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Attach the default `tracing` observer (see [`observe::warn_observer`]).
    pub fn log_retries(self) -> Self
    where
        E: Display,
    {
        self.on_retry(observe::warn_observer())
    }

    /// Replace the blocking wait capability.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replace the suspending wait capability.
    pub fn with_async_sleeper(mut self, sleeper: Arc<dyn AsyncSleeper>) -> Self {
        self.async_sleeper = sleeper;
        self
    }

    /// The validated strategy this executor runs with.
    pub fn strategy(&self) -> &BackoffStrategy {
        &self.strategy
    }

    /// Run `op` in blocking mode, waiting on the calling thread between
    /// attempts.
    ///
    /// Returns the first success, or the unmodified error from the attempt
    /// that ended the session (fatal classification or exhausted budget).
    pub fn run<T, F>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut state = AttemptState::new(&self.strategy);
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => match self.next_wait(&mut state, &err) {
                    Some(wait) => self.sleeper.sleep(wait),
                    None => return Err(err),
                },
            }
        }
    }

    /// Run `op` in suspending mode.
    ///
    /// The wait between attempts suspends the calling task only; other tasks
    /// on the runtime keep making progress.
    pub async fn run_async<T, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut state = AttemptState::new(&self.strategy);
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => match self.next_wait(&mut state, &err) {
                    Some(wait) => self.async_sleeper.sleep(wait).await,
                    None => return Err(err),
                },
            }
        }
    }

    /// Blocking-mode convenience: bind `args` and hand a fresh clone to `op`
    /// on every attempt.
    pub fn call_with<A, T, F>(&self, mut op: F, args: A) -> Result<T, E>
    where
        A: Clone,
        F: FnMut(A) -> Result<T, E>,
    {
        self.run(|| op(args.clone()))
    }

    /// Suspending-mode counterpart of [`call_with`](Retrier::call_with).
    pub async fn call_with_async<A, T, F, Fut>(&self, mut op: F, args: A) -> Result<T, E>
    where
        A: Clone,
        F: FnMut(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_async(|| op(args.clone())).await
    }

    /// Consume the executor and wrap `op` into a new callable with retry
    /// behavior baked in.
    ///
    /// Every invocation of the returned closure is a full retry session.
    pub fn wrap<T, F>(self, mut op: F) -> impl FnMut() -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        move || self.run(&mut op)
    }

    /// Suspending-mode counterpart of [`wrap`](Retrier::wrap).
    ///
    /// The returned closure starts a fresh retry session per call, so the
    /// wrapped operation must be cloneable.
    pub fn wrap_async<T, F, Fut>(
        self,
        op: F,
    ) -> impl Fn() -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>>
    where
        T: Send + 'static,
        E: Send,
        F: Fn() -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let retrier = Arc::new(self);
        move || {
            let retrier = Arc::clone(&retrier);
            let op = op.clone();
            Box::pin(async move { retrier.run_async(op).await })
        }
    }

    /// Shared decision path for both drivers.
    ///
    /// Returns the wait before the next attempt, or `None` when the error is
    /// terminal (not retryable, or the budget is spent). The observer sees
    /// the same pre-update delay the wait will use.
    fn next_wait(&self, state: &mut AttemptState, err: &E) -> Option<Duration> {
        if !(self.classify)(err) {
            return None;
        }
        match state.on_failure(&self.strategy) {
            Verdict::Exhausted => None,
            Verdict::RetryAfter(wait) => {
                if let Some(observer) = &self.observer {
                    observer(err, wait);
                }
                Some(wait)
            }
        }
    }
}
