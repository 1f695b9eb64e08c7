//! Optional logging integration for the retrier.
//!
//! Attempts are silent by default; logging is layered on top of the observer
//! hook instead of being a hard dependency of the loop.
use std::fmt::Display;
use std::time::Duration;

use tracing::warn;

/// Observer that logs every retryable failure at `warn` level, together with
/// the delay that will be applied before the next attempt.
///
/// Wire it with [`crate::retrier::Retrier::on_retry`], or use the
/// [`crate::retrier::Retrier::log_retries`] shorthand.
pub fn warn_observer<E: Display>() -> impl Fn(&E, Duration) + Send + Sync {
    |err, wait| warn!("{}, retrying in {:?}", err, wait)
}
