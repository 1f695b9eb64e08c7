use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Controls the additive jitter applied to backoff delays.
///
/// Jitter is used to distribute retries over time, preventing synchronized
/// "retry storms" when many callers fail simultaneously. It is added to the
/// delay after the backoff factor has been applied.
///
/// Strategies:
/// - `Fixed`: a constant duration added after every failed attempt.
/// - `Range`: a uniform random sample from `[min_ms, max_ms]` added after every failed attempt.
///
/// The exact math is implemented in the retry executor. This enum only specifies the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JitterStrategy {
    /// Constant additive term, in milliseconds. `Fixed(0)` disables jitter.
    Fixed(u64),
    /// Uniform random additive term drawn from `[min_ms, max_ms]`.
    #[serde(rename_all = "camelCase")]
    Range { min_ms: u64, max_ms: u64 },
}

impl Default for JitterStrategy {
    fn default() -> Self {
        JitterStrategy::Fixed(0)
    }
}

impl JitterStrategy {
    /// Validate the strategy.
    ///
    /// An inverted range (`min_ms > max_ms`) cannot be sampled and is rejected
    /// at configuration time. Negative bounds are unrepresentable.
    pub fn validate(&self) -> ModelResult<()> {
        match *self {
            JitterStrategy::Range { min_ms, max_ms } if min_ms > max_ms => {
                Err(ModelError::InvertedJitterRange { min_ms, max_ms })
            }
            _ => Ok(()),
        }
    }
}
