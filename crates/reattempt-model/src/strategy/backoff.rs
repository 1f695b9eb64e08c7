use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::strategy::{Attempts, JitterStrategy};

/// Declarative configuration for one retry session.
///
/// `BackoffStrategy` describes *how long* a retry session may run and *how*
/// the delay between attempts evolves:
/// - `attempts` bounds the total number of invocations
/// - `first_ms` is the wait before the second attempt
/// - after every failed attempt the delay is multiplied by `factor`, a jitter
///   sample is added, and the result is clamped to `max_ms` (when set)
///
/// The defaults mirror a plain "retry forever, no waiting" session: unlimited
/// attempts, zero delay, factor 1, no jitter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackoffStrategy {
    /// Attempt budget for the whole session.
    pub attempts: Attempts,
    /// Initial delay in milliseconds, applied before the second attempt.
    pub first_ms: u64,
    /// Optional ceiling for the computed delay, in milliseconds.
    pub max_ms: Option<u64>,
    /// Multiplier applied to the delay after each failed attempt.
    ///
    /// `1.0` keeps the delay constant; `0.0` collapses it to the jitter term
    /// after the first retry.
    pub factor: f64,
    /// Additive jitter applied after the factor.
    pub jitter: JitterStrategy,
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self {
            attempts: Attempts::Unlimited,
            first_ms: 0,
            max_ms: None,
            factor: 1.0,
            jitter: JitterStrategy::default(),
        }
    }
}

impl BackoffStrategy {
    /// Set the attempt budget.
    pub fn with_attempts(mut self, attempts: impl Into<Attempts>) -> Self {
        self.attempts = attempts.into();
        self
    }

    /// Set the initial delay in milliseconds.
    pub fn with_first_ms(mut self, first_ms: u64) -> Self {
        self.first_ms = first_ms;
        self
    }

    /// Set the delay ceiling in milliseconds.
    pub fn with_max_ms(mut self, max_ms: u64) -> Self {
        self.max_ms = Some(max_ms);
        self
    }

    /// Set the backoff factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Set the jitter strategy.
    pub fn with_jitter(mut self, jitter: JitterStrategy) -> Self {
        self.jitter = jitter;
        self
    }

    /// Validate the whole strategy.
    ///
    /// All configuration errors surface here, never while a session is
    /// running: a zero finite budget, an inverted jitter range, or a factor
    /// that is negative or not finite.
    pub fn validate(&self) -> ModelResult<()> {
        self.attempts.validate()?;
        self.jitter.validate()?;
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(ModelError::InvalidFactor(self.factor));
        }
        Ok(())
    }
}
