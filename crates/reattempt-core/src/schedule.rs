//! Attempt bookkeeping for one retry session.
//!
//! [`AttemptState`] is created per session, consumed by exactly one run of the
//! retrier, and never shared. It owns the two mutable pieces of the loop: the
//! remaining attempt budget and the current delay.
use std::time::Duration;

use rand::Rng;
use reattempt_model::{Attempts, BackoffStrategy, JitterStrategy};

/// Decision taken after a retryable failure.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// The finite budget is spent; the failure is terminal.
    Exhausted,
    /// Another attempt is allowed after waiting this long.
    RetryAfter(Duration),
}

pub(crate) struct AttemptState {
    /// Remaining invocations, `None` for an unlimited budget.
    remaining: Option<u32>,
    /// Delay to apply before the next retry.
    delay: Duration,
}

impl AttemptState {
    pub(crate) fn new(strategy: &BackoffStrategy) -> Self {
        let remaining = match strategy.attempts {
            Attempts::Unlimited => None,
            Attempts::Limited(n) => Some(n),
        };
        Self {
            remaining,
            delay: Duration::from_millis(strategy.first_ms),
        }
    }

    /// Account for one retryable failure.
    ///
    /// Decrements the budget and, if attempts remain, returns the wait for
    /// the upcoming retry. The returned wait is the *current* delay; the
    /// stored delay is then advanced (factor, jitter, clamp) for the retry
    /// after the next one.
    pub(crate) fn on_failure(&mut self, strategy: &BackoffStrategy) -> Verdict {
        if let Some(left) = &mut self.remaining {
            *left = left.saturating_sub(1);
            if *left == 0 {
                return Verdict::Exhausted;
            }
        }
        let wait = self.delay;
        self.delay = next_delay(self.delay, strategy);
        Verdict::RetryAfter(wait)
    }
}

/// One step of delay evolution: `delay * factor + jitter`, clamped to `max_ms`.
///
/// Saturates at `Duration::MAX` instead of panicking when a large factor
/// overflows the duration range.
fn next_delay(current: Duration, strategy: &BackoffStrategy) -> Duration {
    let scaled = current.as_secs_f64() * strategy.factor;
    let mut next = Duration::try_from_secs_f64(scaled).unwrap_or(Duration::MAX);
    next = next.saturating_add(sample(&strategy.jitter));
    if let Some(max_ms) = strategy.max_ms {
        next = next.min(Duration::from_millis(max_ms));
    }
    next
}

fn sample(jitter: &JitterStrategy) -> Duration {
    match *jitter {
        JitterStrategy::Fixed(ms) => Duration::from_millis(ms),
        // ranges are validated at session construction, so min <= max here
        JitterStrategy::Range { min_ms, max_ms } => {
            Duration::from_millis(rand::rng().random_range(min_ms..=max_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttemptState, Verdict};
    use reattempt_model::{BackoffStrategy, JitterStrategy};
    use std::time::Duration;

    fn waits(strategy: &BackoffStrategy, failures: usize) -> Vec<Verdict> {
        let mut state = AttemptState::new(strategy);
        (0..failures).map(|_| state.on_failure(strategy)).collect()
    }

    #[test]
    fn doubling_delays_until_exhaustion() {
        let strategy = BackoffStrategy::default()
            .with_attempts(5u32)
            .with_first_ms(1_000)
            .with_factor(2.0);

        let observed = waits(&strategy, 5);
        assert_eq!(
            observed,
            vec![
                Verdict::RetryAfter(Duration::from_secs(1)),
                Verdict::RetryAfter(Duration::from_secs(2)),
                Verdict::RetryAfter(Duration::from_secs(4)),
                Verdict::RetryAfter(Duration::from_secs(8)),
                Verdict::Exhausted,
            ]
        );
    }

    #[test]
    fn single_attempt_exhausts_without_wait() {
        let strategy = BackoffStrategy::default()
            .with_attempts(1u32)
            .with_first_ms(1_000);

        let mut state = AttemptState::new(&strategy);
        assert_eq!(state.on_failure(&strategy), Verdict::Exhausted);
    }

    #[test]
    fn max_delay_caps_growth() {
        let strategy = BackoffStrategy::default()
            .with_attempts(5u32)
            .with_first_ms(1_000)
            .with_max_ms(1_000)
            .with_factor(2.0);

        for verdict in waits(&strategy, 4) {
            assert_eq!(verdict, Verdict::RetryAfter(Duration::from_secs(1)));
        }
    }

    #[test]
    fn fixed_jitter_accumulates_linearly() {
        // factor 1, zero first delay: waits are 0, j, 2j, 3j, ...
        let strategy = BackoffStrategy::default()
            .with_first_ms(0)
            .with_jitter(JitterStrategy::Fixed(1_000));

        let mut state = AttemptState::new(&strategy);
        for i in 0..5u64 {
            assert_eq!(
                state.on_failure(&strategy),
                Verdict::RetryAfter(Duration::from_secs(i))
            );
        }
    }

    #[test]
    fn zero_factor_collapses_to_jitter() {
        let strategy = BackoffStrategy::default()
            .with_first_ms(5_000)
            .with_factor(0.0)
            .with_jitter(JitterStrategy::Fixed(250));

        let mut state = AttemptState::new(&strategy);
        assert_eq!(
            state.on_failure(&strategy),
            Verdict::RetryAfter(Duration::from_secs(5))
        );
        assert_eq!(
            state.on_failure(&strategy),
            Verdict::RetryAfter(Duration::from_millis(250))
        );
    }

    #[test]
    fn range_jitter_stays_within_bounds() {
        let strategy = BackoffStrategy::default().with_first_ms(0).with_jitter(
            JitterStrategy::Range {
                min_ms: 10,
                max_ms: 20,
            },
        );

        let mut state = AttemptState::new(&strategy);
        // first wait is the initial delay, before any jitter is applied
        assert_eq!(
            state.on_failure(&strategy),
            Verdict::RetryAfter(Duration::ZERO)
        );
        for _ in 0..50 {
            match state.on_failure(&strategy) {
                Verdict::RetryAfter(wait) => {
                    assert!(wait >= Duration::from_millis(10));
                    // factor 1 keeps the base at the previous jitter sample,
                    // so the wait can grow, but never below the range minimum
                }
                Verdict::Exhausted => panic!("unlimited budget exhausted"),
            }
        }
    }

    #[test]
    fn unlimited_budget_never_exhausts() {
        let strategy = BackoffStrategy::default();
        let mut state = AttemptState::new(&strategy);
        for _ in 0..10_000 {
            assert!(matches!(
                state.on_failure(&strategy),
                Verdict::RetryAfter(_)
            ));
        }
    }

    #[test]
    fn pathological_factor_saturates() {
        let strategy = BackoffStrategy::default()
            .with_first_ms(1_000)
            .with_factor(f64::MAX);

        let mut state = AttemptState::new(&strategy);
        state.on_failure(&strategy);
        match state.on_failure(&strategy) {
            Verdict::RetryAfter(wait) => assert_eq!(wait, Duration::MAX),
            Verdict::Exhausted => panic!("unlimited budget exhausted"),
        }
    }
}
