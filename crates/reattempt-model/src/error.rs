use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("attempt budget must be at least 1")]
    ZeroAttempts,

    #[error("jitter range is inverted: min {min_ms}ms > max {max_ms}ms")]
    InvertedJitterRange { min_ms: u64, max_ms: u64 },

    #[error("backoff factor must be finite and non-negative: {0}")]
    InvalidFactor(f64),

    #[error("unknown attempt budget: {0}")]
    UnknownAttempts(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
