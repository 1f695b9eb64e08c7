mod attempts;
pub use attempts::Attempts;

mod backoff;
pub use backoff::BackoffStrategy;

mod jitter;
pub use jitter::JitterStrategy;
