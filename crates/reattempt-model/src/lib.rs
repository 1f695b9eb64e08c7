mod error;
pub use error::{ModelError, ModelResult};

mod strategy;
pub use strategy::{Attempts, BackoffStrategy, JitterStrategy};
