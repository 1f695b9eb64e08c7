pub mod observe;
pub mod retrier;
pub mod sleep;

mod schedule;

pub mod prelude {
    pub use crate::observe::warn_observer;
    pub use crate::retrier::Retrier;
    pub use crate::sleep::{AsyncSleeper, Sleeper, ThreadSleeper, TokioSleeper};
    pub use reattempt_model::{Attempts, BackoffStrategy, JitterStrategy, ModelError};
}
