//! Standard chain elements.

mod filter;
mod label;
mod retry;
#[cfg(feature = "timeout")]
mod timeout;

pub use filter::{FILTERED_MARKER, FilterBuilder, FilterHandler};
pub use label::LabelStep;
pub use retry::{RetryHandler, RetryPolicy, RetryPolicyBuilder};
#[cfg(feature = "timeout")]
pub use timeout::TimeoutHandler;
