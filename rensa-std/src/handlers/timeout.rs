//! Timeout handler - time-limited downstream execution.
//!
//! **Note**: This module requires the `tokio` runtime with its timer enabled.

use rensa_core::{Fault, Handler, Next, Outcome};
use std::time::Duration;

/// A handler that bounds how long the rest of the chain may take to settle.
///
/// If downstream work does not settle in time it is dropped at its current
/// suspension point and a [`FaultKind::Timeout`] fault is raised, which a
/// [`FilterHandler`] or [`RetryHandler`] further up may act on.
///
/// # Example
///
/// ```rust,ignore
/// let chain = Chain::builder()
///     .handler(RetryHandler::new("Retry", RetryPolicy::new(3, FaultKinds::TIMEOUT)?, sink))
///     .handler(TimeoutHandler::millis(250))
///     .step(SlowStep)
///     .finish();
/// ```
///
/// [`FaultKind::Timeout`]: rensa_core::FaultKind::Timeout
/// [`FilterHandler`]: crate::handlers::FilterHandler
/// [`RetryHandler`]: crate::handlers::RetryHandler
#[derive(Debug, Clone, Copy)]
pub struct TimeoutHandler {
    duration: Duration,
}

impl TimeoutHandler {
    /// Create a timeout handler.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a `TimeoutHandler` with the bound specified in seconds.
    pub fn secs(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    /// Create a `TimeoutHandler` with the bound specified in milliseconds.
    pub fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Get the configured bound.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Handler for TimeoutHandler {
    async fn handle(&self, next: Next<'_>) -> Outcome {
        match tokio::time::timeout(self.duration, next.run()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(duration = ?self.duration, "downstream timed out");
                Err(Fault::timeout(format!(
                    "downstream did not settle within {:?}",
                    self.duration
                )))
            }
        }
    }
}
