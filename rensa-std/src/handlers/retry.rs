//! Retry handler - re-runs the rest of the chain on retryable faults.

use crate::sink::SharedSink;
use rensa_core::{
    ConfigError, Fault, FaultKinds, Handler, Next, Outcome,
    blocking::{SyncHandler, SyncNext},
};
use std::{borrow::Cow, num::NonZeroU32};

/// How many times a [`RetryHandler`] runs the rest of the chain, and for which
/// faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: NonZeroU32,
    retryable: FaultKinds,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` counts the first run.
    pub fn new(max_attempts: u32, retryable: FaultKinds) -> Result<Self, ConfigError> {
        Self::builder()
            .max_attempts(max_attempts)
            .retry_on(retryable)
            .build()
    }

    /// Start configuring a policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Total number of downstream runs allowed.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    /// The kinds that consume an attempt instead of propagating.
    pub fn retryable(&self) -> FaultKinds {
        self.retryable
    }

    /// Returns `true` if the fault may be answered with another attempt.
    pub fn is_retryable(&self, fault: &Fault) -> bool {
        self.retryable.matches(fault)
    }
}

/// Builder for [`RetryPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicyBuilder {
    max_attempts: u32,
    retryable: FaultKinds,
}

impl Default for RetryPolicyBuilder {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retryable: FaultKinds::empty(),
        }
    }
}

impl RetryPolicyBuilder {
    /// Set the total number of downstream runs. Defaults to 3.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Add kinds to retry on.
    pub fn retry_on(mut self, kinds: FaultKinds) -> Self {
        self.retryable |= kinds;
        self
    }

    /// Validate and build the policy.
    pub fn build(self) -> Result<RetryPolicy, ConfigError> {
        let max_attempts = NonZeroU32::new(self.max_attempts).ok_or(ConfigError::ZeroAttempts)?;
        if self.retryable.is_empty() {
            return Err(ConfigError::EmptyKinds {
                handler: "RetryHandler",
            });
        }
        Ok(RetryPolicy {
            max_attempts,
            retryable: self.retryable,
        })
    }
}

/// A handler that re-runs the whole rest of the chain on retryable faults.
///
/// The label is written once per entry, not once per attempt. Every attempt
/// re-runs every downstream element, side effects included.
///
/// - An attempt that completes ends the invocation successfully.
/// - A retryable fault starts another attempt while the budget lasts; once it
///   is spent, the fault from the final attempt is returned as is.
/// - Any other fault is returned immediately.
///
/// There is no delay between attempts.
#[derive(Clone)]
pub struct RetryHandler {
    label: Cow<'static, str>,
    policy: RetryPolicy,
    sink: SharedSink,
}

impl RetryHandler {
    /// Create a retry handler.
    pub fn new(label: impl Into<Cow<'static, str>>, policy: RetryPolicy, sink: SharedSink) -> Self {
        Self {
            label: label.into(),
            policy,
            sink,
        }
    }

    /// The label written on every entry.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Decide whether the outcome of an attempt ends the invocation.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn settled(&self, outcome: &Outcome, attempt: u32, remaining: u32) -> bool {
        let Err(fault) = outcome else {
            return true;
        };
        if !self.policy.is_retryable(fault) {
            return true;
        }
        #[cfg(feature = "tracing")]
        {
            if remaining > 0 {
                tracing::debug!(retry = %self.label, attempt, %fault, "retrying downstream");
            } else {
                tracing::warn!(retry = %self.label, attempt, %fault, "retries exhausted");
            }
        }
        remaining == 0
    }
}

impl std::fmt::Debug for RetryHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryHandler")
            .field("label", &self.label)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Handler for RetryHandler {
    async fn handle(&self, next: Next<'_>) -> Outcome {
        self.sink.emit(&self.label);
        let mut replay = next.replay(self.policy.max_attempts);
        let mut outcome = Ok(());
        while let Some(attempt) = replay.attempt() {
            outcome = attempt.await;
            if self.settled(&outcome, replay.attempts_made(), replay.remaining()) {
                break;
            }
        }
        outcome
    }
}

impl SyncHandler for RetryHandler {
    fn handle(&self, next: SyncNext<'_>) -> Outcome {
        self.sink.emit(&self.label);
        let mut replay = next.replay(self.policy.max_attempts);
        let mut outcome = Ok(());
        while let Some(attempt) = replay.attempt() {
            outcome = attempt;
            if self.settled(&outcome, replay.attempts_made(), replay.remaining()) {
                break;
            }
        }
        outcome
    }
}
