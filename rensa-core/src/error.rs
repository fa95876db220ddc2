//! Error types for Rensa.
//!
//! - [`RensaError`] - Top-level error type
//! - [`ConfigError`] - Rejected handler or chain configuration
//!
//! Runtime failures inside a chain are [`Fault`]s, see [`crate::fault`].

use crate::fault::Fault;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Rensa operations.
#[derive(Error, Debug)]
pub enum RensaError {
    /// A fault escaped the chain.
    #[error("chain fault: {0}")]
    Fault(#[from] Fault),

    /// A handler was configured incorrectly.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while constructing handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A retry policy must allow at least one attempt.
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    /// Filters and retriers must name the fault kinds they act on.
    #[error("{handler} requires at least one fault kind")]
    EmptyKinds {
        /// The kind of handler being configured.
        handler: &'static str,
    },
}

impl From<BoxError> for RensaError {
    fn from(err: BoxError) -> Self {
        RensaError::Custom(err)
    }
}
