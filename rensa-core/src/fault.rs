//! Faults: the unit of propagation, suppression and retry.
//!
//! A [`Fault`] carries a [`FaultKind`] and an opaque message. Filter and retry
//! handlers match on the kind only, using a [`FaultKinds`] set that must be
//! configured explicitly. Nothing in the framework ever matches on the message.

use bitflags::bitflags;
use std::{borrow::Cow, fmt};
use thiserror::Error;

/// The result of running a handler, a step's continuation, or a whole chain.
pub type Outcome = Result<(), Fault>;

/// The kind of a [`Fault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FaultKind {
    /// An operation was invoked in a state where it is not valid.
    InvalidOperation,
    /// A generic application failure. Never filtered or retried unless asked.
    Application,
    /// Downstream work did not settle within its time bound.
    Timeout,
}

impl FaultKind {
    /// The stable, kebab-case name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            FaultKind::InvalidOperation => "invalid-operation",
            FaultKind::Application => "application",
            FaultKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of [`FaultKind`]s a filter or retry handler acts on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FaultKinds: u8 {
        /// [`FaultKind::InvalidOperation`]
        const INVALID_OPERATION = 1 << 0;
        /// [`FaultKind::Application`]
        const APPLICATION = 1 << 1;
        /// [`FaultKind::Timeout`]
        const TIMEOUT = 1 << 2;
    }
}

impl FaultKinds {
    /// Returns `true` if the fault's kind is a member of this set.
    pub fn matches(&self, fault: &Fault) -> bool {
        self.contains(fault.kind().into())
    }
}

impl From<FaultKind> for FaultKinds {
    fn from(kind: FaultKind) -> Self {
        match kind {
            FaultKind::InvalidOperation => FaultKinds::INVALID_OPERATION,
            FaultKind::Application => FaultKinds::APPLICATION,
            FaultKind::Timeout => FaultKinds::TIMEOUT,
        }
    }
}

/// A tagged error raised by a handler and propagated up the chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: Cow<'static, str>,
}

impl Fault {
    /// Create a fault of the given kind.
    pub fn new(kind: FaultKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create an [`FaultKind::InvalidOperation`] fault.
    pub fn invalid_operation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::InvalidOperation, message)
    }

    /// Create an [`FaultKind::Application`] fault.
    pub fn application(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::Application, message)
    }

    /// Create a [`FaultKind::Timeout`] fault.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(FaultKind::Timeout, message)
    }

    /// Wrap an arbitrary error as a fault of the given kind.
    ///
    /// Only the error's rendered message is kept.
    pub fn from_error<E>(kind: FaultKind, error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::new(kind, error.to_string())
    }

    /// The kind of this fault.
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    /// The message of this fault.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this fault is of the given kind.
    pub fn is(&self, kind: FaultKind) -> bool {
        self.kind == kind
    }
}
