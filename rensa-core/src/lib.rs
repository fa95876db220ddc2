//! # rensa-core
//!
//! Core traits and the chain invoker for the Rensa handler-chain framework.
//!
//! A chain is an ordered list of links followed by a terminal continuation.
//! Invocation flows top-down: each link runs, then hands control to the rest
//! of the chain. Faults flow bottom-up: a fault raised downstream unwinds
//! through every link above it unless one of them catches it.
//!
//! # Building Blocks
//!
//! ## [`Continuation`]
//!
//! "The rest of the chain": a zero-argument operation that may suspend and
//! settles to an [`Outcome`]. Handlers receive it as a [`Next`], which encodes
//! how many times they may run it.
//!
//! ## [`Step`]
//!
//! A pass-through element. It performs its side effect and answers
//! [`Flow::Next`] or [`Flow::Stop`], or raises a [`Fault`]. Consecutive steps
//! are dispatched iteratively.
//!
//! ## [`Handler`]
//!
//! An element that wraps the rest of the chain: it may catch faults raised
//! downstream, or re-run downstream work under a bounded [`Replay`].
//!
//! ## [`Chain`]
//!
//! The invoker. Immutable once built, and itself a [`Continuation`].
//!
//! The [`blocking`] module mirrors all of the above without suspension.
//!
//! # Error Types
//!
//! - [`Fault`] - Raised inside a chain, tagged with a [`FaultKind`]
//! - [`ConfigError`] - Rejected handler configuration
//! - [`RensaError`] - Top-level error type

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod blocking;
mod chain;
mod continuation;
mod error;
mod fault;
mod handler;
mod step;

// Re-exports
pub use chain::{Chain, ChainBuilder, Link};
pub use continuation::{BoxFuture, Continuation, DynContinuation, Next, Replay};
pub use error::{BoxError, ConfigError, RensaError};
pub use fault::{Fault, FaultKind, FaultKinds, Outcome};
pub use handler::{DynHandler, Handler};
pub use step::{DynStep, Flow, Step, StepHandler};
