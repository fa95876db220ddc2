//! # rensa - Composable Handler Chains
//!
//! `rensa` runs an ordered chain of handlers around a terminal action.
//! Invocation flows top-down through the chain; faults unwind bottom-up
//! through every element above them unless a filter suppresses them or a
//! retrier re-runs the downstream work.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rensa::{Chain, MemorySink, Outcome, handlers::{FilterHandler, LabelStep}};
//!
//! let sink = MemorySink::new();
//! let log = sink.shared();
//!
//! let chain = Chain::builder()
//!     .handler(FilterHandler::invalid_operation("Filter", log.clone()))
//!     .step(LabelStep::new("Son", log.clone()))
//!     .step(LabelStep::new("Wife", log.clone()))
//!     .build(move || {
//!         let log = log.clone();
//!         async move {
//!             log.emit("done");
//!             Outcome::Ok(())
//!         }
//!     });
//!
//! chain.invoke().await?;
//! assert_eq!(sink.contents(), "Filter\nSon\nWife\ndone\n");
//! ```
//!
//! ## Synchronous chains
//!
//! The [`blocking`] module mirrors the whole API without suspension. An async
//! chain can also be driven from synchronous code with [`invoke_blocking`].
//!
//! ## Features
//!
//! All features are opt-in.
//!
//! - `macros`: the `step` attribute
//! - `tracing`: diagnostic events from the standard handlers, and `TracingSink`
//! - `timeout`: `TimeoutHandler`, backed by tokio

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use rensa_core::{
    // Error types
    BoxError,
    // Continuation
    BoxFuture,
    // Chain
    Chain,
    ChainBuilder,
    ConfigError,
    Continuation,
    DynContinuation,
    // Handler
    DynHandler,
    // Step
    DynStep,
    // Fault
    Fault,
    FaultKind,
    FaultKinds,
    Flow,
    Handler,
    Link,
    Next,
    Outcome,
    RensaError,
    Replay,
    Step,
    StepHandler,
};

// Log sinks
pub use rensa_std::sink::{LogSink, MemorySink, SharedSink, StdoutSink, TeeSink};

pub use rensa_std::bridge::invoke_blocking;

/// Synchronous chains.
pub mod blocking {
    pub use rensa_core::blocking::{
        SyncChain, SyncChainBuilder, SyncContinuation, SyncHandler, SyncLink, SyncNext,
        SyncReplay, SyncStep, SyncStepHandler,
    };
}

/// Standard chain elements.
pub mod handlers {
    #![allow(clippy::wildcard_imports)]
    pub use rensa_std::handlers::*;
}

/// Log sinks.
pub mod sink {
    #![allow(clippy::wildcard_imports)]
    pub use rensa_std::sink::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use rensa_std::testing::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::blocking::{SyncChain, SyncHandler, SyncNext, SyncStep};
    pub use crate::handlers::{FilterHandler, LabelStep, RetryHandler, RetryPolicy};
    pub use rensa_core::{
        Chain, Continuation, Fault, FaultKind, FaultKinds, Flow, Handler, Next, Outcome, Step,
    };
    pub use rensa_std::sink::{LogSink, MemorySink, SharedSink};
}

#[cfg(feature = "macros")]
pub use rensa_macros::step;
