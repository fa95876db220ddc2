//! # rensa-std
//!
//! Standard implementations for the Rensa handler-chain framework.
//!
//! This crate provides:
//! - **Log sinks**: [`LogSink`], [`MemorySink`], [`StdoutSink`], [`TeeSink`]
//! - **Standard handlers**: [`LabelStep`], [`FilterHandler`], [`RetryHandler`],
//!   and `TimeoutHandler` (feature `timeout`)
//! - **Blocking bridge**: [`invoke_blocking`]
//! - **Testing**: fault-injecting steps
//!
//! [`LogSink`]: sink::LogSink
//! [`MemorySink`]: sink::MemorySink
//! [`StdoutSink`]: sink::StdoutSink
//! [`TeeSink`]: sink::TeeSink
//! [`LabelStep`]: handlers::LabelStep
//! [`FilterHandler`]: handlers::FilterHandler
//! [`RetryHandler`]: handlers::RetryHandler
//! [`invoke_blocking`]: bridge::invoke_blocking

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use rensa_core;

// Modules
pub mod bridge;
pub mod handlers;
pub mod sink;
pub mod testing;
