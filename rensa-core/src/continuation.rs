//! # Continuation
//!
//! A continuation is "the rest of the chain": a zero-argument operation that
//! may suspend and settles to an [`Outcome`].
//!
//! Handlers never see a continuation directly. They receive a [`Next`], which
//! can be run once, or turned into a [`Replay`] that hands out a bounded number
//! of runs. This makes the invocation policy of each handler part of its type.

use crate::fault::Outcome;
use std::{future::Future, num::NonZeroU32, pin::Pin};

/// A boxed, `Send` future, used at dynamic dispatch boundaries.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A zero-argument, possibly suspending operation.
///
/// Closures returning a future of [`Outcome`] implement this trait, which is
/// how terminal actions are usually written:
///
/// ```rust,ignore
/// let done = || async { println!("done"); Outcome::Ok(()) };
/// ```
pub trait Continuation: Send + Sync {
    /// Run the continuation.
    fn proceed(&self) -> impl Future<Output = Outcome> + Send;
}

/// Dynamic object-safe version of [`Continuation`].
pub trait DynContinuation: Send + Sync {
    /// Run the continuation (dynamic dispatch version).
    fn proceed_dyn(&self) -> BoxFuture<'_, Outcome>;
}

impl<T: Continuation> DynContinuation for T {
    fn proceed_dyn(&self) -> BoxFuture<'_, Outcome> {
        Box::pin(self.proceed())
    }
}

impl<F, Fut> Continuation for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Outcome> + Send,
{
    fn proceed(&self) -> impl Future<Output = Outcome> + Send {
        (self)()
    }
}

/// The remainder of a chain, as handed to a handler.
///
/// `Next` is neither `Copy` nor `Clone`: [`Next::run`] consumes it, so a plain
/// handler can call its continuation at most once. Handlers that re-execute
/// downstream work must declare a bound up front with [`Next::replay`].
pub struct Next<'a> {
    rest: &'a dyn DynContinuation,
}

impl<'a> Next<'a> {
    /// Wrap a continuation.
    pub fn new(rest: &'a dyn DynContinuation) -> Self {
        Self { rest }
    }

    /// Run the rest of the chain once.
    pub fn run(self) -> BoxFuture<'a, Outcome> {
        self.rest.proceed_dyn()
    }

    /// Allow the rest of the chain to be run up to `limit` times.
    pub fn replay(self, limit: NonZeroU32) -> Replay<'a> {
        Replay {
            rest: self.rest,
            limit: limit.get(),
            made: 0,
        }
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// A bounded budget of runs over the rest of a chain.
pub struct Replay<'a> {
    rest: &'a dyn DynContinuation,
    limit: u32,
    made: u32,
}

impl<'a> Replay<'a> {
    /// Start the next run, or `None` once the budget is spent.
    pub fn attempt(&mut self) -> Option<BoxFuture<'a, Outcome>> {
        if self.made >= self.limit {
            return None;
        }
        self.made += 1;
        Some(self.rest.proceed_dyn())
    }

    /// Number of runs started so far.
    pub fn attempts_made(&self) -> u32 {
        self.made
    }

    /// Number of runs still available.
    pub fn remaining(&self) -> u32 {
        self.limit - self.made
    }

    /// The total budget.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl std::fmt::Debug for Replay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Replay")
            .field("limit", &self.limit)
            .field("made", &self.made)
            .finish_non_exhaustive()
    }
}
