//! # Synchronous chains
//!
//! The blocking counterpart of the async API: [`SyncStep`], [`SyncHandler`]
//! and [`SyncChain`] follow the same dispatch order, the same invocation
//! bounds and the same fault propagation as [`Step`], [`Handler`] and
//! [`Chain`], without suspension points.
//!
//! [`Step`]: crate::Step
//! [`Handler`]: crate::Handler
//! [`Chain`]: crate::Chain

use crate::{
    fault::{Fault, Outcome},
    step::Flow,
};
use std::{fmt, num::NonZeroU32, sync::Arc};

/// A zero-argument operation that settles to an [`Outcome`].
pub trait SyncContinuation: Send + Sync {
    /// Run the continuation.
    fn proceed(&self) -> Outcome;
}

impl<F> SyncContinuation for F
where
    F: Fn() -> Outcome + Send + Sync,
{
    fn proceed(&self) -> Outcome {
        (self)()
    }
}

/// The remainder of a synchronous chain. See [`Next`](crate::Next).
pub struct SyncNext<'a> {
    rest: &'a dyn SyncContinuation,
}

impl<'a> SyncNext<'a> {
    /// Wrap a continuation.
    pub fn new(rest: &'a dyn SyncContinuation) -> Self {
        Self { rest }
    }

    /// Run the rest of the chain once.
    pub fn run(self) -> Outcome {
        self.rest.proceed()
    }

    /// Allow the rest of the chain to be run up to `limit` times.
    pub fn replay(self, limit: NonZeroU32) -> SyncReplay<'a> {
        SyncReplay {
            rest: self.rest,
            limit: limit.get(),
            made: 0,
        }
    }
}

impl fmt::Debug for SyncNext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncNext").finish_non_exhaustive()
    }
}

/// A bounded budget of runs over the rest of a synchronous chain.
pub struct SyncReplay<'a> {
    rest: &'a dyn SyncContinuation,
    limit: u32,
    made: u32,
}

impl SyncReplay<'_> {
    /// Run the rest of the chain again, or `None` once the budget is spent.
    pub fn attempt(&mut self) -> Option<Outcome> {
        if self.made >= self.limit {
            return None;
        }
        self.made += 1;
        Some(self.rest.proceed())
    }

    /// Number of runs made so far.
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

impl fmt::Debug for SyncReplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncReplay")
            .field("limit", &self.limit)
            .field("made", &self.made)
            .finish_non_exhaustive()
    }
}

/// A synchronous pass-through chain element.
pub trait SyncStep: Send + Sync + 'static {
    /// Perform the step's side effect and decide how the chain proceeds.
    fn enter(&self) -> Result<Flow, Fault>;
}

impl<S: SyncStep> SyncStep for Arc<S> {
    fn enter(&self) -> Result<Flow, Fault> {
        self.as_ref().enter()
    }
}

/// A synchronous chain element wrapping the rest of the chain.
pub trait SyncHandler: Send + Sync + 'static {
    /// Handle one invocation, delegating downstream through `next`.
    fn handle(&self, next: SyncNext<'_>) -> Outcome;
}

impl<H: SyncHandler> SyncHandler for Arc<H> {
    fn handle(&self, next: SyncNext<'_>) -> Outcome {
        self.as_ref().handle(next)
    }
}

/// Adapts a [`SyncStep`] into a [`SyncHandler`] for manual composition.
#[derive(Debug, Clone)]
pub struct SyncStepHandler<S> {
    step: S,
}

impl<S> SyncStepHandler<S> {
    /// Wrap a step.
    pub fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S: SyncStep> SyncHandler for SyncStepHandler<S> {
    fn handle(&self, next: SyncNext<'_>) -> Outcome {
        match self.step.enter()? {
            Flow::Next => next.run(),
            Flow::Stop => Ok(()),
        }
    }
}

/// One element of a [`SyncChain`].
pub enum SyncLink {
    /// A pass-through element, dispatched iteratively.
    Step(Box<dyn SyncStep>),
    /// An element wrapping the rest of the chain.
    Handler(Box<dyn SyncHandler>),
}

impl SyncLink {
    /// Box a step.
    pub fn step<S: SyncStep>(step: S) -> Self {
        SyncLink::Step(Box::new(step))
    }

    /// Box a handler.
    pub fn handler<H: SyncHandler>(handler: H) -> Self {
        SyncLink::Handler(Box::new(handler))
    }
}

impl fmt::Debug for SyncLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncLink::Step(_) => f.write_str("SyncLink::Step"),
            SyncLink::Handler(_) => f.write_str("SyncLink::Handler"),
        }
    }
}

/// An ordered sequence of synchronous links plus a terminal continuation.
pub struct SyncChain {
    links: Vec<SyncLink>,
    terminal: Box<dyn SyncContinuation>,
}

impl SyncChain {
    /// Create a chain from links and a terminal continuation.
    pub fn new<T>(links: Vec<SyncLink>, terminal: T) -> Self
    where
        T: SyncContinuation + 'static,
    {
        Self {
            links,
            terminal: Box::new(terminal),
        }
    }

    /// Start building a chain.
    pub fn builder() -> SyncChainBuilder {
        SyncChainBuilder::default()
    }

    /// Number of links, not counting the terminal.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the chain has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Invoke the whole chain.
    pub fn invoke(&self) -> Outcome {
        self.invoke_from(0)
    }

    /// Invoke the chain starting at link `index`. See [`Chain::invoke_from`].
    ///
    /// [`Chain::invoke_from`]: crate::Chain::invoke_from
    pub fn invoke_from(&self, index: usize) -> Outcome {
        match self.links.get(index..) {
            Some(links) => SyncCursor {
                links,
                terminal: self.terminal.as_ref(),
            }
            .proceed(),
            None => Ok(()),
        }
    }
}

impl SyncContinuation for SyncChain {
    fn proceed(&self) -> Outcome {
        self.invoke()
    }
}

impl fmt::Debug for SyncChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncChain")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

struct SyncCursor<'a> {
    links: &'a [SyncLink],
    terminal: &'a dyn SyncContinuation,
}

impl SyncContinuation for SyncCursor<'_> {
    fn proceed(&self) -> Outcome {
        for (index, link) in self.links.iter().enumerate() {
            match link {
                SyncLink::Step(step) => match step.enter()? {
                    Flow::Next => continue,
                    Flow::Stop => return Ok(()),
                },
                SyncLink::Handler(handler) => {
                    let rest = SyncCursor {
                        links: &self.links[index + 1..],
                        terminal: self.terminal,
                    };
                    return handler.handle(SyncNext::new(&rest));
                }
            }
        }
        self.terminal.proceed()
    }
}

/// Builder for [`SyncChain`].
#[derive(Debug, Default)]
pub struct SyncChainBuilder {
    links: Vec<SyncLink>,
}

impl SyncChainBuilder {
    /// Append a pass-through step.
    pub fn step<S: SyncStep>(mut self, step: S) -> Self {
        self.links.push(SyncLink::step(step));
        self
    }

    /// Append a wrapping handler.
    pub fn handler<H: SyncHandler>(mut self, handler: H) -> Self {
        self.links.push(SyncLink::handler(handler));
        self
    }

    /// Finish the chain with a terminal continuation.
    pub fn build<T>(self, terminal: T) -> SyncChain
    where
        T: SyncContinuation + 'static,
    {
        SyncChain::new(self.links, terminal)
    }

    /// Finish the chain with a terminal that completes immediately.
    pub fn finish(self) -> SyncChain {
        self.build(|| Outcome::Ok(()))
    }
}
