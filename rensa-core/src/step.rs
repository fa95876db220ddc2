//! # Pass-through steps
//!
//! A [`Step`] is the simplest chain element: it performs its side effect and
//! then decides whether the rest of the chain runs. It never sees the
//! continuation, so it cannot run it twice, catch what it raises, or do work
//! after it returns.
//!
//! Because a step has nothing left to do once it has decided, the chain
//! invoker runs consecutive steps in a loop instead of nesting them.

use crate::{
    continuation::{BoxFuture, Next},
    fault::{Fault, Outcome},
    handler::Handler,
};
use std::{future::Future, sync::Arc};

/// The decision of a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the rest of the chain exactly once.
    Next,
    /// Complete normally without running the rest of the chain.
    Stop,
}

/// A pass-through chain element.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Step`",
    label = "missing `Step` implementation",
    note = "Steps must implement `enter`, returning `Flow::Next`, `Flow::Stop` or a `Fault`."
)]
pub trait Step: Send + Sync + 'static {
    /// Perform the step's side effect and decide how the chain proceeds.
    fn enter(&self) -> impl Future<Output = Result<Flow, Fault>> + Send;
}

/// Dynamic object-safe version of [`Step`].
pub trait DynStep: Send + Sync + 'static {
    /// Enter the step (dynamic dispatch version).
    fn enter_dyn(&self) -> BoxFuture<'_, Result<Flow, Fault>>;
}

impl<T: Step> DynStep for T {
    fn enter_dyn(&self) -> BoxFuture<'_, Result<Flow, Fault>> {
        Box::pin(self.enter())
    }
}

impl<S: Step> Step for Arc<S> {
    fn enter(&self) -> impl Future<Output = Result<Flow, Fault>> + Send {
        self.as_ref().enter()
    }
}

/// Adapts a [`Step`] into a [`Handler`] for manual composition.
///
/// ```rust,ignore
/// let husband = StepHandler::new(LabelStep::new("Husband", sink.clone()));
/// let after_wife = || husband.handle(Next::new(&done));
/// wife.handle(Next::new(&after_wife)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StepHandler<S> {
    step: S,
}

impl<S> StepHandler<S> {
    /// Wrap a step.
    pub fn new(step: S) -> Self {
        Self { step }
    }

    /// Get a reference to the wrapped step.
    pub fn inner(&self) -> &S {
        &self.step
    }
}

impl<S: Step> Handler for StepHandler<S> {
    async fn handle(&self, next: Next<'_>) -> Outcome {
        match self.step.enter().await? {
            Flow::Next => next.run().await,
            Flow::Stop => Ok(()),
        }
    }
}
