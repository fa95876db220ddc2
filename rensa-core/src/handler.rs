//! # Handlers
//!
//! A [`Handler`] receives the rest of the chain as a [`Next`] and decides what
//! to do with it: run it once, run it again under a bounded [`Replay`], catch
//! what it raises, or never run it at all.
//!
//! Filters and retriers are handlers. Plain pass-through elements are better
//! written as a [`Step`], which the invoker can dispatch without nesting.
//!
//! [`Replay`]: crate::Replay
//! [`Step`]: crate::Step

use crate::{
    continuation::{BoxFuture, Next},
    fault::Outcome,
};
use std::{future::Future, sync::Arc};

/// A chain element that wraps the rest of the chain.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Handler`",
    label = "missing `Handler` implementation",
    note = "Handlers must implement `handle(&self, next: Next<'_>)`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Handle one invocation, delegating downstream through `next`.
    fn handle(&self, next: Next<'_>) -> impl Future<Output = Outcome> + Send;
}

/// Dynamic object-safe version of [`Handler`].
///
/// Use this trait when handlers are stored in collections, as [`Chain`] does.
///
/// [`Chain`]: crate::Chain
pub trait DynHandler: Send + Sync + 'static {
    /// Handle one invocation (dynamic dispatch version).
    fn handle_dyn<'a>(&'a self, next: Next<'a>) -> BoxFuture<'a, Outcome>;
}

impl<T: Handler> DynHandler for T {
    fn handle_dyn<'a>(&'a self, next: Next<'a>) -> BoxFuture<'a, Outcome> {
        Box::pin(self.handle(next))
    }
}

impl Handler for Box<dyn DynHandler> {
    async fn handle(&self, next: Next<'_>) -> Outcome {
        (**self).handle_dyn(next).await
    }
}

impl<H: Handler> Handler for Arc<H> {
    fn handle(&self, next: Next<'_>) -> impl Future<Output = Outcome> + Send {
        self.as_ref().handle(next)
    }
}
