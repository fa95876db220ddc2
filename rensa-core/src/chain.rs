//! # Chain invoker
//!
//! A [`Chain`] is an ordered, immutable sequence of [`Link`]s followed by a
//! terminal continuation. Insertion order is dispatch order.
//!
//! Invoking a chain at index `i` runs link `i` with a continuation that
//! invokes the chain at `i + 1`. The terminal sits at index `len()`, after the
//! last link; invoking past it completes without doing anything.
//!
//! Runs of consecutive [`Step`]s are dispatched in a loop, the same way a
//! sequential delivery walks a list of hooks, so nesting only happens where a
//! [`Handler`] wraps the rest of the chain.
//!
//! # Depth
//!
//! The length of a chain is unbounded as far as steps go. Every [`Handler`]
//! link, however, stays suspended around the rest of the chain until it
//! settles, and polling the innermost element passes through one poll frame
//! per pending handler. Chains with thousands of nested handlers can exhaust
//! the thread's stack; keep handler nesting in the hundreds, or drive very
//! deep chains on a thread with a larger stack.

use crate::{
    continuation::{Continuation, DynContinuation, Next},
    fault::Outcome,
    handler::{DynHandler, Handler},
    step::{DynStep, Flow, Step},
};
use std::{fmt, future::Future};

/// One element of a [`Chain`].
pub enum Link {
    /// A pass-through element, dispatched iteratively.
    Step(Box<dyn DynStep>),
    /// An element wrapping the rest of the chain.
    Handler(Box<dyn DynHandler>),
}

impl Link {
    /// Box a step.
    pub fn step<S: Step>(step: S) -> Self {
        Link::Step(Box::new(step))
    }

    /// Box a handler.
    pub fn handler<H: Handler>(handler: H) -> Self {
        Link::Handler(Box::new(handler))
    }

    /// Returns `true` for pass-through links.
    pub fn is_step(&self) -> bool {
        matches!(self, Link::Step(_))
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Step(_) => f.write_str("Link::Step"),
            Link::Handler(_) => f.write_str("Link::Handler"),
        }
    }
}

/// An ordered sequence of links plus a terminal continuation.
///
/// A chain is immutable once built and can be invoked any number of times;
/// every invocation walks the same links in the same order.
///
/// # Example
///
/// ```rust,ignore
/// let chain = Chain::builder()
///     .handler(FilterHandler::invalid_operation("Filter", sink.clone())?)
///     .step(LabelStep::new("Son", sink.clone()))
///     .step(LabelStep::new("Wife", sink.clone()))
///     .build(move || async move { done.emit("done"); Outcome::Ok(()) });
///
/// chain.invoke().await?;
/// ```
pub struct Chain {
    links: Vec<Link>,
    terminal: Box<dyn DynContinuation>,
}

impl Chain {
    /// Create a chain from links and a terminal continuation.
    pub fn new<T>(links: Vec<Link>, terminal: T) -> Self
    where
        T: Continuation + 'static,
    {
        Self {
            links,
            terminal: Box::new(terminal),
        }
    }

    /// Start building a chain.
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Number of links, not counting the terminal.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the chain has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The links of this chain, in dispatch order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Invoke the whole chain.
    pub fn invoke(&self) -> impl Future<Output = Outcome> + Send + '_ {
        self.invoke_from(0)
    }

    /// Invoke the chain starting at link `index`.
    ///
    /// `index == len()` runs only the terminal. Any index past the terminal
    /// completes immediately.
    pub fn invoke_from(&self, index: usize) -> impl Future<Output = Outcome> + Send + '_ {
        let cursor = self.links.get(index..).map(|links| Cursor {
            links,
            terminal: self.terminal.as_ref(),
        });
        async move {
            match cursor {
                Some(cursor) => cursor.proceed().await,
                None => Ok(()),
            }
        }
    }
}

impl Continuation for Chain {
    fn proceed(&self) -> impl Future<Output = Outcome> + Send {
        self.invoke()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

/// The not-yet-run suffix of a chain.
struct Cursor<'a> {
    links: &'a [Link],
    terminal: &'a dyn DynContinuation,
}

impl Continuation for Cursor<'_> {
    async fn proceed(&self) -> Outcome {
        for (index, link) in self.links.iter().enumerate() {
            match link {
                Link::Step(step) => match step.enter_dyn().await? {
                    Flow::Next => continue,
                    Flow::Stop => return Ok(()),
                },
                Link::Handler(handler) => {
                    let rest = Cursor {
                        links: &self.links[index + 1..],
                        terminal: self.terminal,
                    };
                    return handler.as_ref().handle_dyn(Next::new(&rest)).await;
                }
            }
        }
        self.terminal.proceed_dyn().await
    }
}

/// Builder for [`Chain`].
#[derive(Debug, Default)]
pub struct ChainBuilder {
    links: Vec<Link>,
}

impl ChainBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Append a pass-through step.
    pub fn step<S: Step>(mut self, step: S) -> Self {
        self.links.push(Link::step(step));
        self
    }

    /// Append a wrapping handler.
    pub fn handler<H: Handler>(mut self, handler: H) -> Self {
        self.links.push(Link::handler(handler));
        self
    }

    /// Append an already boxed link.
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Finish the chain with a terminal continuation.
    pub fn build<T>(self, terminal: T) -> Chain
    where
        T: Continuation + 'static,
    {
        Chain::new(self.links, terminal)
    }

    /// Finish the chain with a terminal that completes immediately.
    pub fn finish(self) -> Chain {
        self.build(|| std::future::ready(Outcome::Ok(())))
    }
}
