//! Driving asynchronous chains from synchronous code.

use futures::executor::block_on;
use rensa_core::{Chain, Outcome};

/// Invoke an async chain on the current thread, blocking until it settles.
///
/// Suspension points inside the chain are driven by a local executor, so the
/// chain must not depend on a particular runtime's reactor. Chains that use
/// `TimeoutHandler` need a tokio runtime and cannot be driven this way.
pub fn invoke_blocking(chain: &Chain) -> Outcome {
    block_on(chain.invoke())
}
