#![allow(dead_code)]

use rensa::{
    ChainBuilder, Continuation, FaultKinds, Outcome, SharedSink,
    blocking::{SyncChainBuilder, SyncContinuation},
    handlers::{LabelStep, RetryHandler, RetryPolicy},
};
use std::sync::Arc;

// ============================================================================
// Family Steps
// ============================================================================

/// Labels of the pass-through steps every scenario starts with.
pub const FAMILY: [&str; 3] = ["Son", "Wife", "Husband"];

/// Append the family steps to an async chain.
pub fn family(builder: ChainBuilder, sink: &SharedSink) -> ChainBuilder {
    FAMILY.iter().fold(builder, |builder, label| {
        builder.step(LabelStep::new(*label, Arc::clone(sink)))
    })
}

/// Append the family steps to a synchronous chain.
pub fn sync_family(builder: SyncChainBuilder, sink: &SharedSink) -> SyncChainBuilder {
    FAMILY.iter().fold(builder, |builder, label| {
        builder.step(LabelStep::new(*label, Arc::clone(sink)))
    })
}

/// The family labels, newline-terminated, followed by `leaf`.
pub fn family_run(leaf: &str) -> String {
    let mut run = String::new();
    for label in FAMILY.iter().copied().chain([leaf]) {
        run.push_str(label);
        run.push('\n');
    }
    run
}

// ============================================================================
// Terminals and Handlers
// ============================================================================

/// A terminal that writes `done`.
pub fn done(sink: &SharedSink) -> impl Continuation + 'static {
    let sink = Arc::clone(sink);
    move || {
        let sink = Arc::clone(&sink);
        async move {
            sink.emit("done");
            Outcome::Ok(())
        }
    }
}

/// A synchronous terminal that writes `done`.
pub fn sync_done(sink: &SharedSink) -> impl SyncContinuation + 'static {
    let sink = Arc::clone(sink);
    move || {
        sink.emit("done");
        Outcome::Ok(())
    }
}

/// A retrier labelled `Retry`, retrying invalid-operation faults.
pub fn retry(max_attempts: u32, sink: &SharedSink) -> RetryHandler {
    let policy = RetryPolicy::new(max_attempts, FaultKinds::INVALID_OPERATION)
        .expect("valid retry policy");
    RetryHandler::new("Retry", policy, Arc::clone(sink))
}
