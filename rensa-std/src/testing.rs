//! Testing utilities for Rensa.
//!
//! Fault-injecting steps for exercising filters and retriers, and a
//! runtime-agnostic suspension point.
//!
//! - [`FaultingStep`]: writes its label, then always raises
//! - [`FlakyStep`]: writes its label, raises on its first `n` entries, then continues
//! - [`EntryScope`]: restarts a flaky step's count at the start of each invocation
//! - [`yield_now`]: suspends the current task once

use crate::sink::SharedSink;
use futures::future::poll_fn;
use rensa_core::{Fault, FaultKind, Flow, Step, blocking::SyncStep};
use std::{
    borrow::Cow,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    task::Poll,
};

/// Suspend the current task once, then resume.
///
/// Works under any executor: the task wakes itself before returning
/// `Pending`, so the executor polls it again after giving others a turn.
pub async fn yield_now() {
    let mut yielded = false;
    poll_fn(move |cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

// ============================================================================
// Faulting Step
// ============================================================================

/// A step that writes its label, then always raises a fault.
///
/// # Example
///
/// ```rust,ignore
/// let evil = FaultingStep::new("EvilStep", FaultKind::InvalidOperation, sink.clone())
///     .with_message("Boomer!")
///     .suspending();
/// ```
#[derive(Clone)]
pub struct FaultingStep {
    label: Cow<'static, str>,
    kind: FaultKind,
    message: Cow<'static, str>,
    suspend: bool,
    sink: SharedSink,
}

impl FaultingStep {
    /// Create a step raising faults of `kind`.
    pub fn new(label: impl Into<Cow<'static, str>>, kind: FaultKind, sink: SharedSink) -> Self {
        Self {
            label: label.into(),
            kind,
            message: Cow::Borrowed("injected fault"),
            suspend: false,
            sink,
        }
    }

    /// Set the message of raised faults.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Suspend once between writing the label and raising.
    pub fn suspending(mut self) -> Self {
        self.suspend = true;
        self
    }

    fn fault(&self) -> Fault {
        Fault::new(self.kind, self.message.clone())
    }
}

impl Step for FaultingStep {
    async fn enter(&self) -> Result<Flow, Fault> {
        self.sink.emit(&self.label);
        if self.suspend {
            yield_now().await;
        }
        Err(self.fault())
    }
}

impl SyncStep for FaultingStep {
    fn enter(&self) -> Result<Flow, Fault> {
        self.sink.emit(&self.label);
        Err(self.fault())
    }
}

// ============================================================================
// Flaky Step
// ============================================================================

/// A step that raises on its first `failures` entries, then continues.
///
/// Entries are counted per invocation when the chain starts with the step's
/// [`EntryScope`]; place the scope above any retrier so every attempt of one
/// invocation shares the count. Without a scope the count runs for the life of
/// the instance until [`FlakyStep::reset`].
///
/// # Example
///
/// ```rust,ignore
/// let fails_once = FlakyStep::new("FailsTwice", 1, sink.clone());
/// let chain = Chain::builder()
///     .step(fails_once.scope())
///     .handler(retry)
///     .step(fails_once)
///     .finish();
/// ```
pub struct FlakyStep {
    label: Cow<'static, str>,
    kind: FaultKind,
    failures: u32,
    entries: Arc<AtomicU32>,
    suspend: bool,
    sink: SharedSink,
}

impl FlakyStep {
    /// Create a step that raises [`FaultKind::InvalidOperation`] on its first
    /// `failures` entries.
    pub fn new(label: impl Into<Cow<'static, str>>, failures: u32, sink: SharedSink) -> Self {
        Self {
            label: label.into(),
            kind: FaultKind::InvalidOperation,
            failures,
            entries: Arc::new(AtomicU32::new(0)),
            suspend: false,
            sink,
        }
    }

    /// Raise faults of this kind instead.
    pub fn with_kind(mut self, kind: FaultKind) -> Self {
        self.kind = kind;
        self
    }

    /// Suspend once on every entry, between the label and the decision.
    pub fn suspending(mut self) -> Self {
        self.suspend = true;
        self
    }

    /// A step that restarts this step's count whenever it is entered.
    pub fn scope(&self) -> EntryScope {
        EntryScope {
            entries: Arc::clone(&self.entries),
        }
    }

    /// Number of entries counted so far.
    pub fn entries(&self) -> u32 {
        self.entries.load(Ordering::SeqCst)
    }

    /// Forget all previous entries.
    pub fn reset(&self) {
        self.entries.store(0, Ordering::SeqCst);
    }

    fn decide(&self) -> Result<Flow, Fault> {
        let entry = self.entries.fetch_add(1, Ordering::SeqCst) + 1;
        if entry <= self.failures {
            Err(Fault::new(
                self.kind,
                format!("{} failed on entry {entry}", self.label),
            ))
        } else {
            Ok(Flow::Next)
        }
    }
}

impl Step for FlakyStep {
    async fn enter(&self) -> Result<Flow, Fault> {
        self.sink.emit(&self.label);
        if self.suspend {
            yield_now().await;
        }
        self.decide()
    }
}

impl SyncStep for FlakyStep {
    fn enter(&self) -> Result<Flow, Fault> {
        self.sink.emit(&self.label);
        self.decide()
    }
}

// ============================================================================
// Entry Scope
// ============================================================================

/// A silent step that starts a fresh entry count for one [`FlakyStep`].
///
/// Created by [`FlakyStep::scope`]. Entering it marks the start of an
/// invocation, so re-invoking the same chain repeats the same log.
#[derive(Clone)]
pub struct EntryScope {
    entries: Arc<AtomicU32>,
}

impl EntryScope {
    fn restart(&self) -> Result<Flow, Fault> {
        self.entries.store(0, Ordering::SeqCst);
        Ok(Flow::Next)
    }
}

impl Step for EntryScope {
    async fn enter(&self) -> Result<Flow, Fault> {
        self.restart()
    }
}

impl SyncStep for EntryScope {
    fn enter(&self) -> Result<Flow, Fault> {
        self.restart()
    }
}
