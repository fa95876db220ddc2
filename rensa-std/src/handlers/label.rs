//! Label step - the plain pass-through element.

use crate::sink::SharedSink;
use rensa_core::{Fault, Flow, Step, blocking::SyncStep};
use std::borrow::Cow;

/// A step that writes its label to the sink, then continues.
///
/// The label is given explicitly at construction; nothing is derived from
/// type or function names at runtime.
///
/// # Example
///
/// ```rust,ignore
/// let chain = Chain::builder()
///     .step(LabelStep::new("Son", sink.clone()))
///     .step(LabelStep::new("Wife", sink.clone()))
///     .step(LabelStep::new("Husband", sink.clone()))
///     .build(done);
/// ```
#[derive(Clone)]
pub struct LabelStep {
    label: Cow<'static, str>,
    sink: SharedSink,
}

impl LabelStep {
    /// Create a label step.
    pub fn new(label: impl Into<Cow<'static, str>>, sink: SharedSink) -> Self {
        Self {
            label: label.into(),
            sink,
        }
    }

    /// The label written on every entry.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for LabelStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelStep")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Step for LabelStep {
    async fn enter(&self) -> Result<Flow, Fault> {
        self.sink.emit(&self.label);
        Ok(Flow::Next)
    }
}

impl SyncStep for LabelStep {
    fn enter(&self) -> Result<Flow, Fault> {
        self.sink.emit(&self.label);
        Ok(Flow::Next)
    }
}
