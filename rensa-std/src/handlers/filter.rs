//! Filter handler - converts matching downstream faults into completion.

use crate::sink::SharedSink;
use rensa_core::{
    ConfigError, FaultKinds, Handler, Next, Outcome,
    blocking::{SyncHandler, SyncNext},
};
use std::borrow::Cow;

/// The line a [`FilterHandler`] writes when it suppresses a fault.
pub const FILTERED_MARKER: &str = "Filtered!";

/// A handler that suppresses faults of the configured kinds raised anywhere
/// downstream of it.
///
/// On entry it writes its label, then runs the rest of the chain once:
///
/// - downstream completes: the filter is transparent.
/// - downstream raises a fault whose kind is in the filter's set: the marker
///   line is written and the invocation completes normally.
/// - any other fault is returned unchanged.
///
/// The kind set must be non-empty; there is no catch-all filter.
///
/// # Example
///
/// ```rust,ignore
/// let filter = FilterHandler::builder(sink.clone())
///     .label("Filter")
///     .kinds(FaultKinds::INVALID_OPERATION)
///     .build()?;
/// ```
#[derive(Clone)]
pub struct FilterHandler {
    label: Cow<'static, str>,
    kinds: FaultKinds,
    marker: Cow<'static, str>,
    sink: SharedSink,
}

impl FilterHandler {
    /// Create a filter for the given kinds.
    pub fn new(
        label: impl Into<Cow<'static, str>>,
        kinds: FaultKinds,
        sink: SharedSink,
    ) -> Result<Self, ConfigError> {
        Self::builder(sink).label(label).kinds(kinds).build()
    }

    /// A filter for [`FaultKind::InvalidOperation`] faults.
    ///
    /// [`FaultKind::InvalidOperation`]: rensa_core::FaultKind::InvalidOperation
    pub fn invalid_operation(label: impl Into<Cow<'static, str>>, sink: SharedSink) -> Self {
        Self {
            label: label.into(),
            kinds: FaultKinds::INVALID_OPERATION,
            marker: Cow::Borrowed(FILTERED_MARKER),
            sink,
        }
    }

    /// Start configuring a filter.
    pub fn builder(sink: SharedSink) -> FilterBuilder {
        FilterBuilder {
            label: Cow::Borrowed("Filter"),
            kinds: FaultKinds::empty(),
            marker: Cow::Borrowed(FILTERED_MARKER),
            sink,
        }
    }

    /// The label written on every entry.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The kinds this filter suppresses.
    pub fn kinds(&self) -> FaultKinds {
        self.kinds
    }

    fn settle(&self, outcome: Outcome) -> Outcome {
        match outcome {
            Err(fault) if self.kinds.matches(&fault) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(filter = %self.label, %fault, "suppressed downstream fault");
                self.sink.emit(&self.marker);
                Ok(())
            }
            other => other,
        }
    }
}

impl std::fmt::Debug for FilterHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterHandler")
            .field("label", &self.label)
            .field("kinds", &self.kinds)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

impl Handler for FilterHandler {
    async fn handle(&self, next: Next<'_>) -> Outcome {
        self.sink.emit(&self.label);
        let outcome = next.run().await;
        self.settle(outcome)
    }
}

impl SyncHandler for FilterHandler {
    fn handle(&self, next: SyncNext<'_>) -> Outcome {
        self.sink.emit(&self.label);
        let outcome = next.run();
        self.settle(outcome)
    }
}

/// Builder for [`FilterHandler`].
pub struct FilterBuilder {
    label: Cow<'static, str>,
    kinds: FaultKinds,
    marker: Cow<'static, str>,
    sink: SharedSink,
}

impl FilterBuilder {
    /// Set the label written on entry. Defaults to `"Filter"`.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Add kinds to suppress.
    pub fn kinds(mut self, kinds: FaultKinds) -> Self {
        self.kinds |= kinds;
        self
    }

    /// Set the line written on suppression. Defaults to [`FILTERED_MARKER`].
    pub fn marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Validate and build the filter.
    pub fn build(self) -> Result<FilterHandler, ConfigError> {
        if self.kinds.is_empty() {
            return Err(ConfigError::EmptyKinds {
                handler: "FilterHandler",
            });
        }
        Ok(FilterHandler {
            label: self.label,
            kinds: self.kinds,
            marker: self.marker,
            sink: self.sink,
        })
    }
}
