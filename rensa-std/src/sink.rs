//! Log sinks: where chain elements write their log lines.
//!
//! Every standard handler writes one line per logical event to a shared,
//! ordered [`LogSink`]. The accumulated lines are the observable record of a
//! chain invocation: top-down call order, then bottom-up unwind order.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A serialized writer of log lines.
pub trait LogSink: Send + Sync + 'static {
    /// Write one line. The sink appends the line terminator.
    fn emit(&self, line: &str);
}

/// A sink shared by every element of a chain.
pub type SharedSink = Arc<dyn LogSink>;

/// Writes each line to standard output.
///
/// Stdout is locked for the duration of each line, so concurrent emitters
/// never interleave within a line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// A shared handle to the stdout sink.
    pub fn shared() -> SharedSink {
        Arc::new(StdoutSink)
    }
}

impl LogSink for StdoutSink {
    fn emit(&self, line: &str) {
        let mut out = io::stdout().lock();
        // Nowhere left to report a failed stdout write.
        let _ = writeln!(out, "{line}");
    }
}

/// Records lines in memory, in emission order.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// chain another.
///
/// # Example
///
/// ```rust,ignore
/// let sink = MemorySink::new();
/// let chain = Chain::builder()
///     .step(LabelStep::new("Son", sink.shared()))
///     .finish();
///
/// chain.invoke().await?;
/// assert_eq!(sink.contents(), "Son\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle to this sink's buffer.
    pub fn shared(&self) -> SharedSink {
        Arc::new(self.clone())
    }

    /// Get a copy of the recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// The recorded lines, each followed by a newline.
    pub fn contents(&self) -> String {
        self.buffer().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    /// Discard all recorded lines.
    pub fn clear(&self) {
        self.buffer().clear();
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        // A panicking emitter cannot leave a half-pushed line behind.
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for MemorySink {
    fn emit(&self, line: &str) {
        self.buffer().push(line.to_owned());
    }
}

/// Forwards each line to every inner sink, in order.
#[derive(Clone, Default)]
pub struct TeeSink {
    sinks: Vec<SharedSink>,
}

impl TeeSink {
    /// Create a tee over the given sinks.
    pub fn new(sinks: Vec<SharedSink>) -> Self {
        Self { sinks }
    }

    /// Add another sink.
    pub fn with(mut self, sink: SharedSink) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl LogSink for TeeSink {
    fn emit(&self, line: &str) {
        for sink in &self.sinks {
            sink.emit(line);
        }
    }
}

/// Emits each line as a `tracing` event at `INFO` level under the `rensa`
/// target.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl LogSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "rensa", "{line}");
    }
}
