//! Pipeline output sinks
//!
//! Sinks accept per-page outcomes from the page driver and render them for a
//! shell pipeline: successful projections as plain JSON documents, failures
//! as a structured error document. One document per outcome, emitted the
//! moment the page resolves.

use crate::error::Error;
use crate::pager::{OutcomeSink, PageOutcome};
use serde_json::{json, Value};
use std::io::{self, Write};

/// Render a failure outcome as a structured error document
pub fn error_document(err: &Error) -> Value {
    json!({
        "error": {
            "message": err.to_string()
        }
    })
}

// ============================================================================
// JSON Line Sink
// ============================================================================

/// Writes one JSON document per outcome to a writer.
///
/// Compact (one line per document) by default; pretty mode indents for human
/// consumption.
pub struct JsonLineSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl JsonLineSink<io::Stdout> {
    /// Create a sink writing to stdout
    pub fn stdout(pretty: bool) -> Self {
        Self::new(io::stdout(), pretty)
    }
}

impl<W: Write> JsonLineSink<W> {
    /// Create a sink writing to the given writer
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, doc: &Value) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        rendered.unwrap_or_default()
    }
}

impl<W: Write + Send> OutcomeSink for JsonLineSink<W> {
    fn emit(&mut self, outcome: PageOutcome) {
        let doc = match outcome {
            PageOutcome::Page(value) => value,
            PageOutcome::Failed(err) => error_document(&err),
        };
        // A broken pipe downstream is not our error to report
        let _ = writeln!(self.writer, "{}", self.render(&doc));
    }
}

// ============================================================================
// Collect Sink
// ============================================================================

/// In-memory sink for tests and embedding
#[derive(Debug, Default)]
pub struct CollectSink {
    /// All outcomes, in emission order
    pub outcomes: Vec<PageOutcome>,
}

impl CollectSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Successfully projected page values, in emission order
    pub fn pages(&self) -> Vec<&Value> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PageOutcome::Page(value) => Some(value),
                PageOutcome::Failed(_) => None,
            })
            .collect()
    }

    /// Number of failure outcomes
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

impl OutcomeSink for CollectSink {
    fn emit(&mut self, outcome: PageOutcome) {
        self.outcomes.push(outcome);
    }
}

#[cfg(test)]
mod tests;
