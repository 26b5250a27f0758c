//! Tests for output sinks

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;

fn sink_output(outcomes: Vec<PageOutcome>, pretty: bool) -> String {
    let mut sink = JsonLineSink::new(Vec::new(), pretty);
    for outcome in outcomes {
        sink.emit(outcome);
    }
    String::from_utf8(sink.into_inner()).unwrap()
}

#[test]
fn test_json_line_sink_one_document_per_line() {
    let output = sink_output(
        vec![
            PageOutcome::Page(json!(["a", "b"])),
            PageOutcome::Page(json!(["c"])),
        ],
        false,
    );
    assert_eq!(output, "[\"a\",\"b\"]\n[\"c\"]\n");
}

#[test]
fn test_json_line_sink_renders_failures() {
    let output = sink_output(
        vec![PageOutcome::Failed(Error::service(503, None, "unavailable"))],
        false,
    );
    let doc: Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(
        doc["error"]["message"],
        json!("Service error (HTTP 503): unavailable")
    );
}

#[test]
fn test_json_line_sink_pretty_mode() {
    let output = sink_output(vec![PageOutcome::Page(json!({"id": "c-1"}))], true);
    assert!(output.contains("\n  \"id\": \"c-1\"\n"));
}

#[test]
fn test_error_document_shape() {
    let doc = error_document(&Error::config("missing endpoint"));
    assert_eq!(
        doc,
        json!({"error": {"message": "Configuration error: missing endpoint"}})
    );
}

#[test]
fn test_collect_sink() {
    let mut sink = CollectSink::new();
    sink.emit(PageOutcome::Page(json!(1)));
    sink.emit(PageOutcome::Failed(Error::other("boom")));
    sink.emit(PageOutcome::Page(json!(2)));

    assert_eq!(sink.outcomes.len(), 3);
    assert_eq!(sink.pages(), vec![&json!(1), &json!(2)]);
    assert_eq!(sink.failures(), 1);
}
