//! In-process query engine.
//!
//! Streams the event file once with `serde_json`, keeps only the event kinds
//! the catalogue reads, and answers each query by structural matching on
//! those events without spawning any process.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::{MetricsError, MetricsResult};

use super::traits::{Query, QueryExecutor, Selector};

const RUNNER_COUNT_PATH: &[&str] = &["buildMetrics", "actionSummary", "runnerCount"];

/// Event kinds (`.id.<kind>`) any selector reads. Other events are dropped
/// while parsing.
const RETAINED_EVENTS: &[&str] = &["started", "buildFinished", "buildMetrics", "progress"];

/// Query engine evaluating selectors over parsed build events.
#[derive(Debug, Clone)]
pub struct NativeExecutor {
    /// Retained events, or the read/parse error every query reports
    events: Result<Vec<Value>, String>,
}

impl NativeExecutor {
    /// Load the event stream at `path`.
    ///
    /// A stream that cannot be read or parsed is not an error here: each
    /// query fails individually instead, so extraction can still record a row.
    pub fn open(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file)),
            Err(e) => NativeExecutor {
                events: Err(format!("failed to open {}: {e}", path.display())),
            },
        }
    }

    /// Parse a stream of one JSON value or newline-delimited JSON values.
    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        NativeExecutor {
            events: read_events(reader),
        }
    }

    fn select<'a>(&self, events: &'a [Value], selector: &Selector) -> Vec<&'a Value> {
        match *selector {
            Selector::EventField { id, path } => events
                .iter()
                .filter(|e| has_id(e, id))
                .filter_map(|e| lookup(e, path))
                .collect(),
            Selector::RunnerCount { name, exec_kind } => events
                .iter()
                .filter(|e| is_terminal_metrics(e))
                .filter_map(|e| lookup(e, RUNNER_COUNT_PATH).and_then(Value::as_array))
                .flatten()
                .filter(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
                .filter(|entry| match exec_kind {
                    Some(kind) => entry.get("execKind").and_then(Value::as_str) == Some(kind),
                    None => true,
                })
                .filter_map(|entry| entry.get("count"))
                .collect(),
            Selector::MetricsField { path } => events
                .iter()
                .filter(|e| is_terminal_metrics(e))
                .filter_map(|e| lookup(e, path))
                .collect(),
            Selector::LastEventField { id, path } => events
                .iter()
                .rev()
                .find(|e| has_id(e, id))
                .and_then(|e| lookup(e, path))
                .into_iter()
                .collect(),
        }
    }
}

impl QueryExecutor for NativeExecutor {
    fn engine(&self) -> &str {
        "native"
    }

    fn execute(&self, query: &Query) -> MetricsResult<String> {
        let events = self.events.as_ref().map_err(|e| MetricsError::QueryFailed {
            status: "parse error".into(),
            stderr: e.clone(),
        })?;

        let lines: Vec<String> = self
            .select(events, &query.selector)
            .into_iter()
            .filter_map(render)
            .collect();

        Ok(lines.join("\n").trim().to_string())
    }
}

/// Read events line by line, buffering until a complete value parses, so a
/// single pretty-printed object and JSON Lines both work.
///
/// Invalid UTF-8 is replaced with U+FFFD, as jq does.
fn read_events<R: BufRead>(reader: R) -> Result<Vec<Value>, String> {
    let mut events = Vec::new();
    let mut pending = String::new();

    for line in reader.split(b'\n') {
        let line = line.map_err(|e| format!("failed to read event stream: {e}"))?;
        pending.push_str(&String::from_utf8_lossy(&line));
        pending.push('\n');

        let consumed = parse_complete(&pending, &mut events)?;
        pending.drain(..consumed);
    }

    if pending.trim().is_empty() {
        Ok(events)
    } else {
        Err("invalid event stream: truncated event at end of input".to_string())
    }
}

/// Parse every complete value at the front of `buffer` into `events`,
/// returning the number of bytes consumed.
fn parse_complete(buffer: &str, events: &mut Vec<Value>) -> Result<usize, String> {
    let mut stream = serde_json::Deserializer::from_str(buffer).into_iter::<Value>();
    let mut consumed = 0;
    loop {
        match stream.next() {
            Some(Ok(event)) => {
                consumed = stream.byte_offset();
                if RETAINED_EVENTS.iter().any(|kind| has_id(&event, kind)) {
                    events.push(event);
                }
            }
            // value continues on a later line
            Some(Err(e)) if e.is_eof() => return Ok(consumed),
            Some(Err(e)) => return Err(format!("invalid event stream: {e}")),
            None => return Ok(buffer.len()),
        }
    }
}

/// `.id.<kind> != null`
fn has_id(event: &Value, kind: &str) -> bool {
    event
        .get("id")
        .and_then(|id| id.get(kind))
        .is_some_and(|v| !v.is_null())
}

/// The metrics event flagged as the final message of the stream.
fn is_terminal_metrics(event: &Value) -> bool {
    has_id(event, "buildMetrics") && event.get("lastMessage") == Some(&Value::Bool(true))
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// Raw output rendering: strings unquoted, `null`/`false` produce nothing.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
