//! Exercise the jq engine against a fake `jq` script.

#![cfg(unix)]

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;

use bep_metrics::config::{Engine, Settings};
use bep_metrics::record_cmd::{self, RecordArgs};
use bep_metrics::storage::AppendOutcome;
use bep_metrics::MetricsError;

// Answers by filter text; the bytesSent query fails like a jq runtime error.
const FAKE_JQ: &str = r#"#!/usr/bin/env bash
if [ "$1" = "--version" ]; then
  echo "jq-1.7.1"
  exit 0
fi
echo "$@" >> "$(dirname "$0")/calls.log"
filter=""
for a in "$@"; do
  case "$a" in
    -s|-r) ;;
    *) if [ -z "$filter" ]; then filter="$a"; fi ;;
  esac
done
case "$filter" in
  *bytesSent*) echo "jq: error (at bep.json:6): simulated" >&2; exit 5 ;;
  *startTimeMillis*) echo "1714557600000" ;;
  *startTime*) echo "2024-05-01T10:00:00Z" ;;
  *progress*) printf 'INFO: Elapsed time: 12.34s, Critical Path: 5.67s\n' ;;
  *) echo "  7  " ;;
esac
"#;

#[test]
fn jq_engine_with_one_failing_query() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_stream(dir.path());
    let output = dir.path().join("history.csv");

    let jq_path = dir.path().join("fake_jq.sh");
    fs::write(&jq_path, FAKE_JQ).unwrap();
    let mut perms = fs::metadata(&jq_path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&jq_path, perms).unwrap();

    let outcome = record_cmd::run(RecordArgs {
        input,
        output: output.clone(),
        commit: "abc123".into(),
        commit_message: "Speed up build".into(),
        settings: Settings {
            engine: Engine::Jq,
            jq_command: jq_path.display().to_string(),
        },
        json: None,
    })
    .unwrap();
    assert_eq!(outcome, AppendOutcome::Created);

    let lines = common::read_lines(&output);
    assert_eq!(lines.len(), 2);
    // bytesSent blank, everything else populated
    assert_eq!(
        lines[1],
        "2024-05-01T10:00:00Z,1714557600000,abc123,Speed up build,12.34,5.67,7,7,7,7,,7,"
    );

    let calls = fs::read_to_string(dir.path().join("calls.log")).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    // ten catalogue queries plus the progress query
    assert_eq!(calls.len(), 11);
    assert!(calls[..10].iter().all(|c| c.starts_with("-r ")));
    assert!(calls[10].starts_with("-s -r last("));
}

#[test]
fn jq_engine_missing_binary_fails_preflight() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_stream(dir.path());
    let output = dir.path().join("history.csv");

    let err = record_cmd::run(RecordArgs {
        input,
        output: output.clone(),
        commit: "abc123".into(),
        commit_message: "msg".into(),
        settings: Settings {
            engine: Engine::Jq,
            jq_command: "bep-metrics-no-such-jq-binary".into(),
        },
        json: None,
    })
    .unwrap_err();

    assert!(matches!(err, MetricsError::ToolUnavailable(_)));
    assert!(!output.exists());
}
