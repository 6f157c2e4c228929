#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A trimmed build event stream: started, progress, an intermediate metrics
/// snapshot, the final progress summary, finished, and the terminal metrics.
pub const BEP_STREAM: &str = concat!(
    r#"{"id":{"started":{}},"started":{"uuid":"5b2e","startTimeMillis":"1714557600000","startTime":"2024-05-01T10:00:00Z","buildToolVersion":"7.1.1","command":"build"}}"#,
    "\n",
    r#"{"id":{"progress":{}},"children":[{"progress":{"opaqueCount":1}}],"progress":{"stderr":"Loading: 0 packages loaded\n"}}"#,
    "\n",
    r#"{"id":{"buildMetrics":{}},"buildMetrics":{"actionSummary":{"runnerCount":[{"name":"total","count":1}]}},"lastMessage":false}"#,
    "\n",
    r#"{"id":{"progress":{"opaqueCount":1}},"progress":{"stderr":"INFO: Elapsed time: 12.34s, Critical Path: 5.67s\nINFO: 42 processes: 3 internal, 30 remote, 9 remote cache hit.\n"}}"#,
    "\n",
    r#"{"id":{"buildFinished":{}},"finished":{"exitCode":{"name":"SUCCESS"},"finishTimeMillis":"1714557612340","finishTime":"2024-05-01T10:00:12.340Z"}}"#,
    "\n",
    r#"{"id":{"buildMetrics":{}},"buildMetrics":{"actionSummary":{"actionsExecuted":"42","runnerCount":[{"name":"total","count":42},{"name":"internal","count":3},{"name":"remote","count":30,"execKind":"Remote"},{"name":"remote cache hit","count":9,"execKind":"Remote"}]},"networkMetrics":{"systemNetworkStats":{"bytesSent":"2048","bytesRecv":"1048576"}}},"lastMessage":true}"#,
    "\n",
);

/// The data row `BEP_STREAM` produces for commit `abc123` / `Speed up build`.
pub const EXPECTED_ROW: &str =
    "2024-05-01T10:00:00Z,1714557600000,abc123,Speed up build,12.34,5.67,42,3,30,9,2048,1048576,";

pub fn write_stream(dir: &Path) -> PathBuf {
    let path = dir.join("bep.json");
    std::fs::write(&path, BEP_STREAM).unwrap();
    path
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
