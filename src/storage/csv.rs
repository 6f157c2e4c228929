//! CSV history of build metrics, one row appended per recorded build.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::extract::{Attributes, CRITICAL_PATH_SECONDS, ELAPSED_TIME_SECONDS};
use crate::{MetricsError, MetricsResult};

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &[
    "startTime",
    "startTimeMillis",
    "commit",
    "commitMessage",
    "buildTimeSeconds",
    "criticalPathTimeSeconds",
    "totalRunnerCount",
    "internalRunnerCount",
    "remoteRunnerCount",
    "cacheHitCount",
    "bytesSent",
    "bytesRecv",
    "annotation",
];

/// One row of the history file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub start_time: String,
    pub start_time_millis: String,
    pub commit: String,
    pub commit_message: String,
    pub build_time_seconds: String,
    pub critical_path_time_seconds: String,
    pub total_runner_count: String,
    pub internal_runner_count: String,
    pub remote_runner_count: String,
    pub cache_hit_count: String,
    pub bytes_sent: String,
    pub bytes_recv: String,
    /// Left empty for manual notes added after the fact
    pub annotation: String,
}

impl HistoryRecord {
    /// Project extracted attributes and commit metadata onto the row schema.
    pub fn from_attributes(attributes: &Attributes, commit: &str, commit_message: &str) -> Self {
        HistoryRecord {
            start_time: attributes.cell("startTime"),
            start_time_millis: attributes.cell("startTimeMillis"),
            commit: commit.to_string(),
            commit_message: commit_message.to_string(),
            build_time_seconds: attributes.cell(ELAPSED_TIME_SECONDS),
            critical_path_time_seconds: attributes.cell(CRITICAL_PATH_SECONDS),
            total_runner_count: attributes.cell("totalRunnerCount"),
            internal_runner_count: attributes.cell("internalRunnerCount"),
            remote_runner_count: attributes.cell("remoteRunnerCount"),
            cache_hit_count: attributes.cell("cacheHitCount"),
            bytes_sent: attributes.cell("bytesSent"),
            bytes_recv: attributes.cell("bytesRecv"),
            annotation: String::new(),
        }
    }

    /// Row values in `CSV_HEADERS` order.
    pub fn to_row(&self) -> [&str; 13] {
        [
            self.start_time.as_str(),
            self.start_time_millis.as_str(),
            self.commit.as_str(),
            self.commit_message.as_str(),
            self.build_time_seconds.as_str(),
            self.critical_path_time_seconds.as_str(),
            self.total_runner_count.as_str(),
            self.internal_runner_count.as_str(),
            self.remote_runner_count.as_str(),
            self.cache_hit_count.as_str(),
            self.bytes_sent.as_str(),
            self.bytes_recv.as_str(),
            self.annotation.as_str(),
        ]
    }
}

/// Whether an append started a new history or extended an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendOutcome {
    /// File was missing or empty; a header was written
    Created,
    /// Row was added below an existing header
    Appended,
}

impl AppendOutcome {
    /// Verb for the notice printed before writing.
    pub fn action(&self) -> &'static str {
        match self {
            AppendOutcome::Created => "Creating",
            AppendOutcome::Appended => "Appending to",
        }
    }

    /// Past tense for the notice printed after writing.
    pub fn status(&self) -> &'static str {
        match self {
            AppendOutcome::Created => "created",
            AppendOutcome::Appended => "appended to",
        }
    }
}

/// Append-only CSV history file.
///
/// The header is written only when the file is missing or holds nothing but
/// whitespace. There is no locking: concurrent appenders to one file race.
#[derive(Debug, Clone)]
pub struct CsvHistory {
    path: PathBuf,
}

impl CsvHistory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvHistory {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// What the next append will do, based on the current file contents.
    pub fn planned_outcome(&self) -> AppendOutcome {
        if !self.path.exists() {
            return AppendOutcome::Created;
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => AppendOutcome::Created,
            Ok(_) => AppendOutcome::Appended,
            Err(e) => {
                warn!(path = %self.path.display(), "cannot read existing history, writing header: {e}");
                AppendOutcome::Created
            }
        }
    }

    /// Append one row, with a header if `outcome` is `Created`.
    pub fn write(&self, record: &HistoryRecord, outcome: AppendOutcome) -> MetricsResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                MetricsError::Message(format!("failed to open {}: {e}", self.path.display()))
            })?;

        write_rows(record, outcome == AppendOutcome::Created, file)
    }
}

/// Write an optional header and one record to any writer.
///
/// Records end in CRLF, matching histories written by Python's `csv` module.
pub fn write_rows<W: Write>(record: &HistoryRecord, header: bool, writer: W) -> MetricsResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    if header {
        csv_writer.write_record(CSV_HEADERS)?;
    }
    csv_writer.write_record(record.to_row())?;
    csv_writer.flush()?;

    Ok(())
}
