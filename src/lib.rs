pub mod config;
pub mod extract;
pub mod preflight;
pub mod query;
pub mod record_cmd;
pub mod report;
pub mod storage;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{0}")]
    Message(String),
    #[error("input file '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error(
        "parent directory '{}' for the output file {} does not exist",
        .parent.display(),
        .output.display()
    )]
    MissingParentDir { parent: PathBuf, output: PathBuf },
    #[error("{0} is not installed or not in PATH")]
    ToolUnavailable(String),
    #[error("query failed ({status}): {stderr}")]
    QueryFailed { status: String, stderr: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
