//! The fixed catalogue of metrics pulled from a build event stream.
//!
//! Each entry carries a jq filter program and the equivalent native selector.
//! Metrics-derived entries only look at the build metrics event flagged with
//! `lastMessage`, so intermediate metrics snapshots are ignored.

use crate::query::{Query, Selector};

const STARTED_TIME: &[&str] = &["started", "startTime"];
const STARTED_TIME_MILLIS: &[&str] = &["started", "startTimeMillis"];
const FINISHED_TIME: &[&str] = &["finished", "finishTime"];
const FINISHED_TIME_MILLIS: &[&str] = &["finished", "finishTimeMillis"];
const BYTES_SENT: &[&str] = &[
    "buildMetrics",
    "networkMetrics",
    "systemNetworkStats",
    "bytesSent",
];
const BYTES_RECV: &[&str] = &[
    "buildMetrics",
    "networkMetrics",
    "systemNetworkStats",
    "bytesRecv",
];
const PROGRESS_STDERR: &[&str] = &["progress", "stderr"];

/// Queries run per-event, in summary order.
pub static CATALOGUE: &[Query] = &[
    Query {
        name: "startTime",
        filter: "select(.id.started != null) | .started.startTime // empty",
        slurp: false,
        selector: Selector::EventField {
            id: "started",
            path: STARTED_TIME,
        },
    },
    Query {
        name: "startTimeMillis",
        filter: "select(.id.started != null) | .started.startTimeMillis // empty",
        slurp: false,
        selector: Selector::EventField {
            id: "started",
            path: STARTED_TIME_MILLIS,
        },
    },
    Query {
        name: "finishTime",
        filter: "select(.id.buildFinished != null) | .finished.finishTime // empty",
        slurp: false,
        selector: Selector::EventField {
            id: "buildFinished",
            path: FINISHED_TIME,
        },
    },
    Query {
        name: "finishTimeMillis",
        filter: "select(.id.buildFinished != null) | .finished.finishTimeMillis // empty",
        slurp: false,
        selector: Selector::EventField {
            id: "buildFinished",
            path: FINISHED_TIME_MILLIS,
        },
    },
    Query {
        name: "totalRunnerCount",
        filter: "select(.id.buildMetrics != null and .lastMessage == true) | (.buildMetrics.actionSummary.runnerCount[] | select(.name == \"total\") | .count)",
        slurp: false,
        selector: Selector::RunnerCount {
            name: "total",
            exec_kind: None,
        },
    },
    Query {
        name: "internalRunnerCount",
        filter: "select(.id.buildMetrics != null and .lastMessage == true) | (.buildMetrics.actionSummary.runnerCount[] | select(.name == \"internal\") | .count)",
        slurp: false,
        selector: Selector::RunnerCount {
            name: "internal",
            exec_kind: None,
        },
    },
    Query {
        name: "remoteRunnerCount",
        filter: "select(.id.buildMetrics != null and .lastMessage == true) | (.buildMetrics.actionSummary.runnerCount[] | select(.name == \"remote\" and .execKind == \"Remote\") | .count)",
        slurp: false,
        selector: Selector::RunnerCount {
            name: "remote",
            exec_kind: Some("Remote"),
        },
    },
    Query {
        name: "cacheHitCount",
        filter: "select(.id.buildMetrics != null and .lastMessage == true) | (.buildMetrics.actionSummary.runnerCount[] | select(.name == \"remote cache hit\" and .execKind == \"Remote\") | .count)",
        slurp: false,
        selector: Selector::RunnerCount {
            name: "remote cache hit",
            exec_kind: Some("Remote"),
        },
    },
    Query {
        name: "bytesSent",
        filter: "select(.id.buildMetrics != null and .lastMessage == true) | .buildMetrics.networkMetrics.systemNetworkStats.bytesSent",
        slurp: false,
        selector: Selector::MetricsField { path: BYTES_SENT },
    },
    Query {
        name: "bytesRecv",
        filter: "select(.id.buildMetrics != null and .lastMessage == true) | .buildMetrics.networkMetrics.systemNetworkStats.bytesRecv",
        slurp: false,
        selector: Selector::MetricsField { path: BYTES_RECV },
    },
];

/// stderr of the last progress event. Progress events repeat throughout the
/// stream, so this one needs the whole stream collected (`jq -s`).
pub static PROGRESS_QUERY: Query = Query {
    name: "progressOutput",
    filter: "last(.[] | select(.id.progress != null)) | .progress.stderr // empty",
    slurp: true,
    selector: Selector::LastEventField {
        id: "progress",
        path: PROGRESS_STDERR,
    },
};
