//! Query definition and the executor trait shared by all engines.

use crate::MetricsResult;

/// Structural description of what a query selects from the event stream.
///
/// Every variant mirrors the `filter` program of the owning `Query`, so the
/// native engine and the jq engine agree on what they extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Field at `path` of every event whose `.id.<id>` is non-null.
    EventField {
        id: &'static str,
        path: &'static [&'static str],
    },
    /// `.count` of runner-count entries in the terminal metrics event.
    RunnerCount {
        name: &'static str,
        exec_kind: Option<&'static str>,
    },
    /// Field at `path` of the terminal metrics event.
    MetricsField { path: &'static [&'static str] },
    /// Field at `path` of the last event in the stream whose `.id.<id>` is non-null.
    LastEventField {
        id: &'static str,
        path: &'static [&'static str],
    },
}

/// A named query against a build event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    /// Attribute name the result is stored under
    pub name: &'static str,
    /// jq filter program
    pub filter: &'static str,
    /// Evaluate over the whole stream collected into one array (`jq -s`)
    pub slurp: bool,
    /// Native equivalent of `filter`
    pub selector: Selector,
}

/// Evaluates queries against one input event stream.
///
/// Implementations return the raw textual output of the query, trimmed of
/// surrounding whitespace. An empty string means the query matched nothing;
/// an error means the evaluation itself failed.
pub trait QueryExecutor {
    /// Returns the engine name (e.g., "native", "jq").
    fn engine(&self) -> &str;

    /// Evaluate a single query.
    fn execute(&self, query: &Query) -> MetricsResult<String>;
}
