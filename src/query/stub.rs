//! Stub query engine for testing.

use std::collections::{HashMap, HashSet};

use crate::{MetricsError, MetricsResult};

use super::traits::{Query, QueryExecutor};

/// Query engine returning canned outputs keyed by query name.
///
/// Queries without a canned output return an empty string (no match);
/// queries marked failing return `QueryFailed`.
#[derive(Debug, Clone, Default)]
pub struct StubExecutor {
    outputs: HashMap<String, String>,
    failing: HashSet<String>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output returned for the query named `name`.
    pub fn with_output(mut self, name: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(name.into(), output.into());
        self
    }

    /// Make the query named `name` fail.
    pub fn failing(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }
}

impl QueryExecutor for StubExecutor {
    fn engine(&self) -> &str {
        "stub"
    }

    fn execute(&self, query: &Query) -> MetricsResult<String> {
        if self.failing.contains(query.name) {
            return Err(MetricsError::QueryFailed {
                status: "exit status: 5".into(),
                stderr: format!("stub failure for {}", query.name),
            });
        }
        Ok(self.outputs.get(query.name).cloned().unwrap_or_default())
    }
}
