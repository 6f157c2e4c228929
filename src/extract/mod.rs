//! Attribute extraction from a build event stream.
//!
//! Runs every catalogue query through a `QueryExecutor`, then scrapes the
//! timing summary out of the last progress event. A failing query only
//! leaves its own attribute absent.

pub mod attributes;
pub mod catalogue;
pub mod timing;

use tracing::{info, warn};

use crate::query::{Query, QueryExecutor};

pub use attributes::{
    AttrValue, Attribute, Attributes, CRITICAL_PATH_SECONDS, ELAPSED_TIME_SECONDS, PROGRESS_OUTPUT,
};
pub use catalogue::{CATALOGUE, PROGRESS_QUERY};
pub use timing::{TimingMatch, parse_timing};

/// Extract every catalogue attribute plus the derived timing values.
pub fn extract_attributes(executor: &dyn QueryExecutor) -> Attributes {
    let mut attributes = Attributes::new();

    for query in CATALOGUE {
        info!("Extracting {}...", query.name);
        attributes.insert(query.name, run_query(executor, query));
    }

    let progress = run_query(executor, &PROGRESS_QUERY);
    let timing = progress
        .as_ref()
        .and_then(AttrValue::as_text)
        .and_then(parse_timing);

    if let Some(timing) = timing {
        attributes.insert(
            ELAPSED_TIME_SECONDS,
            Some(AttrValue::Seconds(timing.elapsed_seconds)),
        );
        attributes.insert(
            CRITICAL_PATH_SECONDS,
            Some(AttrValue::Seconds(timing.critical_path_seconds)),
        );
    }
    attributes.insert(PROGRESS_OUTPUT, progress);

    attributes
}

fn run_query(executor: &dyn QueryExecutor, query: &Query) -> Option<AttrValue> {
    match executor.execute(query) {
        Ok(output) => Some(AttrValue::Text(output)),
        Err(e) => {
            warn!(
                engine = executor.engine(),
                attribute = query.name,
                "Error running query: {e}"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::StubExecutor;

    fn full_stub() -> StubExecutor {
        StubExecutor::new()
            .with_output("startTime", "2024-05-01T10:00:00Z")
            .with_output("startTimeMillis", "1714557600000")
            .with_output("totalRunnerCount", "42")
            .with_output("internalRunnerCount", "3")
            .with_output("remoteRunnerCount", "30")
            .with_output("cacheHitCount", "9")
            .with_output("bytesSent", "2048")
            .with_output("bytesRecv", "1048576")
            .with_output(
                PROGRESS_OUTPUT,
                "INFO: Elapsed time: 12.34s, Critical Path: 5.67s",
            )
    }

    #[test]
    fn test_extracts_catalogue_and_timing() {
        let attrs = extract_attributes(&full_stub());

        assert_eq!(attrs.cell("totalRunnerCount"), "42");
        assert_eq!(attrs.cell("cacheHitCount"), "9");
        assert_eq!(
            attrs.get(ELAPSED_TIME_SECONDS),
            Some(&AttrValue::Seconds(12.34))
        );
        assert_eq!(
            attrs.get(CRITICAL_PATH_SECONDS),
            Some(&AttrValue::Seconds(5.67))
        );
        assert!(attrs.cell(PROGRESS_OUTPUT).contains("Critical Path"));
        // catalogue + two timing values + progress text
        assert_eq!(attrs.iter().count(), CATALOGUE.len() + 3);
    }

    #[test]
    fn test_one_failing_query_leaves_only_that_absent() {
        let attrs = extract_attributes(&full_stub().failing("remoteRunnerCount"));

        assert!(attrs.contains("remoteRunnerCount"));
        assert_eq!(attrs.get("remoteRunnerCount"), None);
        assert_eq!(attrs.cell("internalRunnerCount"), "3");
        assert_eq!(attrs.cell("cacheHitCount"), "9");
        assert!(attrs.get(ELAPSED_TIME_SECONDS).is_some());
    }

    #[test]
    fn test_unmatched_progress_text_has_no_timing() {
        let stub = full_stub().with_output(PROGRESS_OUTPUT, "INFO: Build completed");
        let attrs = extract_attributes(&stub);

        assert!(!attrs.contains(ELAPSED_TIME_SECONDS));
        assert!(!attrs.contains(CRITICAL_PATH_SECONDS));
        assert_eq!(attrs.cell(PROGRESS_OUTPUT), "INFO: Build completed");
    }

    #[test]
    fn test_failed_progress_query_has_no_timing() {
        let attrs = extract_attributes(&full_stub().failing(PROGRESS_OUTPUT));

        assert!(!attrs.contains(ELAPSED_TIME_SECONDS));
        assert!(attrs.contains(PROGRESS_OUTPUT));
        assert_eq!(attrs.get(PROGRESS_OUTPUT), None);
    }

    #[test]
    fn test_empty_stream_yields_empty_values() {
        let attrs = extract_attributes(&StubExecutor::new());
        for attr in attrs.iter() {
            assert_eq!(attr.value, Some(AttrValue::Text(String::new())), "{}", attr.name);
        }
    }
}
