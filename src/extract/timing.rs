//! Timing scrape of the build summary progress line.
//!
//! The event stream carries wall time and critical path only inside the
//! free-text summary Bazel prints at the end of a build, e.g.
//! `INFO: Elapsed time: 12.34s, Critical Path: 5.67s`. A miss is not an
//! error: the caller records both values as absent.

use std::sync::LazyLock;

use regex::Regex;

static TIMING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Elapsed time: (\d+\.\d+)s, Critical Path: (\d+\.\d+)s").unwrap()
});

/// Wall time and critical path of a build, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingMatch {
    pub elapsed_seconds: f64,
    pub critical_path_seconds: f64,
}

/// Extract the first timing summary found in `text`.
pub fn parse_timing(text: &str) -> Option<TimingMatch> {
    let caps = TIMING_PATTERN.captures(text)?;
    let elapsed_seconds = caps.get(1)?.as_str().parse().ok()?;
    let critical_path_seconds = caps.get(2)?.as_str().parse().ok()?;
    Some(TimingMatch {
        elapsed_seconds,
        critical_path_seconds,
    })
}
