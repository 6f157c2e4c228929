//! Machine-readable report of one recording run.

use std::path::Path;

use serde::Serialize;

use crate::extract::Attributes;
use crate::storage::{AppendOutcome, HistoryRecord};
use crate::{MetricsError, MetricsResult};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub engine: &'a str,
    pub outcome: AppendOutcome,
    pub attributes: &'a Attributes,
    pub row: &'a HistoryRecord,
}

pub fn write_json_report(report: &RunReport<'_>, path: &Path) -> MetricsResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| {
        MetricsError::Message(format!("failed to write json report {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::AttrValue;

    #[test]
    fn test_write_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut attrs = Attributes::new();
        attrs.insert("totalRunnerCount", Some(AttrValue::Text("42".into())));
        let row = HistoryRecord::from_attributes(&attrs, "abc", "msg");
        let report = RunReport {
            input: Path::new("bep.json"),
            output: Path::new("history.csv"),
            engine: "native",
            outcome: AppendOutcome::Created,
            attributes: &attrs,
            row: &row,
        };

        let path = dir.path().join("report.json");
        write_json_report(&report, &path).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["outcome"], "created");
        assert_eq!(v["engine"], "native");
        assert_eq!(v["row"]["totalRunnerCount"], "42");
        assert_eq!(v["row"]["commit"], "abc");
        assert_eq!(v["attributes"][0]["name"], "totalRunnerCount");
    }
}
