//! The record command: extract metrics from one build event stream and
//! append them to the CSV history.

use std::path::PathBuf;

use tracing::info;

use crate::MetricsResult;
use crate::config::{Engine, Settings};
use crate::extract::extract_attributes;
use crate::preflight::run_preflight;
use crate::query::{JqExecutor, NativeExecutor, QueryExecutor};
use crate::report::{RunReport, render_summary, write_json_report};
use crate::storage::{AppendOutcome, CsvHistory, HistoryRecord};

#[derive(Debug, Clone)]
pub struct RecordArgs {
    /// Build event stream (JSON or JSON Lines)
    pub input: PathBuf,
    /// CSV history to append to
    pub output: PathBuf,
    pub commit: String,
    pub commit_message: String,
    pub settings: Settings,
    /// Optional machine-readable report path
    pub json: Option<PathBuf>,
}

/// Run the record command.
///
/// Preflight failures are returned before anything is read or written.
/// Failing queries only blank their own column.
pub fn run(args: RecordArgs) -> MetricsResult<AppendOutcome> {
    run_preflight(&args.input, &args.output, &args.settings)?;

    let executor: Box<dyn QueryExecutor> = match args.settings.engine {
        Engine::Native => Box::new(NativeExecutor::open(&args.input)),
        Engine::Jq => Box::new(JqExecutor::from_command_line(
            &args.settings.jq_command,
            &args.input,
        )?),
    };

    println!("Parsing JSON file: {}", args.input.display());
    info!(engine = executor.engine(), "extracting attributes");
    let attributes = extract_attributes(executor.as_ref());

    let record = HistoryRecord::from_attributes(&attributes, &args.commit, &args.commit_message);
    let history = CsvHistory::new(&args.output);

    let outcome = history.planned_outcome();
    println!("{}: {}", outcome.action(), args.output.display());
    history.write(&record, outcome)?;
    println!(
        "CSV file {} successfully: {}",
        outcome.status(),
        args.output.display()
    );

    println!("\n\n{}", render_summary(&attributes));

    if let Some(json_path) = &args.json {
        let report = RunReport {
            input: &args.input,
            output: &args.output,
            engine: executor.engine(),
            outcome,
            attributes: &attributes,
            row: &record,
        };
        write_json_report(&report, json_path)?;
        info!(path = %json_path.display(), "wrote json report");
    }

    Ok(outcome)
}
