#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bep_metrics::config::{Engine, Settings};
use bep_metrics::record_cmd::{self, RecordArgs};

#[derive(Parser, Debug)]
#[command(name = "bep-metrics", version)]
#[command(about = "Append build metrics from a Bazel Build Event Protocol log to a CSV history", long_about = None)]
#[command(
    after_help = "Example: bep-metrics /path/to/file.json /path/to/file.csv <commit-hash> <commit-message>"
)]
struct Cli {
    /// Build event stream written with --build_event_json_file
    json_file_path: PathBuf,
    /// CSV history to create or append to
    csv_file_path: PathBuf,
    /// Commit the build was run against
    commit_hash: String,
    /// Commit message recorded next to the hash
    #[arg(allow_hyphen_values = true)]
    commit_message: String,

    /// Query engine (overrides the config file)
    #[arg(long, value_enum)]
    engine: Option<Engine>,
    /// jq command line for the jq engine (e.g. "gojq")
    #[arg(long, value_name = "CMD")]
    jq_command: Option<String>,
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write machine-readable JSON report to this file
    #[arg(long)]
    json: Option<PathBuf>,
    /// Enable verbose logging (or set BEP_METRICS_LOG)
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("BEP_METRICS_LOG").unwrap_or_else(|_| {
        if verbose { "bep_metrics=debug".to_string() } else { "bep_metrics=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();

    // Usage errors exit 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
    .map(|s| s.with_overrides(cli.engine, cli.jq_command));

    let result = settings.and_then(|settings| {
        record_cmd::run(RecordArgs {
            input: cli.json_file_path,
            output: cli.csv_file_path,
            commit: cli.commit_hash,
            commit_message: cli.commit_message,
            settings,
            json: cli.json,
        })
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
