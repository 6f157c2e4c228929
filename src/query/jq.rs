//! jq subprocess engine.
//!
//! Shells out to the `jq` CLI once per query, the way the build-event
//! tooling has always done it: `jq [-s] -r <filter> <file>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{MetricsError, MetricsResult};

use super::traits::{Query, QueryExecutor};

/// Query engine backed by an external `jq` binary.
#[derive(Debug, Clone)]
pub struct JqExecutor {
    /// Program to run (default: "jq" from PATH)
    program: String,
    /// Arguments placed before the jq flags, for wrapper commands
    prefix_args: Vec<String>,
    /// Event stream every query runs against
    input: PathBuf,
}

impl JqExecutor {
    /// Create an executor from a shell-style command line such as
    /// `"jq"` or `"nix run nixpkgs#jq --"`.
    pub fn from_command_line(command_line: &str, input: impl Into<PathBuf>) -> MetricsResult<Self> {
        let mut parts = shlex::split(command_line).ok_or_else(|| {
            MetricsError::Config(format!("unbalanced quoting in jq command: {command_line}"))
        })?;
        if parts.is_empty() {
            return Err(MetricsError::Config("empty jq command".into()));
        }
        let program = parts.remove(0);
        Ok(JqExecutor {
            program,
            prefix_args: parts,
            input: input.into(),
        })
    }

    /// Program name used for diagnostics.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path of the event stream queries run against.
    pub fn input(&self) -> &Path {
        &self.input
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd
    }

    /// Run `jq --version`, failing if the tool is missing or broken.
    pub fn version(&self) -> MetricsResult<String> {
        let output = self
            .command()
            .arg("--version")
            .output()
            .map_err(|_| MetricsError::ToolUnavailable(self.program.clone()))?;

        if !output.status.success() {
            return Err(MetricsError::ToolUnavailable(self.program.clone()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a raw filter program against the input file.
    ///
    /// With `slurp` the whole stream is collected into one array before the
    /// filter runs, which is what "last matching event" filters need.
    pub fn run_filter(&self, filter: &str, slurp: bool) -> MetricsResult<String> {
        let mut cmd = self.command();
        if slurp {
            cmd.arg("-s");
        }
        cmd.arg("-r").arg(filter).arg(&self.input);
        debug!(program = %self.program, slurp, filter, "running jq");

        let output = cmd.output().map_err(|e| {
            MetricsError::ToolUnavailable(format!("{} ({e})", self.program))
        })?;

        if !output.status.success() {
            return Err(MetricsError::QueryFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl QueryExecutor for JqExecutor {
    fn engine(&self) -> &str {
        "jq"
    }

    fn execute(&self, query: &Query) -> MetricsResult<String> {
        self.run_filter(query.filter, query.slurp)
    }
}
