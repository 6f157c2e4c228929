//! Checks run before any extraction work starts.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Engine, Settings};
use crate::query::JqExecutor;
use crate::{MetricsError, MetricsResult};

/// The input must exist; a new output file needs an existing parent directory.
pub fn check_paths(input: &Path, output: &Path) -> MetricsResult<()> {
    if !input.exists() {
        return Err(MetricsError::InputNotFound(input.to_path_buf()));
    }

    if !output.exists() {
        let parent = output_parent(output);
        if !parent.exists() {
            return Err(MetricsError::MissingParentDir {
                parent,
                output: output.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Directory a new output file lands in; a bare file name means the cwd.
fn output_parent(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Make sure the selected engine can run at all.
pub fn check_engine(settings: &Settings, input: &Path) -> MetricsResult<()> {
    match settings.engine {
        Engine::Native => Ok(()),
        Engine::Jq => {
            let jq = JqExecutor::from_command_line(&settings.jq_command, input)?;
            let version = jq.version()?;
            debug!(program = jq.program(), %version, "found jq");
            Ok(())
        }
    }
}

pub fn run_preflight(input: &Path, output: &Path, settings: &Settings) -> MetricsResult<()> {
    check_paths(input, output)?;
    check_engine(settings, input)
}
