use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::{MetricsError, MetricsResult};

/// Query engine used to evaluate the metric catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// In-process evaluation over parsed events
    #[default]
    Native,
    /// External `jq` subprocess per query
    Jq,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Native => f.write_str("native"),
            Engine::Jq => f.write_str("jq"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    pub engine: Engine,
    /// Command line for the jq engine, split shell-style
    pub jq_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            engine: Engine::Native,
            jq_command: "jq".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file; missing keys keep their defaults.
    pub fn load(path: &Path) -> MetricsResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            MetricsError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&s)
    }

    pub fn parse(s: &str) -> MetricsResult<Self> {
        toml::from_str(s).map_err(|e| MetricsError::Config(e.to_string()))
    }

    /// Apply command-line overrides on top of file or default values.
    pub fn with_overrides(mut self, engine: Option<Engine>, jq_command: Option<String>) -> Self {
        if let Some(engine) = engine {
            self.engine = engine;
        }
        if let Some(cmd) = jq_command {
            self.jq_command = cmd;
        }
        self
    }
}
