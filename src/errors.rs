// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is terminal for the current resolution or run attempt;
//! nothing here is retried. The `Display` output of each variant is the
//! single line the CLI prints for it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DyncompError {
    #[error("Usage: dyncomp COMMAND_NAME")]
    Usage,

    #[error("Stop dirs should not be empty.")]
    StopDirsEmpty,

    #[error("Start directory {start:?} is not contained in any stop directory.")]
    StartNotContained { start: PathBuf },

    #[error("Error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Error parsing {path:?}: {source}")]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Command \"{name}\" not found, add it to your {config_file} file.")]
    CommandNotFound {
        name: String,
        config_file: &'static str,
    },

    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error("Error building selected command: \"{command}\", error: {source}")]
    BuildingCommand {
        command: String,
        #[source]
        source: Box<DyncompError>,
    },

    #[error("Error running selected command: \"{command}\", error: {reason}")]
    RunningCommand { command: String, reason: String },

    #[error("Error reading config, error: {0}")]
    Preferences(String),

    #[error("{0}")]
    Environment(String),
}

impl DyncompError {
    pub(crate) fn syntax(reason: impl Into<String>) -> Self {
        DyncompError::InvalidSyntax(reason.into())
    }

    /// Report a build or run failure under the command name the user typed
    /// rather than the command string it resolved to.
    pub fn naming_command(self, name: &str) -> Self {
        match self {
            DyncompError::BuildingCommand { source, .. } => DyncompError::BuildingCommand {
                command: name.to_string(),
                source,
            },
            DyncompError::RunningCommand { reason, .. } => DyncompError::RunningCommand {
                command: name.to_string(),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DyncompError>;
