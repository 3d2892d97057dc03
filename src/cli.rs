// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

const EXAMPLES: &str = "\
These commands assume that you have defined the \"run\" and the \"test\"
keys in a dyncomp.json file in the current directory or one of its parents.

- dyncomp run
- dyncomp test";

/// Command-line arguments for `dyncomp`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "dyncomp",
    version,
    about = "Run commands defined in dyncomp.json files up the directory tree.",
    after_help = EXAMPLES,
    long_about = None
)]
pub struct CliArgs {
    /// Name of the command to run.
    ///
    /// Exactly one is expected; anything else prints the usage line. The
    /// arity is checked by the app rather than by clap so the usage line is
    /// always the same.
    #[arg(value_name = "COMMAND_NAME")]
    pub command_name: Vec<String>,

    /// Directory to start the search from.
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Stop directory for the upward search (repeatable).
    ///
    /// Replaces the `stop_dirs` from the preferences file.
    #[arg(long = "stop-dir", value_name = "DIR")]
    pub stop_dirs: Vec<PathBuf>,

    /// Directory holding the preferences `config.json`.
    ///
    /// Default: `~/.config/dyncomp`.
    #[arg(long, value_name = "DIR")]
    pub prefs: Option<PathBuf>,

    /// Kill the command if it runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DYNCOMP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the command, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
