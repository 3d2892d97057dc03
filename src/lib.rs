// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod resolve;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use console::style;
use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::config::preferences::{default_preferences_dir, home_dir, load_stop_dirs};
use crate::errors::{DyncompError, Result};
use crate::exec::{CommandRunner, OutputSink, RunnerOptions};
use crate::fs::RealFileSystem;
use crate::resolve::ConfigResolver;
use crate::types::StopDirs;

/// Resolve `name` to its command string, searching from `start` up to the
/// nearest of `stop_dirs`.
pub async fn resolve_command(stop_dirs: &StopDirs, start: &Path, name: &str) -> Result<String> {
    ConfigResolver::default()
        .resolve_command(stop_dirs, start, name)
        .await
}

/// Run a resolved command string, streaming its output into `sink`.
pub use crate::exec::execute;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - argument arity check
/// - stop directory selection (flags, preferences file, home default)
/// - config resolution from the start directory
/// - the `Running ...` banner and command execution
pub async fn run(args: CliArgs, sink: Arc<dyn OutputSink>) -> Result<()> {
    let [name] = args.command_name.as_slice() else {
        return Err(DyncompError::Usage);
    };

    if args.no_color {
        console::set_colors_enabled(false);
    }

    // Stop dirs are absolute, so a relative --dir is taken from the cwd.
    let start = match &args.dir {
        Some(dir) => std::path::absolute(dir),
        None => std::env::current_dir(),
    }
    .map_err(|e| {
        DyncompError::Environment(format!(
            "Error while getting the current working directory: {e}"
        ))
    })?;
    let stop_dirs = stop_dirs_for(&args)?;
    debug!(start = %start.display(), ?stop_dirs, name = %name, "resolving command");

    let command = resolve_command(&stop_dirs, &start, name).await?;

    if args.dry_run {
        say(sink.as_ref(), &command);
        return Ok(());
    }

    say(
        sink.as_ref(),
        &format!("{}{}", style("Running ").blue(), style(&command).green()),
    );

    let runner = CommandRunner::new(RunnerOptions {
        timeout: args.timeout.map(Duration::from_secs),
    });
    runner
        .run(&command, sink)
        .await
        .map_err(|err| err.naming_command(name))
}

/// Run and print any error as a single line to `sink`.
///
/// Returns `false` if the run failed.
pub async fn run_and_report(args: CliArgs, sink: Arc<dyn OutputSink>) -> bool {
    match run(args, Arc::clone(&sink)).await {
        Ok(()) => true,
        Err(err) => {
            debug!(error = ?err, "dyncomp run failed");
            say(sink.as_ref(), &err.to_string());
            false
        }
    }
}

/// Stop directories from `--stop-dir`, else from the preferences file,
/// else the home directory.
fn stop_dirs_for(args: &CliArgs) -> Result<StopDirs> {
    if !args.stop_dirs.is_empty() {
        return Ok(StopDirs::new(args.stop_dirs.iter().cloned()));
    }

    let prefs_dir: PathBuf = match &args.prefs {
        Some(dir) => dir.clone(),
        None => default_preferences_dir()?,
    };
    load_stop_dirs(&RealFileSystem, &prefs_dir, home_dir)
}

fn say(sink: &dyn OutputSink, line: &str) {
    if let Err(e) = sink.write_line(line) {
        warn!(error = %e, "failed to write to output");
    }
}
