// src/exec/runner.rs

//! Runs a resolved command string as a child process.

use std::fmt;
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{DyncompError, Result};
use crate::exec::sink::OutputSink;
use crate::exec::tokenizer::tokenize;

/// Executable plus arguments, built from the first pipeline stage of a
/// command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Tokenize `command` into a process description.
    ///
    /// Syntax errors are wrapped in [`DyncompError::BuildingCommand`]. Whether
    /// the program actually exists is only discovered at spawn time.
    pub fn parse(command: &str) -> Result<Self> {
        let mut tokens = tokenize(command).map_err(|source| DyncompError::BuildingCommand {
            command: command.to_string(),
            source: Box::new(source),
        })?;
        let program = tokens.remove(0);
        Ok(Self {
            program,
            args: tokens,
        })
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Kill the child and fail if it hasn't finished within this long.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Launches commands and streams their stdout/stderr into an [`OutputSink`].
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    options: RunnerOptions,
}

impl CommandRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    /// Tokenize, spawn and wait for `command`.
    ///
    /// Every stdout and stderr line is forwarded to `sink` as it arrives.
    /// Lines keep their order within a stream; the two streams interleave
    /// freely. Returns once both streams are drained and the process has
    /// exited. A launch failure, a non-zero exit or a timeout is reported as
    /// [`DyncompError::RunningCommand`]; output already forwarded stays
    /// forwarded.
    pub async fn run(&self, command: &str, sink: Arc<dyn OutputSink>) -> Result<()> {
        let spec = CommandSpec::parse(command)?;
        let running = |reason: String| DyncompError::RunningCommand {
            command: command.to_string(),
            reason,
        };

        info!(command = %spec, "starting command process");

        let mut child = spec
            .to_command()
            .spawn()
            .map_err(|e| running(launch_failure(&spec.program, &e)))?;

        let mut readers = spawn_readers(&mut child, &sink);

        let waited = match self.options.timeout {
            None => Ok(drain_and_wait(&mut child, &mut readers).await),
            Some(limit) => {
                tokio::time::timeout(limit, drain_and_wait(&mut child, &mut readers)).await
            }
        };

        let status = match waited {
            Ok(status) => status.map_err(|e| running(format!("waiting for process: {e}")))?,
            Err(elapsed) => {
                warn!(command = %spec, error = %elapsed, "command timed out; killing process");
                if let Err(e) = child.kill().await {
                    warn!(command = %spec, error = %e, "failed to kill timed out process");
                }
                stop_readers(readers).await;
                let limit = self.options.timeout.unwrap_or_default();
                return Err(running(format!("timed out after {limit:?}")));
            }
        };

        let code = status.code().unwrap_or(-1);
        info!(
            command = %spec,
            exit_code = code,
            success = status.success(),
            "command process exited"
        );

        if status.success() {
            Ok(())
        } else {
            Err(running(status.to_string()))
        }
    }
}

/// Run `command` with default options.
pub async fn execute(command: &str, sink: Arc<dyn OutputSink>) -> Result<()> {
    CommandRunner::default().run(command, sink).await
}

fn launch_failure(program: &str, err: &std::io::Error) -> String {
    if err.kind() == ErrorKind::NotFound && !program.contains(std::path::MAIN_SEPARATOR) {
        format!("exec: \"{program}\": executable file not found in $PATH")
    } else {
        format!("exec: \"{program}\": {err}")
    }
}

type Readers = (Option<JoinHandle<()>>, Option<JoinHandle<()>>);

const READER_GRACE: Duration = Duration::from_millis(100);

fn spawn_readers(child: &mut Child, sink: &Arc<dyn OutputSink>) -> Readers {
    let stdout = child
        .stdout
        .take()
        .map(|out| tokio::spawn(forward_lines(out, Arc::clone(sink), "stdout")));
    let stderr = child
        .stderr
        .take()
        .map(|err| tokio::spawn(forward_lines(err, Arc::clone(sink), "stderr")));
    (stdout, stderr)
}

/// Wait for both readers to hit EOF, then for the process to exit.
///
/// Takes the handles by reference so a caller that gives up waiting can
/// still stop the readers.
async fn drain_and_wait(child: &mut Child, readers: &mut Readers) -> std::io::Result<ExitStatus> {
    let (stdout, stderr) = readers;
    tokio::join!(join_reader(stdout.as_mut()), join_reader(stderr.as_mut()));
    debug!("output streams drained");
    child.wait().await
}

async fn join_reader(handle: Option<&mut JoinHandle<()>>) {
    if let Some(handle) = handle {
        if let Err(e) = handle.await {
            warn!(error = %e, "output reader task failed");
        }
    }
}

/// After a kill, give the readers a short window to forward what the child
/// already wrote, then abort them. A grandchild may still hold the pipes
/// open, and nothing may reach the sink once `run` has returned.
async fn stop_readers((stdout, stderr): Readers) {
    for mut handle in [stdout, stderr].into_iter().flatten() {
        if tokio::time::timeout(READER_GRACE, &mut handle).await.is_err() {
            handle.abort();
            // Cancelled or finished, either way the task is gone.
            let _ = handle.await;
            debug!("output reader aborted after kill");
        }
    }
}

/// Forward every line of `reader` to `sink` until EOF.
///
/// Lines are decoded lossily so a stray non-UTF-8 byte can't stop the drain
/// and leave the child blocked on a full pipe.
async fn forward_lines<R>(reader: R, sink: Arc<dyn OutputSink>, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut sink_failed = false;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf);
                if let Err(e) = sink.write_line(&line) {
                    // Keep draining so the child never blocks on a full pipe.
                    if !sink_failed {
                        warn!(stream, error = %e, "failed to write command output");
                        sink_failed = true;
                    }
                }
            }
            Err(e) => {
                warn!(stream, error = %e, "failed to read command output");
                break;
            }
        }
    }

    debug!(stream, "output stream closed");
}
