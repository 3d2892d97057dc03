// src/exec/sink.rs

//! Destinations for command output and user-facing messages.

use std::io::{self, Write};
use std::sync::Arc;

/// Line-oriented, append-only output destination.
///
/// Both stdout and stderr readers of a running command write into the same
/// sink concurrently, so implementations must accept interleaved calls. Each
/// call writes one whole line.
pub trait OutputSink: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for Arc<S> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Writes lines to the process's standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        // Locking stdout keeps each line whole.
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}
