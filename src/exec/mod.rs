// src/exec/mod.rs

//! Command parsing and execution.
//!
//! - [`tokenizer`] turns a command string into an argument vector (first
//!   pipeline stage only).
//! - [`runner`] spawns the process with `tokio::process::Command` and
//!   streams both of its output streams, line by line, into a sink.
//! - [`sink`] defines the [`OutputSink`] trait the runner and the CLI write to.

pub mod runner;
pub mod sink;
pub mod tokenizer;

pub use runner::{execute, CommandRunner, CommandSpec, RunnerOptions};
pub use sink::{OutputSink, StdoutSink};
pub use tokenizer::{tokenize, tokenize_pipeline};
