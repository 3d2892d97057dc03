// src/resolve/mod.rs

//! Hierarchical config resolution.
//!
//! - [`walker`] produces the config files between a start directory and the
//!   nearest stop directory, nearest first.
//! - [`resolver`] parses them and merges with nearest-directory-wins
//!   precedence.

pub mod resolver;
pub mod walker;

pub use resolver::{ConfigResolver, ResolveError};
pub use walker::{DirectoryWalker, UpwardDirs};
