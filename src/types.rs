// src/types.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const CONFIG_FILE_NAME: &str = "dyncomp.json";

/// Command name -> command string, as accumulated during one resolution.
///
/// A `BTreeMap` keeps listing and debug output stable.
pub type MergedConfig = BTreeMap<String, String>;

/// Set of directories at which the upward search halts (inclusive).
///
/// Emptiness is not rejected here; the resolver reports it as
/// [`DyncompError::StopDirsEmpty`](crate::errors::DyncompError::StopDirsEmpty)
/// so that callers get the same error whatever the stop dirs came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopDirs {
    dirs: BTreeSet<PathBuf>,
}

impl StopDirs {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// True if `dir` is itself one of the stop directories.
    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    /// True if `start` lies at or below at least one stop directory.
    ///
    /// The test is lexical and component-wise: `/tmp/rootx` is not under
    /// `/tmp/root`, and no symlinks are resolved.
    pub fn covers(&self, start: &Path) -> bool {
        self.dirs.iter().any(|stop| start.starts_with(stop))
    }
}
