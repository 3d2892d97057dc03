// src/resolve/walker.rs

//! Upward directory walk from a start directory to the nearest stop
//! directory.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::config::ConfigFileStore;
use crate::types::StopDirs;

/// Iterator over `start`, `parent(start)`, ... up to and including the first
/// directory that is in the stop set. Ends at the filesystem root if no stop
/// directory is met on the way.
#[derive(Debug, Clone)]
pub struct UpwardDirs {
    next: Option<PathBuf>,
    stop_dirs: StopDirs,
}

impl UpwardDirs {
    pub fn new(start: impl Into<PathBuf>, stop_dirs: StopDirs) -> Self {
        Self {
            next: Some(start.into()),
            stop_dirs,
        }
    }
}

impl Iterator for UpwardDirs {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let current = self.next.take()?;
        if !self.stop_dirs.contains(&current) {
            // A relative start's last parent is "", which is not a directory.
            self.next = current
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf);
        }
        Some(current)
    }
}

/// Produces the config files found along an upward walk.
///
/// The walk runs on a blocking task and hands each found path over a
/// single-slot channel, nearest directory first. The producer cannot get
/// more than one path ahead of the consumer, and it stops at its next
/// hand-off once the receiver is dropped.
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalker {
    store: ConfigFileStore,
}

impl DirectoryWalker {
    pub fn new(store: ConfigFileStore) -> Self {
        Self { store }
    }

    /// Start walking from `start` towards `stop_dirs` in the background.
    ///
    /// Must be called from within a Tokio runtime. The returned receiver
    /// yields config file paths and is closed when the walk ends.
    pub fn spawn(&self, start: PathBuf, stop_dirs: StopDirs) -> mpsc::Receiver<PathBuf> {
        let (tx, rx) = mpsc::channel::<PathBuf>(1);
        let store = self.store.clone();

        tokio::task::spawn_blocking(move || {
            debug!(start = %start.display(), "config walk started");

            for dir in UpwardDirs::new(start, stop_dirs) {
                trace!(dir = %dir.display(), "probing directory");
                let Some(config_path) = store.contains_config_file(&dir) else {
                    continue;
                };

                debug!(path = %config_path.display(), "found config file");
                if tx.blocking_send(config_path).is_err() {
                    debug!("config walk receiver dropped; stopping early");
                    return;
                }
            }

            debug!("config walk finished");
        });

        rx
    }
}
