// src/resolve/resolver.rs

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ConfigFileStore;
use crate::errors::DyncompError;
use crate::fs::FileSystem;
use crate::resolve::walker::DirectoryWalker;
use crate::types::{CONFIG_FILE_NAME, MergedConfig, StopDirs};

/// A failed resolution, together with whatever had been merged before the
/// failure.
///
/// The partial mapping is for diagnostics only; a failed resolution must not
/// be used to run anything.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct ResolveError {
    pub error: DyncompError,
    pub partial: MergedConfig,
}

impl ResolveError {
    fn before_walk(error: DyncompError) -> Self {
        Self {
            error,
            partial: MergedConfig::new(),
        }
    }
}

impl From<ResolveError> for DyncompError {
    fn from(err: ResolveError) -> Self {
        err.error
    }
}

/// Builds the merged command mapping for a start directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    store: ConfigFileStore,
    walker: DirectoryWalker,
}

impl ConfigResolver {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        let store = ConfigFileStore::new(fs);
        Self {
            walker: DirectoryWalker::new(store.clone()),
            store,
        }
    }

    /// Walk from `start` up to the nearest stop directory and merge every
    /// `dyncomp.json` found on the way.
    ///
    /// Files closer to `start` win: a key is only inserted if no nearer file
    /// has set it already. The first file that fails to parse ends the walk.
    pub async fn resolve(
        &self,
        stop_dirs: &StopDirs,
        start: &Path,
    ) -> Result<MergedConfig, ResolveError> {
        if stop_dirs.is_empty() {
            return Err(ResolveError::before_walk(DyncompError::StopDirsEmpty));
        }
        if !stop_dirs.covers(start) {
            return Err(ResolveError::before_walk(DyncompError::StartNotContained {
                start: start.to_path_buf(),
            }));
        }

        let mut found = self.walker.spawn(start.to_path_buf(), stop_dirs.clone());
        let mut merged = MergedConfig::new();

        while let Some(path) = found.recv().await {
            let entries = match self.store.parse(&path) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "config file failed to parse; returning current config"
                    );
                    // Dropping `found` stops the walk.
                    return Err(ResolveError {
                        error,
                        partial: merged,
                    });
                }
            };

            for (name, command) in entries {
                if !merged.contains_key(&name) {
                    merged.insert(name, command);
                }
            }
        }

        info!(
            start = %start.display(),
            commands = merged.len(),
            "config resolution complete"
        );
        Ok(merged)
    }

    /// Resolve and look up a single command string by name.
    pub async fn resolve_command(
        &self,
        stop_dirs: &StopDirs,
        start: &Path,
        name: &str,
    ) -> Result<String, DyncompError> {
        let mut merged = self.resolve(stop_dirs, start).await?;
        match merged.remove(name) {
            Some(command) => {
                debug!(name, command = %command, "command resolved");
                Ok(command)
            }
            None => Err(DyncompError::CommandNotFound {
                name: name.to_string(),
                config_file: CONFIG_FILE_NAME,
            }),
        }
    }
}
