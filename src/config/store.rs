// src/config/store.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{DyncompError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{CONFIG_FILE_NAME, MergedConfig};

/// Reads and parses single `dyncomp.json` files.
///
/// Knows nothing about directory walking or merging; it only answers
/// "is there a config file here?" and "what does this one file say?".
#[derive(Debug, Clone)]
pub struct ConfigFileStore {
    fs: Arc<dyn FileSystem>,
}

impl ConfigFileStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Return the config file path for `dir` if one exists there.
    ///
    /// Existence check only; the file is not opened.
    pub fn contains_config_file(&self, dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if self.fs.exists(&candidate) {
            Some(candidate)
        } else {
            trace!(dir = %dir.display(), "no config file in directory");
            None
        }
    }

    /// Parse the config file at `path` into a name -> command mapping.
    ///
    /// - unreadable or missing file: [`DyncompError::Io`]
    /// - anything but a JSON object of strings: [`DyncompError::MalformedConfig`]
    /// - `{}` is valid and yields an empty mapping
    pub fn parse(&self, path: &Path) -> Result<MergedConfig> {
        let contents = self
            .fs
            .read_to_string(path)
            .map_err(|source| DyncompError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let entries: MergedConfig =
            serde_json::from_str(&contents).map_err(|source| DyncompError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), commands = entries.len(), "parsed config file");
        Ok(entries)
    }
}

impl Default for ConfigFileStore {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem))
    }
}
