#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dyncomp::types::{CONFIG_FILE_NAME, StopDirs};
use tempfile::TempDir;

/// A temporary directory tree populated with `dyncomp.json` files.
///
/// The tree is removed when this value is dropped.
pub struct ConfigTree {
    _dir: TempDir,
    root: PathBuf,
}

impl ConfigTree {
    /// Canonical path of the tree's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    /// A stop set holding just the tree root.
    pub fn stop_dirs(&self) -> StopDirs {
        StopDirs::new([self.root.clone()])
    }

    /// Overwrite the config file of `rel` with raw contents.
    pub fn write_raw(&self, rel: &str, contents: &str) {
        let dir = self.path(rel);
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join(CONFIG_FILE_NAME), contents).expect("write config file");
    }
}

/// Builder for [`ConfigTree`] to simplify test setup.
///
/// Directories are given relative to the tree root; `""` is the root itself.
#[derive(Default)]
pub struct ConfigTreeBuilder {
    dirs: Vec<String>,
    configs: Vec<(String, String)>,
}

impl ConfigTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an (empty) directory.
    pub fn with_dir(mut self, rel: &str) -> Self {
        self.dirs.push(rel.to_string());
        self
    }

    /// Put a `dyncomp.json` with the given commands into `rel`.
    pub fn with_config(mut self, rel: &str, commands: &[(&str, &str)]) -> Self {
        let map: BTreeMap<&str, &str> = commands.iter().copied().collect();
        let json = serde_json::to_string_pretty(&map).expect("serialize config");
        self.configs.push((rel.to_string(), json));
        self
    }

    /// Put a `dyncomp.json` with arbitrary (possibly invalid) contents into `rel`.
    pub fn with_raw_config(mut self, rel: &str, contents: &str) -> Self {
        self.configs.push((rel.to_string(), contents.to_string()));
        self
    }

    pub fn build(self) -> ConfigTree {
        let dir = tempfile::tempdir().expect("create temp dir");
        // Canonical root so lexical prefix checks match on platforms where
        // the temp dir sits behind a symlink.
        let root = dir.path().canonicalize().expect("canonicalize temp dir");
        let tree = ConfigTree { _dir: dir, root };

        for rel in &self.dirs {
            fs::create_dir_all(tree.path(rel)).expect("create dir");
        }
        for (rel, contents) in &self.configs {
            tree.write_raw(rel, contents);
        }
        tree
    }
}
