// src/config/preferences.rs

//! User preferences: where the upward config search is allowed to stop.
//!
//! Read from `<home>/.config/dyncomp/config.json`:
//!
//! ```json
//! { "stop_dirs": ["/home/me", "/srv/projects"] }
//! ```
//!
//! A missing file, or a file without `stop_dirs`, falls back to the user's
//! home directory. An explicit empty list is kept as-is and later rejected by
//! the resolver.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::errors::{DyncompError, Result};
use crate::fs::FileSystem;
use crate::types::StopDirs;

/// File name of the preferences file inside the preferences directory.
pub const PREFERENCES_FILE_NAME: &str = "config.json";

/// Key holding the stop directory list.
pub const STOP_DIRS_KEY: &str = "stop_dirs";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preferences {
    pub stop_dirs: Option<Vec<PathBuf>>,
}

/// The user's home directory, or an environment error if it can't be found.
pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or_else(|| {
        DyncompError::Environment("Couldn't get the user home dir".to_string())
    })
}

/// Default preferences directory: `<home>/.config/dyncomp`.
pub fn default_preferences_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".config").join("dyncomp"))
}

/// Load `config.json` from `prefs_dir`, if present.
pub fn load_preferences(fs: &dyn FileSystem, prefs_dir: &Path) -> Result<Preferences> {
    let path = prefs_dir.join(PREFERENCES_FILE_NAME);
    if !fs.exists(&path) {
        debug!(path = %path.display(), "no preferences file; using defaults");
        return Ok(Preferences::default());
    }

    let contents = fs
        .read_to_string(&path)
        .map_err(|e| DyncompError::Preferences(format!("{e:#}")))?;

    serde_json::from_str(&contents)
        .map_err(|e| DyncompError::Preferences(format!("{}: {e}", path.display())))
}

/// Resolve the stop directory set from the preferences in `prefs_dir`,
/// defaulting to `[home]`.
///
/// `home` is only called when the preferences don't name any stop dirs.
pub fn load_stop_dirs<H>(fs: &dyn FileSystem, prefs_dir: &Path, home: H) -> Result<StopDirs>
where
    H: FnOnce() -> Result<PathBuf>,
{
    let prefs = load_preferences(fs, prefs_dir)?;
    let stop_dirs = match prefs.stop_dirs {
        Some(dirs) => StopDirs::new(dirs),
        None => StopDirs::new([home()?]),
    };
    debug!(key = STOP_DIRS_KEY, ?stop_dirs, "stop directories loaded");
    Ok(stop_dirs)
}
