// src/config/mod.rs

//! Configuration files for dyncomp.
//!
//! Responsibilities:
//! - Read and parse a single per-directory `dyncomp.json` (`store.rs`).
//! - Load the user's stop-directory preferences (`preferences.rs`).

pub mod preferences;
pub mod store;

pub use preferences::{load_stop_dirs, Preferences};
pub use store::ConfigFileStore;
