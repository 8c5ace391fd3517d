//! `[store]` section configuration.
//!
//! File locations of the host data this plugin reads and writes.
//!
//! # Example
//!
//! ```toml
//! [store]
//! options = "data/options.json"      # option records (settings live here)
//! post_meta = "data/post-meta.json"  # per-post metadata (read-only)
//! ```
//!
//! Relative paths are resolved against the directory holding `stnvp.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding option records.
    pub options: PathBuf,

    /// JSON file holding per-post metadata.
    pub post_meta: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            options: "options.json".into(),
            post_meta: "post-meta.json".into(),
        }
    }
}

impl StoreConfig {
    /// Resolve relative paths against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.options = root.join(&self.options);
        self.post_meta = root.join(&self.post_meta);
    }
}
