//! `[metabox]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [metabox]
//! screens = ["post", "page", "video"]
//! ```
//!
//! These are the edit screens on which the featured video panel is
//! registered. The list is the starting value of the
//! `stnvideo_featured_video_screens` filter.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaboxConfig {
    /// Edit screens carrying the featured video panel.
    pub screens: Vec<String>,
}

impl Default for MetaboxConfig {
    fn default() -> Self {
        Self {
            screens: vec!["post".into(), "page".into()],
        }
    }
}

impl MetaboxConfig {
    pub const SCREENS: FieldPath = FieldPath::new("metabox.screens");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.screens.iter().any(|s| s.trim().is_empty()) {
            diag.error(Self::SCREENS, "screen identifiers must not be empty");
        }
        if self.screens.is_empty() {
            diag.warn(Self::SCREENS, "empty list, the panel is never suppressed");
        }
    }
}
