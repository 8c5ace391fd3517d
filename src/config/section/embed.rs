//! `[embed]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [embed]
//! tag = "sendtonews"                        # shortcode whose output is rewritten
//! schema_meta_key = "hvy_video_schema_data" # post meta holding the video schema JSON
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Shortcode tag handled by the rewriter.
    pub tag: String,

    /// Default post meta key of the stored video schema.
    /// The `stnvm_schema_meta_key` filter can still override it per request.
    pub schema_meta_key: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            tag: "sendtonews".into(),
            schema_meta_key: "hvy_video_schema_data".into(),
        }
    }
}

impl EmbedConfig {
    pub const TAG: FieldPath = FieldPath::new("embed.tag");
    pub const SCHEMA_META_KEY: FieldPath = FieldPath::new("embed.schema_meta_key");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.tag.trim().is_empty() {
            diag.error_with_hint(Self::TAG, "must not be empty", "use `sendtonews`");
        } else if self.tag.chars().any(char::is_whitespace) {
            diag.error(Self::TAG, "shortcode tags cannot contain whitespace");
        }

        if self.schema_meta_key.trim().is_empty() {
            diag.error(Self::SCHEMA_META_KEY, "must not be empty");
        }
    }
}
