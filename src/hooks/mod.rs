//! Host extension points.
//!
//! This module provides:
//! - `registry`: the `Hooks` registry (typed actions and named filters)
//! - `names`: extension point names shared with other plugins

mod registry;

pub use registry::*;

/// Names of the filters this plugin applies or subscribes to.
pub mod names {
    /// Edit screens carrying the featured video panel.
    pub const FEATURED_VIDEO_SCREENS: &str = "stnvideo_featured_video_screens";

    /// Post meta key holding the stored video schema JSON.
    pub const SCHEMA_META_KEY: &str = "stnvm_schema_meta_key";

    /// Action links shown for `basename` on the plugins screen.
    pub fn plugin_action_links(basename: &str) -> String {
        format!("plugin_action_links_{basename}")
    }
}
