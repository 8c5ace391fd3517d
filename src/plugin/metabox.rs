//! Featured video panel suppression.
//!
//! The video plugin adds its panel to every screen returned by the
//! `stnvideo_featured_video_screens` filter. Removal walks the same
//! filtered list, so it hits exactly the screens registration could have.

use crate::hooks::{Hooks, names::FEATURED_VIDEO_SCREENS};
use crate::host::{MetaBoxContext, MetaBoxes};

/// Panel id used by the video plugin.
pub const FEATURED_VIDEO_METABOX: &str = "stnvideo_featured_video";

/// Title the video plugin gives the panel.
pub const FEATURED_VIDEO_TITLE: &str = "Featured Video";

/// Runs after the video plugin has registered its panel.
pub const SUPPRESS_PRIORITY: i32 = 999;

/// Screens carrying the panel, after filters.
pub fn featured_video_screens(hooks: &Hooks, defaults: &[String]) -> Vec<String> {
    hooks.apply_list_filter(FEATURED_VIDEO_SCREENS, defaults.to_vec())
}

/// Register the panel the way the video plugin does.
pub fn register_featured_video_panel(hooks: &Hooks, boxes: &mut MetaBoxes, defaults: &[String]) {
    for screen in featured_video_screens(hooks, defaults) {
        boxes.add(
            FEATURED_VIDEO_METABOX,
            FEATURED_VIDEO_TITLE,
            screen,
            MetaBoxContext::Side,
        );
    }
}

/// Remove the panel from every screen it may be on. Returns how many
/// registrations were removed.
pub fn suppress_featured_video_panel(
    hooks: &Hooks,
    boxes: &mut MetaBoxes,
    defaults: &[String],
) -> usize {
    let mut removed = 0;
    for screen in featured_video_screens(hooks, defaults) {
        if boxes.remove(FEATURED_VIDEO_METABOX, &screen, MetaBoxContext::Side) {
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::DEFAULT_PRIORITY;

    fn defaults() -> Vec<String> {
        vec!["post".into(), "page".into()]
    }

    #[test]
    fn test_register_then_suppress() {
        let hooks = Hooks::new();
        let mut boxes = MetaBoxes::new();
        boxes.add("postexcerpt", "Excerpt", "post", MetaBoxContext::Normal);

        register_featured_video_panel(&hooks, &mut boxes, &defaults());
        assert!(boxes.contains(FEATURED_VIDEO_METABOX, "post"));
        assert!(boxes.contains(FEATURED_VIDEO_METABOX, "page"));

        assert_eq!(suppress_featured_video_panel(&hooks, &mut boxes, &defaults()), 2);
        assert!(!boxes.contains(FEATURED_VIDEO_METABOX, "post"));
        assert!(!boxes.contains(FEATURED_VIDEO_METABOX, "page"));
        assert!(boxes.contains("postexcerpt", "post"));
    }

    #[test]
    fn test_suppress_follows_filtered_screens() {
        let mut hooks = Hooks::new();
        hooks.add_list_filter(FEATURED_VIDEO_SCREENS, DEFAULT_PRIORITY, |_, mut screens| {
            screens.push("video".into());
            screens
        });

        let mut boxes = MetaBoxes::new();
        register_featured_video_panel(&hooks, &mut boxes, &defaults());
        assert!(boxes.contains(FEATURED_VIDEO_METABOX, "video"));

        assert_eq!(suppress_featured_video_panel(&hooks, &mut boxes, &defaults()), 3);
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_suppress_without_registration() {
        let hooks = Hooks::new();
        let mut boxes = MetaBoxes::new();
        assert_eq!(suppress_featured_video_panel(&hooks, &mut boxes, &defaults()), 0);
    }
}
