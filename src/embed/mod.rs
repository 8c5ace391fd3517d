//! Deferred loading for video embed shortcodes.
//!
//! # Module Structure
//!
//! - `attrs` - Shortcode attribute map
//! - `template` - Template types for typed variable injection
//! - `thumbnail` - Thumbnail lookup in per-post metadata
//! - `rewrite` - The markup rewriter
//! - `defer` - Embedded loader script and placeholder styles
//!
//! # Usage
//!
//! ```ignore
//! let rewriter = EmbedRewriter::new("sendtonews");
//! let html = rewriter.rewrite(&output, "sendtonews", &attrs, &ctx, &settings, &NoThumbnails);
//! ```

mod attrs;
mod rewrite;
mod template;
mod thumbnail;

pub use attrs::ShortcodeAttrs;
pub use rewrite::EmbedRewriter;
pub use template::{Template, TemplateVars, fill};
pub use thumbnail::{MetaThumbnails, NoThumbnails, ThumbnailSource};

pub mod defer {
    use super::{Template, TemplateVars, fill};
    use crate::utils::css;
    use crate::utils::js::escape_js;

    /// Variables for loader.html.
    pub struct LoaderVars<'a> {
        /// Already sanitized `https` URL.
        pub script_url: &'a str,
        pub delay_ms: u64,
    }

    impl TemplateVars for LoaderVars<'_> {
        fn apply(&self, content: &str) -> String {
            let url = escape_js(self.script_url);
            let delay = self.delay_ms.to_string();
            fill(
                content,
                &[("__SCRIPT_URL__", url.as_ref()), ("__DELAY_MS__", delay.as_str())],
            )
        }
    }

    /// Inline script that injects the player script once the page has
    /// loaded and the delay has passed.
    pub const LOADER_HTML: Template<LoaderVars<'static>> =
        Template::new(include_str!("defer/loader.html"));

    /// 16:9 placeholder box shown until the player renders.
    pub const PLAYER_CSS: &str = include_str!("defer/player.css");

    /// Variables for thumbnail.css.
    pub struct ThumbnailVars<'a> {
        /// Class suffix, restricted to `[A-Za-z0-9_-]`.
        pub key_class: &'a str,
        /// Already sanitized `https` URL.
        pub thumbnail_url: &'a str,
    }

    impl TemplateVars for ThumbnailVars<'_> {
        fn apply(&self, content: &str) -> String {
            let url = css::escape_string(self.thumbnail_url);
            fill(
                content,
                &[("__KEY_CLASS__", self.key_class), ("__THUMBNAIL_URL__", url.as_ref())],
            )
        }
    }

    /// Per-instance rule showing the video thumbnail behind the player.
    pub const THUMBNAIL_CSS: Template<ThumbnailVars<'static>> =
        Template::new(include_str!("defer/thumbnail.css"));

    /// `<style>` block with the placeholder and, optionally, one thumbnail rule.
    pub fn style_block(thumbnail: Option<&ThumbnailVars<'_>>) -> String {
        let mut css = String::from("<style>\n");
        css.push_str(PLAYER_CSS);
        if let Some(vars) = thumbnail {
            css.push_str(&vars.apply(THUMBNAIL_CSS.content()));
        }
        css.push_str("</style>");
        css
    }
}
