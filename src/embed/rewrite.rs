//! Markup rewriter for the video embed shortcode.
//!
//! The upstream shortcode prints a container plus a blocking
//! `<script src=...>`. When a load delay is set, the first such tag is
//! swapped for an inline loader that injects the script after page load
//! plus the delay, and a placeholder style block is put in front so the
//! player area keeps its size while empty.
//!
//! Every failed step narrows the transform; nothing here returns an error.

use super::ShortcodeAttrs;
use super::defer::{self, LOADER_HTML, LoaderVars, ThumbnailVars};
use super::thumbnail::ThumbnailSource;
use crate::config::EmbedConfig;
use crate::host::RenderContext;
use crate::settings::Settings;
use crate::utils::html::{sanitize_class, sanitize_text_field};
use crate::utils::url::normalize_https;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Blocking external script as printed by the upstream shortcode.
///
/// Deliberately narrow: it only has to recognize one generator's output.
static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]+src=["']?([^"']+)["']?[^>]*></script>"#).unwrap()
});

/// Rewrites the output of one shortcode tag.
#[derive(Debug, Clone)]
pub struct EmbedRewriter {
    tag: String,
}

impl EmbedRewriter {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn from_config(config: &EmbedConfig) -> Self {
        Self::new(config.tag.clone())
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Rewrite `output` of shortcode `tag` for deferred loading.
    ///
    /// Returns `output` untouched (borrowed) unless the tag matches, the
    /// render is not in the admin area, a delay is set and the output
    /// carries a script tag.
    pub fn rewrite<'o>(
        &self,
        output: &'o str,
        tag: &str,
        attrs: &ShortcodeAttrs,
        ctx: &RenderContext,
        settings: &Settings,
        thumbnails: &dyn ThumbnailSource,
    ) -> Cow<'o, str> {
        if tag != self.tag || ctx.is_admin {
            return Cow::Borrowed(output);
        }

        let delay = settings.load_delay_ms;
        if delay == 0 {
            return Cow::Borrowed(output);
        }

        let Some(caps) = SCRIPT_TAG.captures(output) else {
            crate::debug!("embed"; "no script tag in `{}` output, leaving it alone", tag);
            return Cow::Borrowed(output);
        };
        let (Some(whole), Some(src)) = (caps.get(0), caps.get(1)) else {
            return Cow::Borrowed(output);
        };

        let key = attrs
            .get("key")
            .map(sanitize_text_field)
            .filter(|k| !k.is_empty());
        let thumbnail = match (ctx.post_id, key.as_deref()) {
            (Some(post_id), Some(key)) => thumbnails.thumbnail(post_id, key),
            _ => None,
        };
        let key_class = key.as_deref().map(sanitize_class).unwrap_or_default();

        let instance = match &thumbnail {
            Some(url) if !key_class.is_empty() => Some(ThumbnailVars {
                key_class: &key_class,
                thumbnail_url: url,
            }),
            _ => None,
        };
        let style = defer::style_block(instance.as_ref());

        let script_url = normalize_https(src.as_str());
        let replacement = if script_url.is_empty() {
            crate::debug!("embed"; "dropping script with non-https source `{}`", src.as_str());
            String::new()
        } else {
            crate::debug!("embed"; "deferring {} by {}ms", script_url, delay);
            LOADER_HTML.render(&LoaderVars {
                script_url: &script_url,
                delay_ms: delay,
            })
        };

        let mut rewritten = String::with_capacity(style.len() + output.len() + replacement.len());
        rewritten.push_str(&style);
        rewritten.push_str(&output[..whole.start()]);
        rewritten.push_str(&replacement);
        rewritten.push_str(&output[whole.end()..]);
        Cow::Owned(rewritten)
    }
}
