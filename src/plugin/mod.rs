//! The plugin: settings, rewriter and admin handlers bound to host hooks.
//!
//! | Hook                             | Priority | Handler                       |
//! |----------------------------------|----------|-------------------------------|
//! | `do_shortcode_tag`               | 10       | [`Plugin::filter_shortcode`]  |
//! | `add_meta_boxes`                 | 999      | [`Plugin::suppress_metabox`]  |
//! | `admin_init`                     | 10       | [`Plugin::handle_admin_init`] |
//! | `plugin_action_links_<basename>` | 10       | [`Plugin::action_links`]      |
//!
//! Settings are resolved per call, so a save in the same process is seen
//! by the next render.

pub mod metabox;

use crate::config::PluginConfig;
use crate::embed::{EmbedRewriter, MetaThumbnails, ShortcodeAttrs};
use crate::hooks::{DEFAULT_PRIORITY, Hooks, names};
use crate::host::{AdminRequest, JsonFilePostMeta, MetaBoxes, PostMeta, RenderContext};
use crate::settings::{
    JsonFileOptionStore, NonceIssuer, OptionStore, SaveError, SaveOutcome, Settings,
    SettingsResolver, SettingsSaver, StoreError, save,
};
use crate::utils::html::escape_attr;
use std::borrow::Cow;
use std::sync::Arc;

pub struct Plugin {
    config: PluginConfig,
    options: Arc<dyn OptionStore>,
    post_meta: Arc<dyn PostMeta>,
    nonces: NonceIssuer,
    rewriter: EmbedRewriter,
}

impl Plugin {
    pub fn new(
        config: PluginConfig,
        options: Arc<dyn OptionStore>,
        post_meta: Arc<dyn PostMeta>,
    ) -> Self {
        let nonces = NonceIssuer::from_config(&config.security);
        let rewriter = EmbedRewriter::from_config(&config.embed);
        Self {
            config,
            options,
            post_meta,
            nonces,
            rewriter,
        }
    }

    /// Plugin backed by the JSON files named in `[store]`.
    ///
    /// Options are read lazily; post metadata is loaded here.
    pub fn open(config: PluginConfig) -> Result<Self, StoreError> {
        let options = Arc::new(JsonFileOptionStore::new(&config.store.options));
        let post_meta = Arc::new(JsonFilePostMeta::open(&config.store.post_meta)?);
        Ok(Self::new(config, options, post_meta))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn nonces(&self) -> &NonceIssuer {
        &self.nonces
    }

    /// Effective settings right now.
    pub fn settings(&self) -> Settings {
        SettingsResolver::new(self.options.as_ref()).resolve()
    }

    /// Subscribe every handler to its extension point.
    pub fn register(self: &Arc<Self>, hooks: &mut Hooks) {
        let plugin = Arc::clone(self);
        hooks.on_shortcode_tag(DEFAULT_PRIORITY, move |hooks, output, tag, attrs, ctx| {
            plugin.filter_shortcode(hooks, output, tag, attrs, ctx)
        });

        let plugin = Arc::clone(self);
        hooks.on_meta_boxes(metabox::SUPPRESS_PRIORITY, move |hooks, boxes| {
            plugin.suppress_metabox(hooks, boxes);
        });

        let plugin = Arc::clone(self);
        hooks.on_admin_init(DEFAULT_PRIORITY, move |_, request| {
            plugin.handle_admin_init(request)
        });

        let plugin = Arc::clone(self);
        hooks.add_list_filter(
            names::plugin_action_links(&self.config.admin.plugin_basename),
            DEFAULT_PRIORITY,
            move |_, links| plugin.action_links(links),
        );
    }

    // ========================================================================
    // handlers
    // ========================================================================

    /// `do_shortcode_tag`: defer the embed script of matching shortcodes.
    pub fn filter_shortcode(
        &self,
        hooks: &Hooks,
        output: String,
        tag: &str,
        attrs: &ShortcodeAttrs,
        ctx: &RenderContext,
    ) -> String {
        if tag != self.rewriter.tag() || ctx.is_admin {
            return output;
        }

        let settings = self.settings();
        let schema_meta_key = hooks.apply_string_filter(
            names::SCHEMA_META_KEY,
            self.config.embed.schema_meta_key.clone(),
        );
        let thumbnails = MetaThumbnails::new(self.post_meta.as_ref(), schema_meta_key);

        let rewritten = match self
            .rewriter
            .rewrite(&output, tag, attrs, ctx, &settings, &thumbnails)
        {
            Cow::Owned(html) => Some(html),
            Cow::Borrowed(_) => None,
        };
        rewritten.unwrap_or(output)
    }

    /// `add_meta_boxes`: drop the featured video panel when configured to.
    pub fn suppress_metabox(&self, hooks: &Hooks, boxes: &mut MetaBoxes) {
        if !self.settings().hide_featured_metabox {
            return;
        }
        let removed =
            metabox::suppress_featured_video_panel(hooks, boxes, &self.config.metabox.screens);
        crate::debug!("metabox"; "removed featured video panel from {} screen(s)", removed);
    }

    /// `admin_init`: process a settings form submission.
    pub fn handle_admin_init(&self, request: &AdminRequest) -> Result<Option<url::Url>, SaveError> {
        let saver = SettingsSaver::new(self.options.as_ref(), &self.nonces, &self.config.admin);
        match saver.handle(request)? {
            SaveOutcome::Saved { redirect, .. } => Ok(Some(redirect)),
            SaveOutcome::Skipped => Ok(None),
        }
    }

    /// `plugin_action_links_<basename>`: put a Settings link first.
    pub fn action_links(&self, mut links: Vec<String>) -> Vec<String> {
        let path = format!("options-general.php?page={}", save::SETTINGS_PAGE);
        match self.config.admin.admin_url(&path) {
            Ok(url) => links.insert(
                0,
                format!("<a href=\"{}\">Settings</a>", escape_attr(url.as_str())),
            ),
            Err(e) => crate::debug!("admin"; "no settings link, bad admin URL: {}", e),
        }
        links
    }

    /// Token for the settings form, as rendered for `user_id` at `now`.
    /// `None` without a configured secret.
    pub fn settings_nonce(&self, user_id: u64, now: u64) -> Option<String> {
        self.nonces.create(save::NONCE_ACTION, user_id, now)
    }
}
