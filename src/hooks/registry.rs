//! Extension point registry.
//!
//! Handlers are ordered by priority (lower runs first), then by
//! registration order. Every handler receives the registry itself so it
//! can apply other filters while it runs.

use crate::embed::ShortcodeAttrs;
use crate::host::{AdminRequest, MetaBoxes, RenderContext};
use crate::settings::SaveError;
use rustc_hash::FxHashMap;

/// Priority used when a caller has no ordering requirement.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Filter over rendered shortcode output: `(hooks, output, tag, attrs, ctx) -> output`.
pub type ShortcodeTagFn =
    dyn Fn(&Hooks, String, &str, &ShortcodeAttrs, &RenderContext) -> String;

/// Action run after meta boxes are registered.
pub type MetaBoxesFn = dyn Fn(&Hooks, &mut MetaBoxes);

/// Action run at the start of an admin request.
///
/// `Ok(Some(location))` ends the request with a redirect.
pub type AdminInitFn = dyn Fn(&Hooks, &AdminRequest) -> Result<Option<url::Url>, SaveError>;

/// Filter over a list of strings (screens, action links).
pub type ListFilterFn = dyn Fn(&Hooks, Vec<String>) -> Vec<String>;

/// Filter over a single string value.
pub type StringFilterFn = dyn Fn(&Hooks, String) -> String;

struct Handler<F: ?Sized> {
    priority: i32,
    f: Box<F>,
}

/// Insert keeping priority order; equal priorities keep registration order.
fn insert_sorted<F: ?Sized>(list: &mut Vec<Handler<F>>, priority: i32, f: Box<F>) {
    let at = list.partition_point(|h| h.priority <= priority);
    list.insert(at, Handler { priority, f });
}

/// Named extension points of the host.
#[derive(Default)]
pub struct Hooks {
    shortcode_tag: Vec<Handler<ShortcodeTagFn>>,
    meta_boxes: Vec<Handler<MetaBoxesFn>>,
    admin_init: Vec<Handler<AdminInitFn>>,
    list_filters: FxHashMap<String, Vec<Handler<ListFilterFn>>>,
    string_filters: FxHashMap<String, Vec<Handler<StringFilterFn>>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // registration
    // ========================================================================

    /// `do_shortcode_tag`: runs on the output of every rendered shortcode.
    pub fn on_shortcode_tag(
        &mut self,
        priority: i32,
        f: impl Fn(&Hooks, String, &str, &ShortcodeAttrs, &RenderContext) -> String + 'static,
    ) {
        let f: Box<ShortcodeTagFn> = Box::new(f);
        insert_sorted(&mut self.shortcode_tag, priority, f);
    }

    /// `add_meta_boxes`: runs once panels for the edit screen are registered.
    pub fn on_meta_boxes(&mut self, priority: i32, f: impl Fn(&Hooks, &mut MetaBoxes) + 'static) {
        let f: Box<MetaBoxesFn> = Box::new(f);
        insert_sorted(&mut self.meta_boxes, priority, f);
    }

    /// `admin_init`: runs at the start of every admin request.
    pub fn on_admin_init(
        &mut self,
        priority: i32,
        f: impl Fn(&Hooks, &AdminRequest) -> Result<Option<url::Url>, SaveError> + 'static,
    ) {
        let f: Box<AdminInitFn> = Box::new(f);
        insert_sorted(&mut self.admin_init, priority, f);
    }

    pub fn add_list_filter(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        f: impl Fn(&Hooks, Vec<String>) -> Vec<String> + 'static,
    ) {
        let f: Box<ListFilterFn> = Box::new(f);
        let list = self.list_filters.entry(name.into()).or_default();
        insert_sorted(list, priority, f);
    }

    pub fn add_string_filter(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        f: impl Fn(&Hooks, String) -> String + 'static,
    ) {
        let f: Box<StringFilterFn> = Box::new(f);
        let list = self.string_filters.entry(name.into()).or_default();
        insert_sorted(list, priority, f);
    }

    // ========================================================================
    // dispatch
    // ========================================================================

    /// Pass shortcode output through every `do_shortcode_tag` handler.
    pub fn apply_shortcode_tag(
        &self,
        output: String,
        tag: &str,
        attrs: &ShortcodeAttrs,
        ctx: &RenderContext,
    ) -> String {
        self.shortcode_tag
            .iter()
            .fold(output, |acc, h| (h.f)(self, acc, tag, attrs, ctx))
    }

    pub fn do_meta_boxes(&self, boxes: &mut MetaBoxes) {
        for h in &self.meta_boxes {
            (h.f)(self, boxes);
        }
    }

    /// Run `admin_init` handlers until one redirects or fails.
    pub fn do_admin_init(&self, request: &AdminRequest) -> Result<Option<url::Url>, SaveError> {
        for h in &self.admin_init {
            if let Some(location) = (h.f)(self, request)? {
                return Ok(Some(location));
            }
        }
        Ok(None)
    }

    pub fn apply_list_filter(&self, name: &str, value: Vec<String>) -> Vec<String> {
        match self.list_filters.get(name) {
            Some(list) => list.iter().fold(value, |acc, h| (h.f)(self, acc)),
            None => value,
        }
    }

    pub fn apply_string_filter(&self, name: &str, value: String) -> String {
        match self.string_filters.get(name) {
            Some(list) => list.iter().fold(value, |acc, h| (h.f)(self, acc)),
            None => value,
        }
    }

    pub fn has_shortcode_tag_handlers(&self) -> bool {
        !self.shortcode_tag.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_priority_order() {
        let mut hooks = Hooks::new();
        hooks.add_list_filter("screens", 20, |_, mut v| {
            v.push("late".into());
            v
        });
        hooks.add_list_filter("screens", 5, |_, mut v| {
            v.push("early".into());
            v
        });
        hooks.add_list_filter("screens", 20, |_, mut v| {
            v.push("late-2".into());
            v
        });

        let out = hooks.apply_list_filter("screens", vec!["post".into()]);
        assert_eq!(out, vec!["post", "early", "late", "late-2"]);
    }

    #[test]
    fn test_unknown_filter_is_identity() {
        let hooks = Hooks::new();
        assert_eq!(
            hooks.apply_list_filter("nothing", vec!["a".into()]),
            vec!["a"]
        );
        assert_eq!(hooks.apply_string_filter("nothing", "x".into()), "x");
    }

    #[test]
    fn test_handler_can_apply_other_filters() {
        let mut hooks = Hooks::new();
        hooks.add_string_filter("suffix", DEFAULT_PRIORITY, |_, v| format!("{v}-sfx"));
        hooks.add_string_filter("name", DEFAULT_PRIORITY, |h, v| {
            h.apply_string_filter("suffix", v)
        });
        assert_eq!(hooks.apply_string_filter("name", "base".into()), "base-sfx");
    }

    #[test]
    fn test_shortcode_tag_chain() {
        let mut hooks = Hooks::new();
        assert!(!hooks.has_shortcode_tag_handlers());
        hooks.on_shortcode_tag(DEFAULT_PRIORITY, |_, out, tag, _, _| format!("{out}[{tag}]"));
        hooks.on_shortcode_tag(1, |_, out, _, _, _| format!("<{out}>"));

        let out = hooks.apply_shortcode_tag(
            "x".into(),
            "sendtonews",
            &ShortcodeAttrs::default(),
            &RenderContext::default(),
        );
        assert_eq!(out, "<x>[sendtonews]");
    }

    #[test]
    fn test_admin_init_stops_at_redirect() {
        let mut hooks = Hooks::new();
        hooks.on_admin_init(DEFAULT_PRIORITY, |_, _| Ok(None));
        hooks.on_admin_init(DEFAULT_PRIORITY, |_, _| {
            Ok(Some(url::Url::parse("https://a.test/done").unwrap()))
        });
        hooks.on_admin_init(DEFAULT_PRIORITY, |_, _| Err(SaveError::SecurityCheck));

        let location = hooks.do_admin_init(&AdminRequest::default()).unwrap();
        assert_eq!(location.unwrap().as_str(), "https://a.test/done");
    }

    #[test]
    fn test_admin_init_error_propagates() {
        let mut hooks = Hooks::new();
        hooks.on_admin_init(DEFAULT_PRIORITY, |_, _| Err(SaveError::Forbidden));
        assert!(matches!(
            hooks.do_admin_init(&AdminRequest::default()),
            Err(SaveError::Forbidden)
        ));
    }
}
