//! Template types for typed variable injection.
//!
//! Placeholders look like `__NAME__`. Filling is a single pass over the
//! template, so a substituted value is never scanned for placeholders
//! again and `$` in values is literal.

use regex::{Captures, Regex};
use std::marker::PhantomData;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z]+(?:_[A-Z]+)*)__").unwrap());

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace every known `__NAME__` placeholder in one pass.
///
/// `values` maps full placeholders (`"__SCRIPT_URL__"`) to replacements.
/// Unknown placeholders are left in place.
pub fn fill(content: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            let whole = &caps[0];
            values
                .iter()
                .find(|(name, _)| *name == whole)
                .map_or_else(|| whole.to_string(), |(_, value)| (*value).to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_all_occurrences() {
        let out = fill("a __X__ b __X__ __Y_Z__", &[("__X__", "1"), ("__Y_Z__", "2")]);
        assert_eq!(out, "a 1 b 1 2");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("__A__ __B__", &[("__A__", "__B__"), ("__B__", "$0")]);
        assert_eq!(out, "__B__ $0");
    }

    #[test]
    fn test_fill_keeps_unknown_placeholders() {
        assert_eq!(fill("__NOPE__", &[]), "__NOPE__");
    }

    #[test]
    fn test_template_render() {
        struct Name<'a>(&'a str);
        impl TemplateVars for Name<'_> {
            fn apply(&self, content: &str) -> String {
                fill(content, &[("__NAME__", self.0)])
            }
        }

        const HELLO: Template<Name<'static>> = Template::new("hello __NAME__");
        assert_eq!(HELLO.render(&Name("world")), "hello world");
        assert_eq!(HELLO.content(), "hello __NAME__");
    }
}
