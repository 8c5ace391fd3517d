//! Shortcode attributes.

use crate::utils::html::parse_attributes;

/// Attributes of one shortcode instance, in source order.
///
/// Names are case-insensitive and stored lowercase. A repeated name keeps
/// its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAttrs {
    pairs: Vec<(String, String)>,
}

impl ShortcodeAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw attribute string such as `key="abc123" type=float autoplay`.
    pub fn from_raw(raw: &str) -> Self {
        Self::from_pairs(parse_attributes(raw))
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::new();
        for (k, v) in pairs {
            attrs.insert(k, v);
        }
        attrs
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let attrs = ShortcodeAttrs::from_raw(r#"key="abc123" Type='float' width=640 autoplay"#);
        assert_eq!(attrs.get("key"), Some("abc123"));
        assert_eq!(attrs.get("type"), Some("float"));
        assert_eq!(attrs.get("TYPE"), Some("float"));
        assert_eq!(attrs.get("width"), Some("640"));
        assert_eq!(attrs.get("autoplay"), Some(""));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn test_repeated_name_last_value_wins() {
        let attrs = ShortcodeAttrs::from_pairs([("key", "a"), ("fk", "x"), ("KEY", "b")]);
        assert_eq!(attrs.get("key"), Some("b"));
        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["key", "fk"]);
    }

    #[test]
    fn test_empty() {
        assert!(ShortcodeAttrs::default().is_empty());
        assert!(ShortcodeAttrs::from_raw("   ").is_empty());
    }
}
