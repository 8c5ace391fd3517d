//! HTML utility functions.
//!
//! Provides the HTML-side helpers used when rewriting embed output:
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `sanitize_text_field()` - plain-text cleanup of user-supplied values
//! - `sanitize_class()` - restrict a value to CSS class-safe characters
//! - `parse_attributes()` - shortcode/HTML attribute string parsing

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// =============================================================================
// HTML Escaping
// =============================================================================

fn entity(b: u8) -> Option<&'static str> {
    Some(match b {
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'&' => "&amp;",
        b'"' => "&quot;",
        b'\'' => "&#39;",
        _ => return None,
    })
}

/// Escape text for an HTML body or a double-quoted attribute.
///
/// Returns the input unchanged when nothing needs escaping.
///
/// ```ignore
/// assert_eq!(escape("Security check failed"), "Security check failed");
/// assert_eq!(escape("<b>"), "&lt;b&gt;");
/// ```
pub fn escape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.bytes().position(|b| entity(b).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    let mut copied = first;
    for (i, b) in s.bytes().enumerate().skip(first) {
        if let Some(e) = entity(b) {
            out.push_str(&s[copied..i]);
            out.push_str(e);
            copied = i + 1;
        }
    }
    out.push_str(&s[copied..]);
    Cow::Owned(out)
}

/// [`escape`] for double-quoted attribute values.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

// =============================================================================
// Sanitizing
// =============================================================================

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduce a user-supplied value to a single line of plain text.
///
/// Strips tags, removes stray `<`, collapses whitespace runs (including
/// line breaks and tabs) into one space and trims the ends.
///
/// # Example
/// ```ignore
/// assert_eq!(sanitize_text_field("  abc<b>123</b>\n"), "abc123");
/// ```
pub fn sanitize_text_field(s: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(s, "");
    let stripped = stripped.replace('<', "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Keep only `[A-Za-z0-9_-]`, so the value is usable as a CSS class
/// name inside a selector without further escaping.
pub fn sanitize_class(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

// =============================================================================
// Attribute Parsing
// =============================================================================

/// Parse HTML-style attributes from a string.
///
/// Input: `key="abc123" type='float' width=640 autoplay`
/// Output: `vec![("key", "abc123"), ("type", "float"), ("width", "640"), ("autoplay", "")]`
pub fn parse_attributes(s: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        // Read attribute name
        let mut name = String::new();
        name.push(c);
        while let Some(&next) = chars.peek() {
            if next == '=' || next.is_whitespace() {
                break;
            }
            name.push(next);
            chars.next();
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        if chars.peek() == Some(&'=') {
            chars.next(); // consume '='

            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }

            let value = match chars.peek().copied() {
                Some(quote @ ('"' | '\'')) => {
                    chars.next();
                    let mut val = String::new();
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        val.push(c);
                    }
                    val
                }
                _ => {
                    // Unquoted value (read until whitespace)
                    let mut val = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        val.push(c);
                        chars.next();
                    }
                    val
                }
            };

            attrs.push((name.to_ascii_lowercase(), value));
        } else {
            // Boolean attribute (no value)
            attrs.push((name.to_ascii_lowercase(), String::new()));
        }
    }

    attrs
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("hello world"), "hello world");
        assert!(matches!(escape("hello"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("normal"), "normal");
        assert_eq!(escape_attr("a\"b&c"), "a&quot;b&amp;c");
        assert_eq!(
            escape_attr("https://x.test/a.jpg\");}</style><script>"),
            "https://x.test/a.jpg&quot;);}&lt;/style&gt;&lt;script&gt;"
        );
    }

    #[test]
    fn test_sanitize_text_field() {
        assert_eq!(sanitize_text_field("abc123"), "abc123");
        assert_eq!(sanitize_text_field("  abc<b>123</b>\n"), "abc123");
        assert_eq!(sanitize_text_field("a\t\tb\r\nc"), "a b c");
        assert_eq!(sanitize_text_field("x < y"), "x y");
        assert_eq!(sanitize_text_field(""), "");
    }

    #[test]
    fn test_sanitize_class() {
        assert_eq!(sanitize_class("abc123"), "abc123");
        assert_eq!(sanitize_class("F_ab-12"), "F_ab-12");
        assert_eq!(sanitize_class("a b.c{}\"'"), "abc");
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(r#"key="abc" Type='float' width=640 autoplay"#);
        assert_eq!(attrs.len(), 4);
        assert_eq!(attrs[0], ("key".to_string(), "abc".to_string()));
        assert_eq!(attrs[1], ("type".to_string(), "float".to_string()));
        assert_eq!(attrs[2], ("width".to_string(), "640".to_string()));
        assert_eq!(attrs[3], ("autoplay".to_string(), "".to_string()));
    }

    #[test]
    fn test_parse_attributes_spacing_around_equals() {
        let attrs = parse_attributes(r#"key = "abc 123""#);
        assert_eq!(attrs, vec![("key".to_string(), "abc 123".to_string())]);
    }
}
