//! CSS helpers.

use std::borrow::Cow;

/// Escape a value for a double-quoted CSS string inside `<style>`.
///
/// `<style>` is raw text, so HTML entities are not decoded there. Quotes
/// and backslashes are backslash-escaped; line breaks and `<` become hex
/// escapes, which keeps `</style>` out of the output.
///
/// ```ignore
/// assert_eq!(escape_string("a.jpg?w=1&h=2"), "a.jpg?w=1&h=2");
/// assert_eq!(escape_string(r#"a"b"#), r#"a\"b"#);
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !s.contains(['"', '\\', '\n', '\r', '\u{c}', '<']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            '\u{c}' => out.push_str("\\c "),
            '<' => out.push_str("\\3c "),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
