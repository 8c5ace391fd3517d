//! JavaScript string-literal escaping.

use std::borrow::Cow;

/// Escape a value for interpolation inside a quoted JS string literal
/// that itself sits in an inline `<script>` element.
///
/// Quotes and backslashes are backslash-escaped, line terminators become
/// escape sequences, and `<`, `>`, `&` become `\u00XX` so the value can
/// never close the surrounding `<script>` element.
pub fn escape_js(s: &str) -> Cow<'_, str> {
    let needs_escape = s.chars().any(|c| {
        matches!(
            c,
            '"' | '\'' | '\\' | '\n' | '\r' | '<' | '>' | '&' | '\u{2028}' | '\u{2029}'
        )
    });
    if !needs_escape {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
