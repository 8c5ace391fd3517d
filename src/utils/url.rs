//! URL normalization for embed sources.
//!
//! Embed markup from the upstream generator uses protocol-relative URLs
//! (`//embed.sendtonews.com/...`). Everything emitted by the rewriter is
//! forced onto `https` and anything else is dropped.

/// Prefix a protocol-relative URL (`//host/path`) with `https:`.
///
/// Other URLs are returned as-is.
pub fn force_https_scheme(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// Sanitize a URL, allowing only the `https` scheme.
///
/// Returns an empty string when the URL does not parse, has no host, or
/// uses any other scheme (`http`, `javascript`, `data`, ...). Characters
/// that are unsafe in URLs (quotes, spaces, angle brackets) come back
/// percent-encoded by the `url` serializer.
///
/// # Examples
/// ```ignore
/// sanitize_https("https://cdn.example.com/t.jpg") -> "https://cdn.example.com/t.jpg"
/// sanitize_https("javascript:alert(1)")           -> ""
/// sanitize_https("http://cdn.example.com/t.jpg")  -> ""
/// ```
pub fn sanitize_https(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match url::Url::parse(trimmed) {
        Ok(parsed) if parsed.scheme() == "https" && parsed.has_host() => parsed.into(),
        _ => String::new(),
    }
}

/// Normalize a protocol-relative URL and sanitize it to `https` only.
#[inline]
pub fn normalize_https(raw: &str) -> String {
    sanitize_https(&force_https_scheme(raw.trim()))
}
