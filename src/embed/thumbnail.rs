//! Video thumbnail lookup.
//!
//! Thumbnails come from metadata another plugin stores per post once it
//! has processed the post's videos. The stored JSON is trusted only when
//! the post is marked processed and the requested key is listed:
//!
//! | Meta key                | Expected value                               |
//! |-------------------------|----------------------------------------------|
//! | `stnvm_status`          | `"ok"`                                       |
//! | `stnvm_keys`            | list of processed video keys (or one key)    |
//! | schema key (filterable) | JSON string with `thumbnailUrl: [url, ...]`  |
//!
//! Any step that does not hold means "no thumbnail".

use crate::host::PostMeta;
use crate::utils::url::normalize_https;
use serde_json::Value;

/// Post meta key holding the processing status.
pub const STATUS_META_KEY: &str = "stnvm_status";

/// Status value of a fully processed post.
pub const STATUS_OK: &str = "ok";

/// Post meta key listing processed video keys.
pub const KEYS_META_KEY: &str = "stnvm_keys";

/// Source of thumbnail URLs for a video on a post.
pub trait ThumbnailSource {
    /// `https` thumbnail URL for `video_key` on `post_id`, if known.
    fn thumbnail(&self, post_id: u64, video_key: &str) -> Option<String>;
}

/// Never finds a thumbnail.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThumbnails;

impl ThumbnailSource for NoThumbnails {
    fn thumbnail(&self, _post_id: u64, _video_key: &str) -> Option<String> {
        None
    }
}

/// Thumbnails read from per-post metadata.
pub struct MetaThumbnails<'a> {
    meta: &'a dyn PostMeta,
    schema_meta_key: String,
}

impl<'a> MetaThumbnails<'a> {
    pub fn new(meta: &'a dyn PostMeta, schema_meta_key: impl Into<String>) -> Self {
        Self {
            meta,
            schema_meta_key: schema_meta_key.into(),
        }
    }

    fn is_processed(&self, post_id: u64, video_key: &str) -> bool {
        let status = self.meta.get(post_id, STATUS_META_KEY);
        if status.as_ref().and_then(Value::as_str) != Some(STATUS_OK) {
            return false;
        }

        match self.meta.get(post_id, KEYS_META_KEY) {
            Some(Value::Array(keys)) => keys.iter().any(|k| k.as_str() == Some(video_key)),
            Some(Value::String(key)) => key == video_key,
            _ => false,
        }
    }
}

impl ThumbnailSource for MetaThumbnails<'_> {
    fn thumbnail(&self, post_id: u64, video_key: &str) -> Option<String> {
        if !self.is_processed(post_id, video_key) {
            return None;
        }

        let Some(Value::String(schema)) = self.meta.get(post_id, &self.schema_meta_key) else {
            return None;
        };
        let url = first_thumbnail_url(&schema)?;

        let url = normalize_https(&url);
        if url.is_empty() {
            crate::debug!("embed"; "post {}: thumbnail for `{}` is not https, ignoring", post_id, video_key);
            return None;
        }
        Some(url)
    }
}

/// First entry of `thumbnailUrl` in a schema JSON document.
fn first_thumbnail_url(schema: &str) -> Option<String> {
    if schema.is_empty() {
        return None;
    }
    let mut parsed: Value = serde_json::from_str(schema).ok()?;
    match parsed.get_mut("thumbnailUrl")?.as_array_mut()?.first_mut()?.take() {
        Value::String(url) if !url.is_empty() => Some(url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPostMeta;
    use serde_json::json;

    const SCHEMA_KEY: &str = "hvy_video_schema_data";

    fn processed(schema: &str) -> MemoryPostMeta {
        MemoryPostMeta::new()
            .with(42, STATUS_META_KEY, STATUS_OK)
            .with(42, KEYS_META_KEY, json!(["abc123", "def456"]))
            .with(42, SCHEMA_KEY, schema)
    }

    #[test]
    fn test_thumbnail_found_and_normalized() {
        let meta = processed(r#"{"thumbnailUrl": ["//cdn.example.com/t.jpg", "//cdn.example.com/2.jpg"]}"#);
        let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
        assert_eq!(
            source.thumbnail(42, "abc123").as_deref(),
            Some("https://cdn.example.com/t.jpg")
        );
    }

    #[test]
    fn test_thumbnail_requires_ok_status() {
        let meta = processed(r#"{"thumbnailUrl": ["https://cdn.example.com/t.jpg"]}"#)
            .with(42, STATUS_META_KEY, "pending");
        let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
        assert_eq!(source.thumbnail(42, "abc123"), None);
    }

    #[test]
    fn test_thumbnail_requires_listed_key() {
        let meta = processed(r#"{"thumbnailUrl": ["https://cdn.example.com/t.jpg"]}"#);
        let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
        assert_eq!(source.thumbnail(42, "zzz"), None);
        assert_eq!(source.thumbnail(7, "abc123"), None);
    }

    #[test]
    fn test_thumbnail_scalar_keys() {
        let meta = processed(r#"{"thumbnailUrl": ["https://cdn.example.com/t.jpg"]}"#)
            .with(42, KEYS_META_KEY, "abc123");
        let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
        assert!(source.thumbnail(42, "abc123").is_some());
    }

    #[test]
    fn test_thumbnail_malformed_schema() {
        for schema in [
            "",
            "{not json",
            r#"{"thumbnailUrl": []}"#,
            r#"{"thumbnailUrl": "https://cdn.example.com/t.jpg"}"#,
            r#"{"thumbnailUrl": [42]}"#,
            r#"{"thumbnailUrl": [""]}"#,
            r#"["https://cdn.example.com/t.jpg"]"#,
        ] {
            let meta = processed(schema);
            let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
            assert_eq!(source.thumbnail(42, "abc123"), None, "schema: {schema}");
        }
    }

    #[test]
    fn test_thumbnail_schema_must_be_string() {
        let meta = MemoryPostMeta::new()
            .with(42, STATUS_META_KEY, STATUS_OK)
            .with(42, KEYS_META_KEY, json!(["abc123"]))
            .with(42, SCHEMA_KEY, json!({"thumbnailUrl": ["https://cdn.example.com/t.jpg"]}));
        let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
        assert_eq!(source.thumbnail(42, "abc123"), None);
    }

    #[test]
    fn test_thumbnail_rejects_other_schemes() {
        let meta = processed(r#"{"thumbnailUrl": ["javascript:alert(1)"]}"#);
        let source = MetaThumbnails::new(&meta, SCHEMA_KEY);
        assert_eq!(source.thumbnail(42, "abc123"), None);
    }

    #[test]
    fn test_thumbnail_custom_schema_key() {
        let meta = MemoryPostMeta::new()
            .with(42, STATUS_META_KEY, STATUS_OK)
            .with(42, KEYS_META_KEY, json!(["abc123"]))
            .with(42, "custom_schema", r#"{"thumbnailUrl": ["https://cdn.example.com/c.jpg"]}"#);
        let source = MetaThumbnails::new(&meta, "custom_schema");
        assert_eq!(
            source.thumbnail(42, "abc123").as_deref(),
            Some("https://cdn.example.com/c.jpg")
        );
        assert_eq!(NoThumbnails.thumbnail(42, "abc123"), None);
    }
}
