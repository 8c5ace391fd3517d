//! Per-post metadata, written by other plugins and read here.
//!
//! File layout of `post-meta.json`:
//!
//! ```json
//! {
//!   "42": {
//!     "stnvm_status": "ok",
//!     "stnvm_keys": ["abc123"],
//!     "hvy_video_schema_data": "{\"thumbnailUrl\": [\"//cdn.example.com/t.jpg\"]}"
//!   }
//! }
//! ```

use crate::settings::StoreError;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::path::Path;

/// Read access to per-post metadata.
pub trait PostMeta {
    /// Single value stored under `key` for `post_id`.
    fn get(&self, post_id: u64, key: &str) -> Option<Value>;
}

type MetaTable = FxHashMap<u64, FxHashMap<String, Value>>;

/// Post metadata held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostMeta {
    posts: MetaTable,
}

impl MemoryPostMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, post_id: u64, key: impl Into<String>, value: impl Into<Value>) {
        self.posts
            .entry(post_id)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, post_id: u64, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(post_id, key, value);
        self
    }
}

impl PostMeta for MemoryPostMeta {
    fn get(&self, post_id: u64, key: &str) -> Option<Value> {
        self.posts.get(&post_id)?.get(key).cloned()
    }
}

/// Post metadata loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct JsonFilePostMeta {
    inner: MemoryPostMeta,
}

impl JsonFilePostMeta {
    /// Load the whole file. A missing file is an empty table.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(StoreError::Io(path.to_path_buf(), e)),
        };

        let posts: MetaTable = serde_json::from_str(&content)
            .map_err(|e| StoreError::Json(path.to_path_buf(), e))?;
        Ok(Self {
            inner: MemoryPostMeta { posts },
        })
    }
}

impl PostMeta for JsonFilePostMeta {
    fn get(&self, post_id: u64, key: &str) -> Option<Value> {
        self.inner.get(post_id, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_post_meta() {
        let meta = MemoryPostMeta::new()
            .with(42, "stnvm_status", "ok")
            .with(42, "stnvm_keys", json!(["abc"]));

        assert_eq!(meta.get(42, "stnvm_status"), Some(json!("ok")));
        assert_eq!(meta.get(42, "stnvm_keys"), Some(json!(["abc"])));
        assert_eq!(meta.get(42, "missing"), None);
        assert_eq!(meta.get(7, "stnvm_status"), None);
    }

    #[test]
    fn test_json_file_post_meta() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post-meta.json");
        std::fs::write(
            &path,
            r#"{"42": {"stnvm_status": "ok", "stnvm_keys": ["abc123"]}}"#,
        )
        .unwrap();

        let meta = JsonFilePostMeta::open(&path).unwrap();
        assert_eq!(meta.get(42, "stnvm_status"), Some(json!("ok")));
        assert_eq!(meta.get(43, "stnvm_status"), None);
    }

    #[test]
    fn test_json_file_post_meta_missing_file() {
        let dir = TempDir::new().unwrap();
        let meta = JsonFilePostMeta::open(&dir.path().join("none.json")).unwrap();
        assert_eq!(meta.get(1, "stnvm_status"), None);
    }

    #[test]
    fn test_json_file_post_meta_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post-meta.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            JsonFilePostMeta::open(&path),
            Err(StoreError::Json(..))
        ));
    }
}
