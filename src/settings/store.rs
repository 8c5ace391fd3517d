//! Option storage.
//!
//! Options are named JSON records. The file-backed store does not touch
//! disk until the first read, caches what it read, and replaces the whole
//! file atomically on update.
//!
//! File layout of `options.json`:
//!
//! ```json
//! {
//!   "stn_video_performance_settings": {
//!     "value": { "hide_featured_video_metabox": 1, "stn_video_load_delay": 1500 },
//!     "autoload": false
//!   }
//! }
//! ```

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// A stored option with its load policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub value: Value,
    /// Whether the host preloads this option on every request.
    #[serde(default = "default_autoload")]
    pub autoload: bool,
}

fn default_autoload() -> bool {
    true
}

/// Named option records.
pub trait OptionStore {
    /// Stored value of `name`, `None` when never written.
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value of `name`.
    fn update(&self, name: &str, value: Value, autoload: bool) -> Result<(), StoreError>;
}

type OptionTable = FxHashMap<String, OptionRecord>;

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    options: Mutex<OptionTable>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `name` preset to `value`.
    pub fn with(name: impl Into<String>, value: Value) -> Self {
        let store = Self::new();
        store.options.lock().insert(
            name.into(),
            OptionRecord {
                value,
                autoload: true,
            },
        );
        store
    }

    pub fn record(&self, name: &str) -> Option<OptionRecord> {
        self.options.lock().get(name).cloned()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.options.lock().get(name).map(|r| r.value.clone()))
    }

    fn update(&self, name: &str, value: Value, autoload: bool) -> Result<(), StoreError> {
        self.options
            .lock()
            .insert(name.to_string(), OptionRecord { value, autoload });
        Ok(())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Options persisted in a single JSON file, loaded on first access.
#[derive(Debug)]
pub struct JsonFileOptionStore {
    path: PathBuf,
    cache: ArcSwapOption<OptionTable>,
}

impl JsonFileOptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: ArcSwapOption::empty(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has been read yet.
    pub fn is_loaded(&self) -> bool {
        self.cache.load().is_some()
    }

    fn table(&self) -> Result<Arc<OptionTable>, StoreError> {
        if let Some(table) = self.cache.load_full() {
            return Ok(table);
        }

        let table = Arc::new(self.read_file()?);
        self.cache.store(Some(Arc::clone(&table)));
        crate::debug!("store"; "loaded {} option(s) from {}", table.len(), self.path.display());
        Ok(table)
    }

    fn read_file(&self) -> Result<OptionTable, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(OptionTable::default()),
            Err(e) => return Err(StoreError::Io(self.path.clone(), e)),
        };
        if content.trim().is_empty() {
            return Ok(OptionTable::default());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Json(self.path.clone(), e))
    }
}

impl OptionStore for JsonFileOptionStore {
    fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.table()?.get(name).map(|r| r.value.clone()))
    }

    fn update(&self, name: &str, value: Value, autoload: bool) -> Result<(), StoreError> {
        let mut table = (*self.table()?).clone();
        table.insert(name.to_string(), OptionRecord { value, autoload });

        let json = serde_json::to_vec_pretty(&table)
            .map_err(|e| StoreError::Json(self.path.clone(), e))?;
        crate::utils::fs::write_atomic(&self.path, &json)
            .map_err(|e| StoreError::Io(self.path.clone(), e))?;

        self.cache.store(Some(Arc::new(table)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryOptionStore::new();
        assert_eq!(store.get("x").unwrap(), None);

        store.update("x", json!({"a": 1}), false).unwrap();
        assert_eq!(store.get("x").unwrap(), Some(json!({"a": 1})));
        assert!(!store.record("x").unwrap().autoload);
    }

    #[test]
    fn test_file_store_is_lazy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"x": {"value": 5}}"#).unwrap();

        let store = JsonFileOptionStore::new(&path);
        assert!(!store.is_loaded());

        assert_eq!(store.get("x").unwrap(), Some(json!(5)));
        assert!(store.is_loaded());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOptionStore::new(dir.path().join("options.json"));
        assert_eq!(store.get("x").unwrap(), None);
    }

    #[test]
    fn test_file_store_update_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"other": {"value": "keep", "autoload": true}}"#).unwrap();

        let store = JsonFileOptionStore::new(&path);
        store.update("x", json!({"b": 2}), false).unwrap();
        assert_eq!(store.get("x").unwrap(), Some(json!({"b": 2})));

        // A fresh store sees both records on disk.
        let reopened = JsonFileOptionStore::new(&path);
        assert_eq!(reopened.get("x").unwrap(), Some(json!({"b": 2})));
        assert_eq!(reopened.get("other").unwrap(), Some(json!("keep")));

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["x"]["autoload"], json!(false));
    }

    #[test]
    fn test_file_store_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileOptionStore::new(&path);
        assert!(matches!(store.get("x"), Err(StoreError::Json(..))));
    }
}
