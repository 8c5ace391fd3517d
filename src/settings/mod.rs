//! Admin-editable plugin settings.
//!
//! # Module Structure
//!
//! | Module  | Purpose                                              |
//! |---------|------------------------------------------------------|
//! | `store` | Option storage (lazy JSON file, in-memory)           |
//! | `nonce` | Anti-forgery tokens for the settings form            |
//! | `save`  | Settings form submission handler                     |
//! | (here)  | `Settings`, coercion, `SettingsResolver`             |
//!
//! The stored record is merged over the defaults key by key and then
//! coerced, so a missing, partial or mistyped record still resolves to a
//! usable `Settings`.

mod nonce;
pub mod save;
mod store;

pub use nonce::{NonceAge, NonceIssuer};
pub use save::{SaveError, SaveOutcome, SettingsSaver, is_updated_redirect, render_error_page};
pub use store::{JsonFileOptionStore, MemoryOptionStore, OptionRecord, OptionStore, StoreError};

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Option name the settings record is stored under.
pub const OPTION_NAME: &str = "stn_video_performance_settings";

/// Record field: hide the featured video panel (0|1).
pub const FIELD_HIDE_METABOX: &str = "hide_featured_video_metabox";

/// Record field: player script delay in milliseconds.
pub const FIELD_LOAD_DELAY: &str = "stn_video_load_delay";

/// Effective settings after defaults and coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub hide_featured_metabox: bool,
    pub load_delay_ms: u64,
}

impl Settings {
    /// Default record as stored: every key present.
    pub fn default_record() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(FIELD_HIDE_METABOX.into(), json!(0));
        map.insert(FIELD_LOAD_DELAY.into(), json!(0));
        map
    }

    /// Merge a stored record over the defaults and coerce each field.
    ///
    /// Anything that is not a JSON object counts as an empty record.
    pub fn from_stored(stored: Option<&Value>) -> Self {
        let mut merged = Self::default_record();
        match stored {
            Some(Value::Object(map)) => {
                for (k, v) in map {
                    merged.insert(k.clone(), v.clone());
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                crate::debug!("settings"; "ignoring non-object settings record: {}", other);
            }
        }

        Self {
            hide_featured_metabox: merged.get(FIELD_HIDE_METABOX).is_some_and(truthy),
            load_delay_ms: merged.get(FIELD_LOAD_DELAY).map_or(0, absint),
        }
    }

    /// Stored form of these settings.
    pub fn to_record(self) -> Value {
        json!({
            FIELD_HIDE_METABOX: u8::from(self.hide_featured_metabox),
            FIELD_LOAD_DELAY: self.load_delay_ms,
        })
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Loose truthiness: empty, zero, `"0"`, `false` and `null` are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Non-negative integer from any JSON value.
///
/// Numbers lose their sign and fraction; strings contribute their leading
/// integer (`"1500ms"` is 1500, `"-20"` is 20); everything else is 0.
pub fn absint(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(i) = n.as_i64() {
                i.unsigned_abs()
            } else {
                n.as_f64().map_or(0, float_to_absint)
            }
        }
        Value::Bool(b) => u64::from(*b),
        Value::String(s) => absint_str(s),
        _ => 0,
    }
}

/// Leading integer of a string, sign dropped. Saturates on overflow.
pub fn absint_str(s: &str) -> u64 {
    let s = s.trim_start();
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_absint(f: f64) -> u64 {
    if f.is_finite() { f.abs().trunc() as u64 } else { 0 }
}

// ============================================================================
// Resolver
// ============================================================================

/// Reads the settings record through an option store.
pub struct SettingsResolver<'a> {
    store: &'a dyn OptionStore,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(store: &'a dyn OptionStore) -> Self {
        Self { store }
    }

    /// Effective settings. Store failures fall back to the defaults.
    pub fn resolve(&self) -> Settings {
        match self.store.get(OPTION_NAME) {
            Ok(stored) => Settings::from_stored(stored.as_ref()),
            Err(e) => {
                crate::debug!("settings"; "option store unavailable, using defaults: {}", e);
                Settings::default()
            }
        }
    }
}
