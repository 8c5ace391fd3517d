//! Plugin configuration management for `stnvp.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── admin      # [admin]
//! │   ├── embed      # [embed]
//! │   ├── metabox    # [metabox]
//! │   ├── security   # [security]
//! │   └── store      # [store]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # PluginConfig (this file)
//! ```
//!
//! This is the host-side configuration. The admin-editable settings
//! (load delay, metabox flag) live in the option store, see `settings`.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AdminConfig, EmbedConfig, MetaboxConfig, SecurityConfig, StoreConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing stnvp.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub embed: EmbedConfig,

    #[serde(default)]
    pub metabox: MetaboxConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

impl PluginConfig {
    /// Load configuration, searching upward from cwd for `config_name`.
    ///
    /// A missing config file falls back to defaults, with relative store
    /// paths resolved against cwd. `[security] secret` has no usable
    /// default, so validation still fails until one is configured.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(config_name) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = crate::utils::fs::normalize_path(&path);
                config
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", config_name.display());
                Self::default()
            }
        };

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set root and resolve relative paths against it.
    fn finalize(&mut self, root: &Path) {
        self.root = crate::utils::fs::normalize_path(root);
        self.store.normalize(&self.root);
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.admin.validate(&mut diag);
        self.embed.validate(&mut diag);
        self.metabox.validate(&mut diag);
        self.security.validate(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PluginConfig {
    let (parsed, ignored) = PluginConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
