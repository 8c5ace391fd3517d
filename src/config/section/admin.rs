//! `[admin]` section configuration.
//!
//! Where the host's admin screens live and how this plugin is named there.
//!
//! # Example
//!
//! ```toml
//! [admin]
//! url = "https://example.com/wp-admin/"
//! plugin_basename = "stn-video-performance/stn-video-performance.php"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Admin URL and plugin identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Base URL of the admin area; settings redirects and links are built on it.
    pub url: String,

    /// Plugin file relative to the plugins directory.
    /// Names the `plugin_action_links_<basename>` extension point.
    pub plugin_basename: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost/wp-admin/".into(),
            plugin_basename: "stn-video-performance/stn-video-performance.php".into(),
        }
    }
}

impl AdminConfig {
    pub const URL: FieldPath = FieldPath::new("admin.url");
    pub const PLUGIN_BASENAME: FieldPath = FieldPath::new("admin.plugin_basename");

    /// Build an admin page URL from a path relative to the admin area.
    ///
    /// `admin_url("options-general.php")` with the default config gives
    /// `http://localhost/wp-admin/options-general.php`.
    pub fn admin_url(&self, path: &str) -> Result<url::Url, url::ParseError> {
        let base = if self.url.ends_with('/') {
            url::Url::parse(&self.url)?
        } else {
            url::Url::parse(&format!("{}/", self.url))?
        };
        base.join(path.trim_start_matches('/'))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(&self.url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => diag.error(
                Self::URL,
                format!("unsupported scheme `{}`", parsed.scheme()),
            ),
            Err(e) => diag.error_with_hint(
                Self::URL,
                format!("invalid URL: {e}"),
                "use an absolute URL such as `https://example.com/wp-admin/`",
            ),
        }

        if self.plugin_basename.trim().is_empty() {
            diag.error(Self::PLUGIN_BASENAME, "must not be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_admin_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.admin.url, "http://localhost/wp-admin/");
        assert_eq!(
            config.admin.plugin_basename,
            "stn-video-performance/stn-video-performance.php"
        );
    }

    #[test]
    fn test_admin_url_join() {
        let config = test_parse_config("[admin]\nurl = \"https://news.test/wp-admin\"");
        assert_eq!(
            config.admin.admin_url("options-general.php").unwrap().as_str(),
            "https://news.test/wp-admin/options-general.php"
        );
        assert_eq!(
            config.admin.admin_url("/options-general.php").unwrap().as_str(),
            "https://news.test/wp-admin/options-general.php"
        );
    }

    #[test]
    fn test_admin_validate() {
        let mut diag = ConfigDiagnostics::new();
        AdminConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());

        let config = AdminConfig {
            url: "not a url".into(),
            plugin_basename: " ".into(),
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }
}
