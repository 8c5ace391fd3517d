//! `[security]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [security]
//! secret = "long random string"  # key for anti-forgery tokens
//! nonce_lifetime = 86400         # seconds a token stays valid
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Secret mixed into every anti-forgery token.
    pub secret: String,

    /// Token lifetime in seconds. Tokens are accepted for up to this
    /// long and at least half of it.
    pub nonce_lifetime: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            nonce_lifetime: 86_400,
        }
    }
}

impl SecurityConfig {
    pub const SECRET: FieldPath = FieldPath::new("security.secret");
    pub const NONCE_LIFETIME: FieldPath = FieldPath::new("security.nonce_lifetime");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.nonce_lifetime < 2 {
            diag.error(Self::NONCE_LIFETIME, "must be at least 2 seconds");
        }
        if self.secret.trim().is_empty() {
            diag.error_with_hint(
                Self::SECRET,
                "must not be empty, settings form tokens are keyed with it",
                "set it to a long random string",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_security_config() {
        let config = test_parse_config("[security]\nsecret = \"k\"\nnonce_lifetime = 3600");
        assert_eq!(config.security.secret, "k");
        assert_eq!(config.security.nonce_lifetime, 3600);
    }

    #[test]
    fn test_security_validate() {
        let mut diag = ConfigDiagnostics::new();
        SecurityConfig {
            secret: "  ".into(),
            nonce_lifetime: 1,
        }
        .validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
        assert_eq!(diag.errors()[1].field, SecurityConfig::SECRET);
    }

    #[test]
    fn test_default_secret_rejected() {
        let mut diag = ConfigDiagnostics::new();
        SecurityConfig::default().validate(&mut diag);
        assert!(diag.has_errors());
    }
}
