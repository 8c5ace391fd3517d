//! Settings form submission.
//!
//! The handler runs on every admin request and only acts when the
//! request targets the settings page and carries this form's token field.
//! Token and capability failures are fatal: nothing is written and the
//! request ends with an error page.

use super::{FIELD_HIDE_METABOX, FIELD_LOAD_DELAY, OPTION_NAME, OptionStore, Settings, StoreError};
use super::{NonceIssuer, absint_str};
use crate::config::AdminConfig;
use crate::host::AdminRequest;
use crate::utils::html::escape;
use thiserror::Error;

/// Admin page slug the form is rendered on.
pub const SETTINGS_PAGE: &str = "sendtonews-settings";

/// Action the form token is bound to.
pub const NONCE_ACTION: &str = "stn_video_performance_settings";

/// Form field carrying the token.
pub const NONCE_FIELD: &str = "stn_video_performance_nonce";

/// Capability required to change settings.
pub const CAPABILITY: &str = "manage_options";

/// Query flag set on the redirect after a successful save.
pub const UPDATED_FLAG: &str = "stn-perf-updated";

/// Fatal outcomes of a settings submission.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Security check failed")]
    SecurityCheck,

    #[error("You do not have sufficient permissions to access this page.")]
    Forbidden,

    #[error("failed to store settings")]
    Store(#[from] StoreError),

    #[error("invalid admin URL")]
    AdminUrl(#[from] url::ParseError),
}

/// What the handler did with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Not a settings submission; nothing happened.
    Skipped,
    /// Settings written; the client should be sent to `redirect`.
    Saved {
        settings: Settings,
        redirect: url::Url,
    },
}

/// Validates and persists settings form submissions.
pub struct SettingsSaver<'a> {
    store: &'a dyn OptionStore,
    nonces: &'a NonceIssuer,
    admin: &'a AdminConfig,
}

impl<'a> SettingsSaver<'a> {
    pub fn new(store: &'a dyn OptionStore, nonces: &'a NonceIssuer, admin: &'a AdminConfig) -> Self {
        Self {
            store,
            nonces,
            admin,
        }
    }

    pub fn handle(&self, request: &AdminRequest) -> Result<SaveOutcome, SaveError> {
        if request.query("page") != Some(SETTINGS_PAGE) {
            return Ok(SaveOutcome::Skipped);
        }
        let Some(token) = request.field(NONCE_FIELD) else {
            return Ok(SaveOutcome::Skipped);
        };

        let token = crate::utils::html::sanitize_text_field(token);
        if self
            .nonces
            .verify(&token, NONCE_ACTION, request.user.id, request.now)
            .is_none()
        {
            crate::log!("save"; "rejected settings submission from user {}: bad token", request.user.id);
            return Err(SaveError::SecurityCheck);
        }

        if !request.user.can(CAPABILITY) {
            crate::log!("save"; "rejected settings submission from user {}: missing `{}`", request.user.id, CAPABILITY);
            return Err(SaveError::Forbidden);
        }

        let settings = Settings {
            hide_featured_metabox: request.field(FIELD_HIDE_METABOX).is_some(),
            load_delay_ms: request.field(FIELD_LOAD_DELAY).map_or(0, absint_str),
        };

        let redirect = self.updated_location()?;
        self.store.update(OPTION_NAME, settings.to_record(), false)?;
        crate::log!("save"; "settings updated: delay {}ms, hide metabox {}", settings.load_delay_ms, settings.hide_featured_metabox);

        Ok(SaveOutcome::Saved { settings, redirect })
    }

    /// `options-general.php?page=sendtonews-settings&stn-perf-updated=true`
    pub fn updated_location(&self) -> Result<url::Url, SaveError> {
        let mut location = self.admin.admin_url("options-general.php")?;
        location
            .query_pairs_mut()
            .clear()
            .append_pair("page", SETTINGS_PAGE)
            .append_pair(UPDATED_FLAG, "true");
        Ok(location)
    }
}

/// Whether `location` is the post-save redirect (shows the "saved" notice).
pub fn is_updated_redirect(location: &url::Url) -> bool {
    location
        .query_pairs()
        .any(|(k, v)| k == UPDATED_FLAG && v == "true")
}

/// Error page ending a request that failed a security gate.
pub fn render_error_page(error: &SaveError) -> String {
    let message = escape(&error.to_string()).into_owned();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Error</title>\n</head>\n<body id=\"error-page\">\n<div class=\"die-message\"><p>{message}</p></div>\n</body>\n</html>\n"
    )
}
