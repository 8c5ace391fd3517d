//! `settings` commands: show the effective settings, submit the form.

use anyhow::{Context, Result};

use crate::cli::args::SaveArgs;
use crate::cli::common::{bootstrap, request_time};
use crate::config::PluginConfig;
use crate::host::{AdminRequest, User};
use crate::log;
use crate::settings::save::NONCE_FIELD;
use crate::settings::{
    FIELD_HIDE_METABOX, FIELD_LOAD_DELAY, SaveError, is_updated_redirect, render_error_page,
};

/// Notice shown after the post-save redirect.
pub const SAVED_NOTICE: &str = "Performance settings saved.";

/// Print the effective settings as JSON.
pub fn show_settings(location: Option<&str>, pretty: bool, config: PluginConfig) -> Result<()> {
    let session = bootstrap(config)?;

    if let Some(location) = location {
        let location = url::Url::parse(location)
            .with_context(|| format!("invalid location `{location}`"))?;
        if is_updated_redirect(&location) {
            log!("settings"; "{}", SAVED_NOTICE);
        }
    }

    let settings = session.plugin.settings();
    let json = if pretty {
        serde_json::to_string_pretty(&settings)?
    } else {
        serde_json::to_string(&settings)?
    };
    println!("{json}");
    Ok(())
}

/// Submit the settings form as `args.user` and print where the browser
/// would be sent. Security failures print the error page and fail.
pub fn save_settings(args: &SaveArgs, config: PluginConfig) -> Result<()> {
    let session = bootstrap(config)?;
    let now = request_time(args.user.now)?;

    let user = args
        .capabilities
        .iter()
        .fold(User::new(args.user.user), |user, cap| user.with_capability(cap));
    let token = match &args.nonce {
        Some(token) => token.clone(),
        None => session
            .plugin
            .settings_nonce(args.user.user, now)
            .unwrap_or_default(),
    };

    let mut request = AdminRequest::new(user, now)
        .with_query("page", &args.page)
        .with_field(NONCE_FIELD, token);
    if args.hide_metabox {
        request = request.with_field(FIELD_HIDE_METABOX, "1");
    }
    if let Some(delay) = &args.delay {
        request = request.with_field(FIELD_LOAD_DELAY, delay);
    }

    match session.hooks.do_admin_init(&request) {
        Ok(Some(location)) => {
            println!("{location}");
            Ok(())
        }
        Ok(None) => {
            log!("save"; "not a settings submission, nothing saved");
            Ok(())
        }
        Err(e @ (SaveError::SecurityCheck | SaveError::Forbidden)) => {
            println!("{}", render_error_page(&e));
            Err(anyhow::Error::new(e).context("settings submission rejected"))
        }
        Err(e) => Err(anyhow::Error::new(e).context("failed to save settings")),
    }
}
