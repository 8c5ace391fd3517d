//! `nonce` command: issue a settings form token.

use anyhow::{Context, Result};

use crate::cli::args::UserArgs;
use crate::cli::common::{bootstrap, request_time};
use crate::config::PluginConfig;
use crate::debug;

pub fn issue_nonce(args: &UserArgs, config: PluginConfig) -> Result<()> {
    let session = bootstrap(config)?;
    let now = request_time(args.now)?;
    let nonces = session.plugin.nonces();

    debug!("nonce"; "issuing for user {} at tick {}", args.user, nonces.tick(now));
    let token = session
        .plugin
        .settings_nonce(args.user, now)
        .context("no `[security] secret` configured, cannot issue tokens")?;
    println!("{token}");
    Ok(())
}
