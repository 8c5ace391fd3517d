//! stnvp - deferred loading for sendtonews video embeds.

#![allow(dead_code)]

mod cli;
mod config;
mod embed;
mod hooks;
mod host;
mod logger;
mod plugin;
mod settings;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, SettingsCommand};
use config::PluginConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PluginConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Rewrite { args } => cli::rewrite::run_rewrite(args, config),
        Commands::Settings { action } => match action {
            SettingsCommand::Show { location, pretty } => {
                cli::settings::show_settings(location.as_deref(), *pretty, config)
            }
            SettingsCommand::Save { args } => cli::settings::save_settings(args, config),
        },
        Commands::Nonce { user } => cli::nonce::issue_nonce(user, config),
        Commands::Metabox => cli::metabox::list_metaboxes(config),
        Commands::Links => cli::links::print_links(config),
    }
}
