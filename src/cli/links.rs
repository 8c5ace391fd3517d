//! `links` command: print the plugin's action links.

use anyhow::Result;

use crate::cli::common::bootstrap;
use crate::config::PluginConfig;
use crate::hooks::names;

pub fn print_links(config: PluginConfig) -> Result<()> {
    let session = bootstrap(config)?;
    let filter = names::plugin_action_links(&session.plugin.config().admin.plugin_basename);

    for link in session.hooks.apply_list_filter(&filter, Vec::new()) {
        println!("{link}");
    }
    Ok(())
}
