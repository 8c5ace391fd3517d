//! Common utilities shared across CLI commands.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::config::PluginConfig;
use crate::hooks::Hooks;
use crate::plugin::Plugin;

/// A loaded plugin with its handlers registered.
pub struct Session {
    pub plugin: Arc<Plugin>,
    pub hooks: Hooks,
}

/// Open the data stores and register the plugin's handlers.
pub fn bootstrap(config: PluginConfig) -> Result<Session> {
    let post_meta = config.store.post_meta.clone();
    let plugin = Plugin::open(config)
        .with_context(|| format!("failed to open post meta at {}", post_meta.display()))?;
    let plugin = Arc::new(plugin);

    let mut hooks = Hooks::new();
    plugin.register(&mut hooks);
    Ok(Session { plugin, hooks })
}

/// Read a file, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Write to a file, or stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            crate::log!("rewrite"; "wrote output to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Seconds since the Unix epoch, or `fixed` when given.
pub fn request_time(fixed: Option<u64>) -> Result<u64> {
    if let Some(now) = fixed {
        return Ok(now);
    }
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(elapsed.as_secs())
}
