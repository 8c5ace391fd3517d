//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Deferred loading for sendtonews video embeds
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: stnvp.toml)
    #[arg(short = 'C', long, default_value = "stnvp.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run shortcode output through the render filters
    #[command(visible_alias = "r")]
    Rewrite {
        #[command(flatten)]
        args: RewriteArgs,
    },

    /// Show or save the admin settings
    #[command(visible_alias = "s")]
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Issue an anti-forgery token for the settings form
    #[command(visible_alias = "n")]
    Nonce {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Register the featured video panel and list the panels left
    #[command(visible_alias = "m")]
    Metabox,

    /// Print the plugin's action links
    #[command(visible_alias = "l")]
    Links,
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Print the effective settings as JSON
    Show {
        /// Location the browser was redirected to; shows the saved notice
        /// when it carries the update marker
        #[arg(short, long, value_hint = clap::ValueHint::Url)]
        location: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Submit the settings form
    Save {
        #[command(flatten)]
        args: SaveArgs,
    },
}

/// Rewrite command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RewriteArgs {
    /// File holding the raw shortcode output. Omit or use `-` for stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Shortcode tag that produced the output (default: `[embed] tag`)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Raw shortcode attributes, e.g. `key="abc123" type="float"`
    #[arg(short, long)]
    pub attrs: Option<String>,

    /// Post being rendered
    #[arg(short, long)]
    pub post: Option<u64>,

    /// Render as inside the admin area
    #[arg(long)]
    pub admin: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// The acting user and request time.
#[derive(clap::Args, Debug, Clone)]
pub struct UserArgs {
    /// User id
    #[arg(short, long, default_value_t = 1)]
    pub user: u64,

    /// Request time in seconds since the Unix epoch (default: now)
    #[arg(long)]
    pub now: Option<u64>,
}

/// Settings form submission arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SaveArgs {
    #[command(flatten)]
    pub user: UserArgs,

    /// Capabilities of the user (comma-separated)
    #[arg(long = "cap", value_delimiter = ',', default_value = "manage_options")]
    pub capabilities: Vec<String>,

    /// Anti-forgery token to submit (default: a freshly issued one)
    #[arg(long)]
    pub nonce: Option<String>,

    /// Check the "hide featured video panel" box
    #[arg(long)]
    pub hide_metabox: bool,

    /// Script load delay field, submitted as typed
    #[arg(short, long)]
    pub delay: Option<String>,

    /// Admin page the form is posted to
    #[arg(long, default_value = "sendtonews-settings")]
    pub page: String,
}
