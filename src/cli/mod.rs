//! Command-line interface module.
//!
//! Every command loads the plugin the way a host request would: config,
//! stores, then handler registration on a fresh `Hooks`.

mod args;
pub mod common;
pub mod links;
pub mod metabox;
pub mod nonce;
pub mod rewrite;
pub mod settings;

pub use args::{Cli, Commands, RewriteArgs, SaveArgs, SettingsCommand, UserArgs};
