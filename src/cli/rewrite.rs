//! `rewrite` command: run shortcode output through the render filters.

use anyhow::Result;

use crate::cli::args::RewriteArgs;
use crate::cli::common::{bootstrap, read_input, write_output};
use crate::config::PluginConfig;
use crate::embed::ShortcodeAttrs;
use crate::host::RenderContext;
use crate::{debug, log};

pub fn run_rewrite(args: &RewriteArgs, config: PluginConfig) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let session = bootstrap(config)?;

    let tag = args
        .tag
        .clone()
        .unwrap_or_else(|| session.plugin.config().embed.tag.clone());
    let attrs = ShortcodeAttrs::from_raw(args.attrs.as_deref().unwrap_or_default());
    let ctx = RenderContext {
        is_admin: args.admin,
        post_id: args.post,
    };

    let output = session
        .hooks
        .apply_shortcode_tag(input.clone(), &tag, &attrs, &ctx);
    if output == input {
        debug!("rewrite"; "`{}` output left unchanged", tag);
    } else {
        log!("embed"; "deferred `{}` script by {}ms", tag, session.plugin.settings().load_delay_ms);
    }

    write_output(args.output.as_deref(), &output)
}
