//! `metabox` command: build an edit screen's panels and apply suppression.

use anyhow::Result;

use crate::cli::common::bootstrap;
use crate::config::PluginConfig;
use crate::hooks::DEFAULT_PRIORITY;
use crate::host::MetaBoxes;
use crate::log;
use crate::plugin::metabox::register_featured_video_panel;

/// Register the video plugin's panel, run `add_meta_boxes` and print the
/// panels left as `screen<TAB>context<TAB>id`.
pub fn list_metaboxes(config: PluginConfig) -> Result<()> {
    let screens = config.metabox.screens.clone();
    let mut session = bootstrap(config)?;

    session
        .hooks
        .on_meta_boxes(DEFAULT_PRIORITY, move |hooks, boxes| {
            register_featured_video_panel(hooks, boxes, &screens);
        });

    let mut boxes = MetaBoxes::new();
    session.hooks.do_meta_boxes(&mut boxes);

    for meta_box in boxes.iter() {
        println!("{}\t{}\t{}", meta_box.screen, meta_box.context, meta_box.id);
    }
    log!("metabox"; "{} panel(s) registered", boxes.len());
    Ok(())
}
