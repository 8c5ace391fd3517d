//! In-process model of the host CMS.
//!
//! | Module    | Purpose                                          |
//! |-----------|--------------------------------------------------|
//! | `context` | Render context, admin request, user capabilities |
//! | `meta`    | Per-post metadata (read-only here)               |
//! | `metabox` | Edit-screen panel registry                       |
//!
//! Extension points live in `hooks`; the option store in `settings`.

mod context;
mod meta;
mod metabox;

pub use context::{AdminRequest, RenderContext, User};
pub use meta::{JsonFilePostMeta, MemoryPostMeta, PostMeta};
pub use metabox::{MetaBox, MetaBoxContext, MetaBoxes};
