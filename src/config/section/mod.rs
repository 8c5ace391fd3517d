//! Configuration section definitions.
//!
//! Each module corresponds to a section in `stnvp.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `admin`    | `[admin]`      | Admin URL, plugin basename           |
//! | `embed`    | `[embed]`      | Shortcode tag, schema meta key       |
//! | `metabox`  | `[metabox]`    | Screens carrying the featured panel  |
//! | `security` | `[security]`   | Anti-forgery token key and lifetime  |
//! | `store`    | `[store]`      | Option and post meta file locations  |

mod admin;
mod embed;
mod metabox;
mod security;
mod store;

pub use admin::AdminConfig;
pub use embed::EmbedConfig;
pub use metabox::MetaboxConfig;
pub use security::SecurityConfig;
pub use store::StoreConfig;
