//! Utility modules.
//!
//! | Module | Purpose                                          |
//! |--------|--------------------------------------------------|
//! | `css`  | CSS string escaping                              |
//! | `fs`   | Path normalization, atomic file replacement      |
//! | `html` | HTML escaping, text/class sanitizing, attributes |
//! | `js`   | JS string-literal escaping                       |
//! | `url`  | `https`-only URL normalization                   |

pub mod css;
pub mod fs;
pub mod html;
pub mod js;
pub mod url;
