//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tidings.toml`:
//!
//! | Module    | TOML Section  | Purpose                               |
//! |-----------|---------------|---------------------------------------|
//! | `source`  | `[source]`    | Hosted post repository                |
//! | `site`    | `[site]`      | Site, logo, asset and unsubscribe URLs|
//! | `theme`   | `[theme]`     | Accent, background, font stack        |
//! | `preview` | `[preview]`   | Local preview server                  |

mod preview;
mod site;
mod source;
mod theme;

pub use preview::PreviewConfig;
pub use site::SiteSectionConfig;
pub use source::SourceConfig;
pub use theme::ThemeSectionConfig;
