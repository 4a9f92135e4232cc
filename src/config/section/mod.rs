//! Configuration section definitions.
//!
//! | Module       | TOML Section                     | Purpose                          |
//! |--------------|----------------------------------|----------------------------------|
//! | `site`       | `[site]` `[contact]` `[[social]]`| Site metadata, contact, social   |
//! | `navigation` | `[[navigation]]` `[links]`       | Navigation entries, link table   |
//! | `assemble`   | `[assemble]`                     | Mount ids, fragments, breakpoint |
//! | `serve`      | `[serve]`                        | Preview server                   |
//!
//! `[features]` is a plain `name = bool` table kept on `SiteConfig`.

mod assemble;
mod navigation;
mod serve;
mod site;

pub use assemble::{AssembleConfig, is_relative_resource};
pub use navigation::{LinksTable, NavEntryConfig, NavigationEntry, validate_navigation};
pub use serve::ServeConfig;
pub use site::{ContactConfig, SiteInfoConfig, SocialLink};
