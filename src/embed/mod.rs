//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `fallback` - Header/footer markup used when a fragment cannot be fetched
//! - `serve` - Preview server pages (loading, not found)
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{LOADING_HTML, LoadingVars};
//!
//! let html = LOADING_HTML.render(&LoadingVars { title: "Three Arrows Studio", retry_secs: 1 });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod fallback {
    /// Minimal header: logo, desktop links, toggle and mobile panel.
    pub const HEADER_HTML: &str = include_str!("fallback/header.html");

    /// Minimal footer: quick links and copyright line.
    pub const FOOTER_HTML: &str = include_str!("fallback/footer.html");
}

pub mod serve {
    use super::{Template, TemplateVars};
    use crate::utils::html::escape;

    /// Variables for loading.html.
    pub struct LoadingVars<'a> {
        pub title: &'a str,
        pub retry_secs: u32,
    }

    impl TemplateVars for LoadingVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__TITLE__", &escape(self.title))
                .replace("__RETRY_SECS__", &self.retry_secs.to_string())
        }
    }

    /// Variables for not_found.html.
    pub struct NotFoundVars<'a> {
        pub title: &'a str,
        pub path: &'a str,
    }

    impl TemplateVars for NotFoundVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__TITLE__", &escape(self.title))
                .replace("__PATH__", &escape(self.path))
        }
    }

    /// Returned with 503 while the config has not been published.
    pub const LOADING_HTML: Template<LoadingVars<'static>> =
        Template::new(include_str!("serve/loading.html"));

    pub const NOT_FOUND_HTML: Template<NotFoundVars<'static>> =
        Template::new(include_str!("serve/not_found.html"));
}
