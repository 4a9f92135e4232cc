//! `[assemble]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assemble]
//! header_mount = "header"         # id of the header mount element
//! footer_mount = "footer"
//! header_fragment = "header.html" # resource fetched into the header mount
//! footer_fragment = "footer.html"
//! timeout_ms = 10000              # 0 disables the fetch timeout
//! breakpoint = 768                # widths above this close the mobile menu
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use std::time::Duration;

/// Page assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssembleConfig {
    pub header_mount: String,
    pub footer_mount: String,
    pub header_fragment: String,
    pub footer_fragment: String,

    /// Upper bound for one fragment fetch, in milliseconds.
    pub timeout_ms: u64,

    /// Mobile breakpoint in CSS pixels.
    pub breakpoint: u32,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            header_mount: "header".into(),
            footer_mount: "footer".into(),
            header_fragment: "header.html".into(),
            footer_fragment: "footer.html".into(),
            timeout_ms: 10_000,
            breakpoint: 768,
        }
    }
}

impl AssembleConfig {
    /// Fetch timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.breakpoint == 0 {
            diag.error_with_hint(
                FieldPath::new("assemble.breakpoint"),
                "breakpoint must be greater than zero",
                "the default is 768",
            );
        }

        for (field, id) in [
            (FieldPath::new("assemble.header_mount"), &self.header_mount),
            (FieldPath::new("assemble.footer_mount"), &self.footer_mount),
        ] {
            if id.trim().is_empty() {
                diag.error(field, "mount id must not be empty");
            }
        }

        for (field, name) in [
            (FieldPath::new("assemble.header_fragment"), &self.header_fragment),
            (FieldPath::new("assemble.footer_fragment"), &self.footer_fragment),
        ] {
            if !is_relative_resource(name) {
                diag.error_with_hint(
                    field,
                    format!("`{name}` is not a relative resource name"),
                    "use a name like `header.html` without `..` or a leading `/`",
                );
            }
        }
    }
}

/// `true` for non-empty relative names that stay below their root.
pub fn is_relative_resource(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
