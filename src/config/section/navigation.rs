//! `[[navigation]]` and `[links]` configuration.
//!
//! # Example
//!
//! ```toml
//! [[navigation]]
//! name = "About"
//! url = "about.html"
//!
//! [[navigation]]
//! name = "Shop"
//! url = "#"
//! slug = "shop"
//! external = true
//! config_key = "shop_url"     # resolved through [links]
//!
//! [links]
//! shop_url = "https://etsy.com/shop/threearrowsstudio"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::page::PageIdentity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Named URLs referenced by navigation entries and footer links.
pub type LinksTable = BTreeMap<String, String>;

/// A navigation entry as written in `quiver.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntryConfig {
    pub name: String,

    #[serde(default)]
    pub url: String,

    /// Page identity matched by the activator. Derived from `url` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Opens in a new browsing context.
    #[serde(default)]
    pub external: bool,

    /// Key into `[links]` that overrides `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_key: Option<String>,
}

/// A resolved navigation entry. Identity is `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub name: String,
    pub url: String,
    pub slug: String,
    pub external: bool,
    pub config_key: Option<String>,
}

impl NavEntryConfig {
    /// Resolve `config_key` through `links` and derive the slug.
    ///
    /// A key missing from `links` keeps the literal `url`.
    pub fn resolve(&self, links: &LinksTable) -> NavigationEntry {
        let url = self
            .config_key
            .as_ref()
            .and_then(|key| links.get(key))
            .cloned()
            .unwrap_or_else(|| self.url.clone());

        let slug = match &self.slug {
            Some(slug) => slug.clone(),
            None => PageIdentity::from_path(&self.url).as_str().to_string(),
        };

        NavigationEntry {
            name: self.name.clone(),
            url,
            slug,
            external: self.external,
            config_key: self.config_key.clone(),
        }
    }
}

/// Validate navigation entries against the links table.
pub fn validate_navigation(
    entries: &[NavEntryConfig],
    links: &LinksTable,
    diag: &mut ConfigDiagnostics,
) {
    let mut seen = HashSet::new();
    for (i, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            diag.error(FieldPath::indexed("navigation", i, "name"), "entry name must not be empty");
        }

        if let Some(key) = &entry.config_key
            && !links.contains_key(key)
        {
            diag.error_with_hint(
                FieldPath::indexed("navigation", i, "config_key"),
                format!("link `{key}` is not defined"),
                format!("add `{key} = \"...\"` under [links]"),
            );
        }

        let slug = entry.resolve(links).slug;
        if !seen.insert(slug.clone()) {
            diag.error(
                FieldPath::indexed("navigation", i, "slug"),
                format!("duplicate navigation slug `{slug}`"),
            );
        }
    }
}
