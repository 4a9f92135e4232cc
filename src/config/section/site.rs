//! `[site]`, `[contact]` and `[[social]]` configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Three Arrows Studio"
//! tagline = "Creating Sacred Spaces"
//! url = "https://threearrowsstudio.com"
//! description = "Faith-based wall art and home decor."
//!
//! [contact]
//! email = "hello@threearrowsstudio.com"
//!
//! [[social]]
//! platform = "instagram"
//! url = "https://instagram.com/threearrowsstudio"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata shown in the header and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site name (logo text, footer title, copyright holder).
    pub name: String,

    pub tagline: String,

    /// Canonical site URL.
    pub url: Option<String>,

    pub description: String,

    /// Year printed in the footer copyright. Defaults to the current year.
    pub copyright_year: Option<u16>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            name: "My Site".into(),
            tagline: String::new(),
            url: None,
            description: String::new(),
            copyright_year: None,
        }
    }
}

impl SiteInfoConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error(FieldPath::new("site.name"), "site name must not be empty");
        }
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty())
            && url::Url::parse(url).is_err()
        {
            diag.error_with_hint(
                FieldPath::new("site.url"),
                format!("`{url}` is not an absolute URL"),
                "include the scheme, e.g. https://example.com",
            );
        }
    }
}

/// Contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub email: String,
    pub phone: String,
}

/// A social profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    #[serde(default)]
    pub url: String,
}

impl SocialLink {
    /// Placeholder entries carry an empty URL and are not rendered.
    pub fn is_set(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Display name of the platform (`youtube` → `YouTube`).
    pub fn display_name(&self) -> String {
        let known = match self.platform.to_ascii_lowercase().as_str() {
            "instagram" => "Instagram",
            "facebook" => "Facebook",
            "pinterest" => "Pinterest",
            "etsy" => "Etsy Shop",
            "youtube" => "YouTube",
            "tiktok" => "TikTok",
            "twitter" => "Twitter",
            "linkedin" => "LinkedIn",
            _ => return self.platform.clone(),
        };
        known.to_string()
    }

    /// Glyph shown inside the footer social link.
    pub fn icon(&self) -> &'static str {
        match self.platform.to_ascii_lowercase().as_str() {
            "instagram" => "📷",
            "facebook" => "📘",
            "pinterest" => "📌",
            "etsy" => "🛍️",
            "youtube" => "📺",
            "tiktok" => "🎵",
            "twitter" => "🐦",
            "linkedin" => "💼",
            _ => "🔗",
        }
    }
}
