//! Page identity derived from the document location.

use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::fmt;

/// Canonical identity of the site root / index page.
pub const HOME: &str = "home";

/// Slug identifying the displayed page, matched against `data-page`.
///
/// # Examples
/// ```ignore
/// PageIdentity::from_path("/about.html")   -> "about"
/// PageIdentity::from_path("/")             -> "home"
/// PageIdentity::from_path("/index.html")   -> "home"
/// PageIdentity::from_path("/shop/")        -> "home"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageIdentity(String);

impl PageIdentity {
    /// Derive the identity from a location path (query and fragment ignored).
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let decoded = percent_decode_str(path).decode_utf8_lossy();

        if decoded.is_empty() || decoded.ends_with('/') {
            return Self::home();
        }

        let segment = decoded.rsplit('/').next().unwrap_or_default();
        let page = segment.split('.').next().unwrap_or_default();
        match page {
            "" | "index" => Self::home(),
            page => Self(page.to_string()),
        }
    }

    pub fn home() -> Self {
        Self(HOME.to_string())
    }

    pub fn is_home(&self) -> bool {
        self.0 == HOME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageIdentity {
    fn from(slug: &str) -> Self {
        Self(slug.to_string())
    }
}

impl fmt::Display for PageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_variants() {
        for path in ["", "/", "/index.html", "index.html", "/index", "/blog/"] {
            assert!(PageIdentity::from_path(path).is_home(), "{path}");
        }
    }

    #[test]
    fn test_last_segment_without_extension() {
        assert_eq!(PageIdentity::from_path("/about.html").as_str(), "about");
        assert_eq!(PageIdentity::from_path("/a/b/contact.html").as_str(), "contact");
        assert_eq!(PageIdentity::from_path("gallery").as_str(), "gallery");
    }

    #[test]
    fn test_query_fragment_and_encoding() {
        assert_eq!(
            PageIdentity::from_path("/prayer-requests.html?ref=nav#form").as_str(),
            "prayer-requests"
        );
        assert_eq!(PageIdentity::from_path("/our%20story.html").as_str(), "our story");
    }
}
