//! URL to filesystem path resolution.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Resolve a request URL below `serve_root`, mapping directories to
/// `index.html`. Paths escaping the root are rejected.
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url)?;
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    // Canonicalize to resolve symlinks and verify the path stays under root
    let canonical = serve_root.join(&clean).canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }
    let index = canonical.join("index.html");
    index.is_file().then_some(index)
}

/// Request path as a location: decoded, without query or fragment.
pub fn location(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    if decoded.starts_with('/') {
        decoded.into_owned()
    } else {
        format!("/{decoded}")
    }
}

/// Decode, strip query string, trim slashes. `None` for invalid UTF-8.
fn normalize_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    Some(decoded.trim_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("our story.html"), "story").unwrap();
        fs::create_dir(dir.path().join("shop")).unwrap();
        fs::write(dir.path().join("shop/index.html"), "shop").unwrap();
        dir
    }

    #[test]
    fn test_resolve_files_and_directories() {
        let dir = site();
        let root = dir.path();
        let resolved = |url: &str| resolve_path(url, root).map(|p| fs::read_to_string(p).unwrap());

        assert_eq!(resolved("/").as_deref(), Some("home"));
        assert_eq!(resolved("/our%20story.html?x=1").as_deref(), Some("story"));
        assert_eq!(resolved("/shop/").as_deref(), Some("shop"));
        assert_eq!(resolved("/missing.html"), None);
    }

    #[test]
    fn test_rejects_traversal() {
        let dir = site();
        assert_eq!(resolve_path("/../etc/passwd", dir.path()), None);
        assert_eq!(resolve_path("/%2e%2e/etc/passwd", dir.path()), None);
    }

    #[test]
    fn test_location() {
        assert_eq!(location("/about.html?ref=nav"), "/about.html");
        assert_eq!(location("/our%20story.html"), "/our story.html");
        assert_eq!(location("contact.html"), "/contact.html");
    }
}
