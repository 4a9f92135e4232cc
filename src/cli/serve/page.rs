//! Assembling pages on request.

use crate::assemble::PageAssembler;
use crate::config::SiteConfig;
use crate::fragment::DirSource;
use crate::page::Page;
use crate::utils::mime;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path, sync::Arc};
use tokio::runtime::Runtime;

/// Whether `path` is a page to assemble rather than serve verbatim.
///
/// The fragment files themselves are HTML but are served as they are.
pub fn should_assemble(path: &Path, config: &SiteConfig) -> bool {
    if !mime::is_html(path) {
        return false;
    }
    let is_fragment = |name: &str| {
        config
            .root_join(name)
            .canonicalize()
            .is_ok_and(|fragment| fragment == path)
    };
    !is_fragment(&config.assemble.header_fragment) && !is_fragment(&config.assemble.footer_fragment)
}

/// Read the page at `path`, assemble it against the site root and serialize.
pub fn assemble_file(
    path: &Path,
    location: &str,
    config: &Arc<SiteConfig>,
    runtime: &Runtime,
) -> Result<String> {
    let html =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut page = Page::parse(&html, location)?;

    // A fresh assembler per request, so no load is ever superseded.
    let assembler = PageAssembler::new(Arc::clone(config));
    let source = DirSource::new(config.root.clone());
    let outcome = runtime.block_on(assembler.assemble(&mut page, &source))?;
    if outcome.assembled().is_none() {
        bail!("load of {location} was superseded");
    }

    Ok(page.document.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    const SHELL: &str = r#"<html><body><header id="header"></header><main>Hi</main><footer id="footer"></footer></body></html>"#;

    const HEADER: &str = r#"<nav><a href="about.html" class="header__nav-link" data-page="about">About</a></nav>"#;

    fn site() -> (TempDir, Arc<SiteConfig>) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("about.html"), SHELL).unwrap();
        fs::write(dir.path().join("header.html"), HEADER).unwrap();
        fs::write(dir.path().join("style.css"), "body{}").unwrap();

        let mut config = test_parse_config("");
        config.root = dir.path().canonicalize().unwrap();
        (dir, Arc::new(config))
    }

    #[test]
    fn test_should_assemble() {
        let (_dir, config) = site();
        let root = &config.root;
        assert!(should_assemble(&root.join("about.html"), &config));
        assert!(!should_assemble(&root.join("header.html"), &config));
        assert!(!should_assemble(&root.join("style.css"), &config));
    }

    #[test]
    fn test_assemble_file_injects_and_falls_back() {
        let (_dir, config) = site();
        let runtime = Runtime::new().unwrap();

        let html =
            assemble_file(&config.root.join("about.html"), "/about.html", &config, &runtime)
                .unwrap();

        assert!(html.contains("header__nav-link--active"));
        // footer.html is missing, so the built-in footer is used
        assert!(html.contains("footer__"));
        assert!(html.contains("<main>Hi</main>"));
    }
}
