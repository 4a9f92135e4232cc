//! Active-link marking for the current page.
//!
//! Every element under the header carrying `data-page` equal to the page
//! identity gets both the desktop and the mobile active class and
//! `aria-current="page"`. Other elements are left as they are.

use crate::debug;
use crate::dom::{Document, DomError, NodeId};
use crate::page::PageIdentity;

/// Attribute naming the page an element links to.
pub const PAGE_ATTR: &str = "data-page";

pub const DESKTOP_ACTIVE: &str = "header__nav-link--active";
pub const MOBILE_ACTIVE: &str = "header__mobile-nav-link--active";

/// Mark the links for `identity` inside `scope`. Returns how many matched.
pub fn activate(
    doc: &mut Document,
    scope: NodeId,
    identity: &PageIdentity,
) -> Result<usize, DomError> {
    let matches: Vec<NodeId> = doc
        .query_attr_all(scope, PAGE_ATTR)
        .into_iter()
        .filter(|&node| doc.attr(node, PAGE_ATTR) == Some(identity.as_str()))
        .collect();

    for &node in &matches {
        doc.add_class(node, DESKTOP_ACTIVE)?;
        doc.add_class(node, MOBILE_ACTIVE)?;
        doc.set_attr(node, "aria-current", "page")?;
    }

    debug!("nav"; "{} link(s) active for `{}`", matches.len(), identity);
    Ok(matches.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r##"
<nav class="header__nav">
  <a href="index.html" class="header__nav-link" data-page="home">Home</a>
  <a href="about.html" class="header__nav-link" data-page="about">About</a>
  <a href="#" class="header__nav-link" data-page="shop" target="_blank">Shop</a>
</nav>
<div class="header__mobile-nav">
  <a href="index.html" class="header__mobile-nav-link" data-page="home">Home</a>
  <a href="about.html" class="header__mobile-nav-link" data-page="about">About</a>
</div>
"##;

    fn active(doc: &Document) -> Vec<String> {
        doc.query_attr_all(doc.root(), "aria-current")
            .into_iter()
            .map(|n| doc.text_content(n))
            .collect()
    }

    #[test]
    fn test_unmapped_identity_activates_nothing() {
        let mut doc = Document::parse(HEADER).unwrap();
        let before = doc.to_html();

        let root = doc.root();
        let count = activate(&mut doc, root, &PageIdentity::from("gallery")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_only_tagged_elements_activated() {
        let mut doc = Document::parse(HEADER).unwrap();
        let root = doc.root();
        let count = activate(&mut doc, root, &PageIdentity::from_path("/about.html")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(active(&doc), vec!["About", "About"]);

        for node in doc.query_attr_all(doc.root(), PAGE_ATTR) {
            let is_about = doc.attr(node, PAGE_ATTR) == Some("about");
            assert_eq!(doc.has_class(node, DESKTOP_ACTIVE), is_about);
            assert_eq!(doc.has_class(node, MOBILE_ACTIVE), is_about);
        }
    }

    #[test]
    fn test_home_identity_matches_home_links() {
        let mut doc = Document::parse(HEADER).unwrap();
        let root = doc.root();
        let count = activate(&mut doc, root, &PageIdentity::from_path("/")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(active(&doc), vec!["Home", "Home"]);
    }

    #[test]
    fn test_scope_limits_activation() {
        let mut doc = Document::parse(&format!(
            "<header id=\"header\">{HEADER}</header><footer><a data-page=\"about\">About</a></footer>"
        ))
        .unwrap();
        let header = doc.get_element_by_id("header").unwrap();
        assert_eq!(activate(&mut doc, header, &PageIdentity::from("about")).unwrap(), 2);
    }

    #[test]
    fn test_activation_is_idempotent() {
        let mut doc = Document::parse(HEADER).unwrap();
        let identity = PageIdentity::from("shop");
        let root = doc.root();
        activate(&mut doc, root, &identity).unwrap();
        let once = doc.to_html();
        activate(&mut doc, root, &identity).unwrap();
        assert_eq!(doc.to_html(), once);
    }
}
