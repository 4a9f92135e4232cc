//! Mobile navigation menu.
//!
//! Two states over a toggle button and a panel:
//!
//! | From     | Event                                         | To       |
//! |----------|-----------------------------------------------|----------|
//! | `Closed` | click on the toggle                           | `Open`   |
//! | `Open`   | click on the toggle or the close button       | `Closed` |
//! | `Open`   | click on a panel link without `target`        | `Closed` |
//! | `Open`   | click outside both panel and toggle           | `Closed` |
//! | `Open`   | `Escape`                                      | `Closed` |
//! | `Open`   | resize wider than the breakpoint              | `Closed` |
//!
//! Every other event leaves the document untouched. The panel's open class,
//! the toggle's `aria-expanded` and the panel's `aria-hidden` always match
//! the state once a handler returns.

use crate::dom::{Document, DomError, NodeId};
use crate::event::{Event, EventKind, Listener, Subscription};
use crate::page::Page;
use crate::{debug, log};
use serde::Serialize;
use std::{cell::RefCell, rc::Rc};

pub const TOGGLE_CLASS: &str = "header__mobile-toggle";
pub const PANEL_CLASS: &str = "header__mobile-nav";
pub const LINK_CLASS: &str = "header__mobile-nav-link";
pub const CLOSE_CLASS: &str = "header__mobile-nav-close";
pub const OPEN_CLASS: &str = "header__mobile-nav--active";
/// Optional glyph inside the toggle, swapped between `☰` and `×`.
pub const ICON_CLASS: &str = "mobile-toggle__icon";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Elements the controller operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuControls {
    pub toggle: NodeId,
    pub panel: NodeId,
    pub close: Option<NodeId>,
    pub icon: Option<NodeId>,
}

impl MenuControls {
    /// Locate the controls under `scope`. Both toggle and panel are required.
    pub fn find(doc: &Document, scope: NodeId) -> Option<Self> {
        let toggle = doc.query_class(scope, TOGGLE_CLASS)?;
        let panel = doc.query_class(scope, PANEL_CLASS)?;
        Some(Self {
            toggle,
            panel,
            close: doc.query_class(panel, CLOSE_CLASS),
            icon: doc.query_class(toggle, ICON_CLASS),
        })
    }
}

/// The state machine, registered as a page listener.
#[derive(Debug)]
pub struct MobileMenu {
    controls: MenuControls,
    state: MenuState,
    breakpoint: u32,
}

impl MobileMenu {
    pub fn new(controls: MenuControls, breakpoint: u32) -> Self {
        Self {
            controls,
            state: MenuState::Closed,
            breakpoint,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn controls(&self) -> &MenuControls {
        &self.controls
    }

    /// Next state for `event`, or `None` when it causes no transition.
    fn transition(&self, doc: &Document, event: &Event) -> Option<MenuState> {
        let MenuControls {
            toggle,
            panel,
            close,
            ..
        } = self.controls;

        match (self.state, event) {
            (state, Event::Click { target }) if doc.contains(toggle, *target) => {
                Some(match state {
                    MenuState::Closed => MenuState::Open,
                    MenuState::Open => MenuState::Closed,
                })
            }
            (MenuState::Closed, _) => None,
            (MenuState::Open, Event::Click { target }) => {
                let on_close = close.is_some_and(|close| doc.contains(close, *target));
                let on_link = doc
                    .closest(*target, |e| e.has_class(LINK_CLASS))
                    .is_some_and(|link| {
                        doc.contains(panel, link) && doc.attr(link, "target").is_none()
                    });
                let outside = !doc.contains(panel, *target);
                (on_close || on_link || outside).then_some(MenuState::Closed)
            }
            (MenuState::Open, Event::KeyDown { key }) => {
                (key == "Escape").then_some(MenuState::Closed)
            }
            (MenuState::Open, Event::Resize { width }) => {
                (*width > self.breakpoint).then_some(MenuState::Closed)
            }
        }
    }

    /// Write `state` into the document.
    fn apply(&mut self, doc: &mut Document, state: MenuState) -> Result<(), DomError> {
        let MenuControls {
            toggle,
            panel,
            icon,
            ..
        } = self.controls;
        let open = state.is_open();

        if open {
            doc.add_class(panel, OPEN_CLASS)?;
        } else {
            doc.remove_class(panel, OPEN_CLASS)?;
        }
        doc.set_attr(toggle, "aria-expanded", if open { "true" } else { "false" })?;
        doc.set_attr(panel, "aria-hidden", if open { "false" } else { "true" })?;
        if let Some(icon) = icon {
            doc.set_text(icon, if open { "×" } else { "☰" })?;
        }

        self.state = state;
        Ok(())
    }
}

impl Listener for MobileMenu {
    fn handle(&mut self, doc: &mut Document, event: &Event) {
        let Some(next) = self.transition(doc, event) else {
            return;
        };
        debug!("menu"; "{:?} -> {:?} on {:?}", self.state, next, event);
        if let Err(err) = self.apply(doc, next) {
            log!("menu"; "failed to update menu: {}", err);
        }
    }
}

/// A controller bound to a page for as long as this value lives.
pub struct MenuBinding {
    menu: Rc<RefCell<MobileMenu>>,
    _subscription: Subscription,
}

impl MenuBinding {
    /// Bind the menu found under `scope`, writing the closed state first.
    ///
    /// Returns `None` when the toggle or the panel is missing.
    pub fn bind(page: &mut Page, scope: NodeId, breakpoint: u32) -> Option<Self> {
        let Some(controls) = MenuControls::find(&page.document, scope) else {
            debug!("menu"; "no mobile menu controls, skipping");
            return None;
        };

        let mut menu = MobileMenu::new(controls, breakpoint);
        if let Err(err) = menu.apply(&mut page.document, MenuState::Closed) {
            log!("menu"; "failed to initialise menu: {}", err);
            return None;
        }

        let menu = Rc::new(RefCell::new(menu));
        let subscription = page.events().subscribe(
            &[EventKind::Click, EventKind::KeyDown, EventKind::Resize],
            menu.clone(),
        );
        Some(Self {
            menu,
            _subscription: subscription,
        })
    }

    pub fn state(&self) -> MenuState {
        self.menu.borrow().state()
    }

    pub fn controls(&self) -> MenuControls {
        *self.menu.borrow().controls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<body>
<header id="header">
  <button class="header__mobile-toggle" aria-expanded="true"><span class="mobile-toggle__icon">☰</span></button>
  <div class="header__mobile-nav">
    <button class="header__mobile-nav-close">×</button>
    <a href="about.html" class="header__mobile-nav-link" data-page="about">About</a>
    <a href="https://etsy.com" class="header__mobile-nav-link" target="_blank">Shop</a>
    <p class="header__mobile-nav-note">Hello</p>
  </div>
</header>
<main id="main"><p>content</p></main>
</body>"##;

    fn bound() -> (Page, MenuBinding) {
        let mut page = Page::parse(PAGE, "/about.html").unwrap();
        let header = page.document.get_element_by_id("header").unwrap();
        let binding = MenuBinding::bind(&mut page, header, 768).unwrap();
        (page, binding)
    }

    fn node(page: &Page, class: &str) -> NodeId {
        page.document.query_class(page.document.root(), class).unwrap()
    }

    fn assert_synced(page: &Page, binding: &MenuBinding) {
        let MenuControls { toggle, panel, .. } = binding.controls();
        let open = binding.state().is_open();
        let doc = &page.document;
        assert_eq!(doc.has_class(panel, OPEN_CLASS), open);
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some(if open { "true" } else { "false" }));
        assert_eq!(doc.attr(panel, "aria-hidden"), Some(if open { "false" } else { "true" }));
    }

    fn open(page: &mut Page, binding: &MenuBinding) {
        let toggle = binding.controls().toggle;
        page.click(toggle);
        assert_eq!(binding.state(), MenuState::Open);
    }

    #[test]
    fn test_bind_writes_closed_state() {
        let (page, binding) = bound();
        assert_eq!(binding.state(), MenuState::Closed);
        assert_synced(&page, &binding);
    }

    #[test]
    fn test_toggle_twice_closes() {
        let (mut page, binding) = bound();
        open(&mut page, &binding);
        assert_synced(&page, &binding);
        let icon = node(&page, ICON_CLASS);
        assert_eq!(page.document.text_content(icon), "×");

        page.click(binding.controls().toggle);
        assert_eq!(binding.state(), MenuState::Closed);
        assert_eq!(
            page.document.attr(binding.controls().toggle, "aria-expanded"),
            Some("false")
        );
        assert_eq!(page.document.text_content(icon), "☰");
    }

    #[test]
    fn test_click_on_toggle_icon_counts_as_toggle() {
        let (mut page, binding) = bound();
        let icon = node(&page, ICON_CLASS);
        page.click(icon);
        assert_eq!(binding.state(), MenuState::Open);
    }

    #[test]
    fn test_resize_past_breakpoint() {
        let (mut page, binding) = bound();
        let closed = page.document.to_html();
        page.resize(1024);
        assert_eq!(page.document.to_html(), closed);

        open(&mut page, &binding);
        page.resize(768);
        assert_eq!(binding.state(), MenuState::Open);
        page.resize(769);
        assert_eq!(binding.state(), MenuState::Closed);
        assert_synced(&page, &binding);
    }

    #[test]
    fn test_escape_closes() {
        let (mut page, binding) = bound();
        open(&mut page, &binding);
        page.press_key("Enter");
        assert_eq!(binding.state(), MenuState::Open);
        page.press_key("Escape");
        assert_eq!(binding.state(), MenuState::Closed);
        assert_synced(&page, &binding);
    }

    #[test]
    fn test_outside_click_closes() {
        let (mut page, binding) = bound();
        open(&mut page, &binding);

        let note = node(&page, "header__mobile-nav-note");
        page.click(note);
        assert_eq!(binding.state(), MenuState::Open);

        let main = page.document.get_element_by_id("main").unwrap();
        page.click(main);
        assert_eq!(binding.state(), MenuState::Closed);
        assert_synced(&page, &binding);
    }

    #[test]
    fn test_link_click_closes_unless_targeted() {
        let (mut page, binding) = bound();
        open(&mut page, &binding);

        let links = page
            .document
            .query_class_all(page.document.root(), LINK_CLASS);
        page.click(links[1]);
        assert_eq!(binding.state(), MenuState::Open);

        page.click(links[0]);
        assert_eq!(binding.state(), MenuState::Closed);
    }

    #[test]
    fn test_close_button() {
        let (mut page, binding) = bound();
        open(&mut page, &binding);
        page.click(node(&page, CLOSE_CLASS));
        assert_eq!(binding.state(), MenuState::Closed);
        assert_synced(&page, &binding);
    }

    #[test]
    fn test_events_while_closed_change_nothing() {
        let (mut page, _binding) = bound();
        let closed = page.document.to_html();
        page.press_key("Escape");
        let main = page.document.get_element_by_id("main").unwrap();
        page.click(main);
        page.resize(320);
        assert_eq!(page.document.to_html(), closed);
    }

    #[test]
    fn test_drop_binding_unregisters() {
        let (mut page, binding) = bound();
        let toggle = binding.controls().toggle;
        assert_eq!(page.events().len(), 1);

        drop(binding);
        assert!(page.events().is_empty());
        let before = page.document.to_html();
        assert_eq!(page.click(toggle), 0);
        assert_eq!(page.document.to_html(), before);
    }

    #[test]
    fn test_missing_controls_skip_binding() {
        let mut page = Page::parse("<header id=\"header\"><nav></nav></header>", "/").unwrap();
        let header = page.document.get_element_by_id("header").unwrap();
        assert!(MenuBinding::bind(&mut page, header, 768).is_none());
        assert!(page.events().is_empty());
    }
}
