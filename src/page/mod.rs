//! A loaded page: document, location and event bus.

mod identity;

pub use identity::{HOME, PageIdentity};

use crate::{
    dom::{Document, DomError, NodeId},
    event::{Event, EventBus},
};

/// One page load.
///
/// Owns the document tree and the listeners bound to it. Dropping the page
/// drops the bus, which ends every registration made for it.
pub struct Page {
    pub document: Document,
    location: String,
    identity: PageIdentity,
    events: EventBus,
}

impl Page {
    pub fn new(document: Document, location: &str) -> Self {
        Self {
            document,
            location: location.to_string(),
            identity: PageIdentity::from_path(location),
            events: EventBus::new(),
        }
    }

    /// Parse `html` as the page served at `location`.
    pub fn parse(html: &str, location: &str) -> Result<Self, DomError> {
        Ok(Self::new(Document::parse(html)?, location))
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn identity(&self) -> &PageIdentity {
        &self.identity
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Deliver an event to the page's listeners.
    pub fn dispatch(&mut self, event: Event) -> usize {
        self.events.dispatch(&mut self.document, &event)
    }

    pub fn click(&mut self, target: NodeId) -> usize {
        self.dispatch(Event::Click { target })
    }

    pub fn press_key(&mut self, key: &str) -> usize {
        self.dispatch(Event::key(key))
    }

    pub fn resize(&mut self, width: u32) -> usize {
        self.dispatch(Event::Resize { width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_location() {
        let page = Page::parse("<main></main>", "/contact.html").unwrap();
        assert_eq!(page.identity().as_str(), "contact");
        assert_eq!(page.location(), "/contact.html");
    }

    #[test]
    fn test_events_without_listeners() {
        let mut page = Page::parse("<main></main>", "/").unwrap();
        assert!(page.events().is_empty());
        assert_eq!(page.resize(1024), 0);
        assert_eq!(page.press_key("Escape"), 0);
    }
}
