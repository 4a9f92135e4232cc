//! Page events and scoped listener registration.
//!
//! Listeners are shared `Rc<RefCell<dyn Listener>>` handles registered on an
//! [`EventBus`]. Registration yields a [`Subscription`]; dropping it removes
//! the listener, so a component unbinds by being dropped.
//!
//! A page and its bus are single-owner and `!Send`: handlers run to
//! completion on the dispatching thread, one event at a time.

use crate::dom::{Document, NodeId};
use smallvec::SmallVec;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// An input delivered to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer activation of `target` (bubbles to every listener).
    Click { target: NodeId },
    /// Key press, named like `KeyboardEvent.key` (`"Escape"`, `"Enter"`).
    KeyDown { key: String },
    /// Viewport width changed to `width` logical pixels.
    Resize { width: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Resize { .. } => EventKind::Resize,
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }
}

/// Something that reacts to page events.
pub trait Listener {
    fn handle(&mut self, doc: &mut Document, event: &Event);
}

pub type SharedListener = Rc<RefCell<dyn Listener>>;

struct Entry {
    id: u64,
    kinds: SmallVec<[EventKind; 3]>,
    listener: SharedListener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Per-page listener registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `kinds`. The listener stays registered for as
    /// long as the returned [`Subscription`] is alive.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, kinds: &[EventKind], listener: SharedListener) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            kinds: SmallVec::from_slice(kinds),
            listener,
        });
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every listener registered for its kind, in
    /// registration order. Returns how many listeners ran.
    pub fn dispatch(&self, doc: &mut Document, event: &Event) -> usize {
        let kind = event.kind();
        // Snapshot first so handlers may drop subscriptions while running.
        let targets: Vec<SharedListener> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kinds.contains(&kind))
            .map(|e| Rc::clone(&e.listener))
            .collect();

        for listener in &targets {
            listener.borrow_mut().handle(doc, event);
        }
        targets.len()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for a listener registration.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}
