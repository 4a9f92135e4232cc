//! Mutable document tree for page assembly.
//!
//! A [`Document`] is an arena of nodes addressed by [`NodeId`]. Markup is
//! parsed with `tl` (see [`parse`]) and converted into owned nodes so that
//! mount points can have their content replaced, classes toggled and ARIA
//! attributes rewritten in place.
//!
//! ```text
//! Document
//! └── NodeId(0) root
//!     ├── Doctype
//!     └── Element <html>
//!         └── Element <body>
//!             ├── Element <header id="header">   ← mount point
//!             └── Element <footer id="footer">   ← mount point
//! ```
//!
//! Replaced subtrees are detached, not freed. A document lives for one page
//! load, so the arena never grows unbounded.

mod parse;
mod select;
mod serialize;

pub use select::Selector;

use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised by tree mutation.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("markup parsing failed: {0}")]
    Parse(String),

    #[error("node {0:?} is not an element")]
    NotElement(NodeId),
}

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// An element: tag name plus ordered attributes.
///
/// Attribute values are stored decoded and escaped again on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root.
    Root,
    /// `<!DOCTYPE ...>` declaration, kept verbatim.
    Doctype(String),
    Element(Element),
    /// Text content as raw markup (entities are not decoded).
    Text(String),
    /// Comment body, without the `<!--` `-->` delimiters.
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: SmallVec::new(),
            }],
        }
    }

    /// Parse a full page or a fragment into a new document.
    pub fn parse(html: &str) -> Result<Self, DomError> {
        let mut doc = Self::new();
        doc.append_markup(NodeId::ROOT, html)?;
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(e) => Ok(e),
            _ => Err(DomError::NotElement(id)),
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Detach every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Replace the content of `id` with parsed `html` (like `innerHTML =`).
    ///
    /// The old children are only detached once the new markup has parsed.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) -> Result<(), DomError> {
        if id != NodeId::ROOT {
            self.element_mut(id)?;
        }
        let staged = Document::parse(html)?;
        self.clear_children(id);
        self.graft(id, &staged, NodeId::ROOT);
        Ok(())
    }

    /// Replace the content of `id` with a single escaped text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(id)?;
        self.clear_children(id);
        let escaped = crate::utils::html::escape(text).into_owned();
        self.append(id, NodeData::Text(escaped));
        Ok(())
    }

    /// Copy the children of `from` in `other` under `parent` in `self`.
    fn graft(&mut self, parent: NodeId, other: &Document, from: NodeId) {
        for &child in other.children(from) {
            let copied = self.append(parent, other.data(child).clone());
            self.graft(copied, other, child);
        }
    }

    // ------------------------------------------------------------------------
    // Attributes and classes
    // ------------------------------------------------------------------------

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class if missing. Returns `true` when the class list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        let elem = self.element_mut(id)?;
        if elem.has_class(class) {
            return Ok(false);
        }
        let joined = match elem.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim())
            }
            _ => class.to_string(),
        };
        elem.set_attr("class", &joined);
        Ok(true)
    }

    /// Remove a class if present. Returns `true` when the class list changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool, DomError> {
        let elem = self.element_mut(id)?;
        if !elem.has_class(class) {
            return Ok(false);
        }
        let remaining = elem
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        elem.set_attr("class", &remaining);
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside it (`Node.contains`).
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Nearest ancestor-or-self of `node` satisfying `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.element(id).is_some_and(&pred) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Find the element with the given `id` attribute in the attached tree.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(id))
    }

    /// First element under `scope` carrying `class`.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    /// All elements under `scope` carrying `class`.
    pub fn query_class_all(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// All elements under `scope` that have attribute `name`.
    pub fn query_attr_all(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.attr(n, name).is_some())
            .collect()
    }

    /// Decoded text of `id` and its descendants, skipping script/style.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(raw) => out.push_str(&crate::utils::html::unescape(raw)),
            NodeData::Element(e) if crate::utils::html::is_raw_text_element(&e.tag) => {}
            _ => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
