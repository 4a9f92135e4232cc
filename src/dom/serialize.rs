//! Tree → markup serialization.

use super::{Document, NodeData, NodeId};
use crate::utils::html::{escape_attr, is_void_element};

impl Document {
    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        self.inner_html(NodeId::ROOT)
    }

    /// Serialize the children of `id` (like `innerHTML`).
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize `id` including its own tag (like `outerHTML`).
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Root => {
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
            }
            NodeData::Doctype(decl) => out.push_str(decl),
            NodeData::Text(raw) => out.push_str(raw),
            NodeData::Comment(body) => {
                out.push_str("<!--");
                out.push_str(body);
                out.push_str("-->");
            }
            NodeData::Element(elem) => {
                out.push('<');
                out.push_str(&elem.tag);
                for (key, value) in &elem.attrs {
                    out.push(' ');
                    out.push_str(key);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');

                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                // Content a lenient parser nested under a void tag is emitted as a sibling.
                if is_void_element(&elem.tag) {
                    return;
                }
                out.push_str("</");
                out.push_str(&elem.tag);
                out.push('>');
            }
        }
    }
}
