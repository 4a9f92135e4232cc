//! Markup → tree conversion using `tl`.

use super::{Document, DomError, Element, NodeData, NodeId};
use crate::utils::html::{is_raw_text_element, unescape};
use std::collections::VecDeque;

impl Document {
    /// Parse `html` and append the resulting nodes under `parent`.
    pub(super) fn append_markup(&mut self, parent: NodeId, html: &str) -> Result<(), DomError> {
        let (doctype, body) = split_doctype(html);
        if let Some(decl) = doctype {
            self.append(parent, NodeData::Doctype(decl.to_string()));
        }

        let (hollowed, mut raw_text) = hollow_raw_text(body);
        let dom = tl::parse(&hollowed, tl::ParserOptions::default())
            .map_err(|e| DomError::Parse(format!("{e:?}")))?;
        let parser = dom.parser();
        for handle in dom.children() {
            self.convert(*handle, parser, parent, &mut raw_text);
        }
        Ok(())
    }

    /// Convert a tl node handle (and its subtree) into arena nodes.
    fn convert(
        &mut self,
        handle: tl::NodeHandle,
        parser: &tl::Parser,
        parent: NodeId,
        raw_text: &mut VecDeque<String>,
    ) {
        let Some(node) = handle.get(parser) else {
            return;
        };

        match node {
            tl::Node::Tag(tag) => {
                let tag_name = tag.name().as_utf8_str().to_lowercase();

                let mut elem = Element::new(tag_name);
                for (key, value) in tag.attributes().iter() {
                    let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                    elem.set_attr(&key.to_ascii_lowercase(), &value);
                }
                // tl keeps attributes in a hash map; restore source order
                let order = attribute_names(&tag.raw().as_utf8_str());
                elem.attrs.sort_by_key(|(key, _)| {
                    order.iter().position(|name| name == key).unwrap_or(usize::MAX)
                });

                let is_raw = is_raw_text_element(&elem.tag);
                let id = self.append(parent, NodeData::Element(elem));
                if is_raw {
                    if let Some(body) = raw_text.pop_front()
                        && !body.is_empty()
                    {
                        self.append(id, NodeData::Text(body));
                    }
                    return;
                }
                for child in tag.children().top().iter() {
                    self.convert(*child, parser, id, raw_text);
                }
            }
            tl::Node::Raw(bytes) => {
                let text = bytes.as_utf8_str();
                if !text.is_empty() {
                    self.append(parent, NodeData::Text(text.into_owned()));
                }
            }
            tl::Node::Comment(bytes) => {
                let raw = bytes.as_utf8_str();
                let body = raw
                    .strip_prefix("<!--")
                    .map(|rest| rest.strip_suffix("-->").unwrap_or(rest))
                    .unwrap_or(&*raw);
                self.append(parent, NodeData::Comment(body.to_string()));
            }
        }
    }
}

/// Cut the bodies of `script` and `style` elements out of `html`.
///
/// `tl` parses their content as markup, so it is handed empty elements and
/// the bodies are reattached in document order.
fn hollow_raw_text(html: &str) -> (String, VecDeque<String>) {
    let mut out = String::with_capacity(html.len());
    let mut bodies = VecDeque::new();
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        let (before, tail) = rest.split_at(lt);
        out.push_str(before);

        if tail.starts_with("<!--") {
            let end = tail.find("-->").map_or(tail.len(), |i| i + 3);
            out.push_str(&tail[..end]);
            rest = &tail[end..];
            continue;
        }
        let Some(tag) = raw_text_tag(tail) else {
            out.push('<');
            rest = &tail[1..];
            continue;
        };

        let open_end = tail.find('>').map_or(tail.len(), |i| i + 1);
        let (open, after) = tail.split_at(open_end);
        out.push_str(open);
        if open.ends_with("/>") {
            bodies.push_back(String::new());
            rest = after;
            continue;
        }

        let close = after
            .to_ascii_lowercase()
            .find(&format!("</{tag}"))
            .unwrap_or(after.len());
        bodies.push_back(after[..close].to_string());
        rest = &after[close..];
    }
    out.push_str(rest);
    (out, bodies)
}

/// Name of the raw-text element opened at the start of `tail`, if any.
fn raw_text_tag(tail: &str) -> Option<String> {
    let name: String = tail[1..]
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    let next = tail[1 + name.len()..].chars().next();
    let terminated = next.is_none_or(|c| c.is_ascii_whitespace() || c == '>' || c == '/');
    (terminated && is_raw_text_element(&name)).then_some(name)
}

/// Attribute names of the start tag at the beginning of `raw`, lowercased,
/// in source order.
fn attribute_names(raw: &str) -> Vec<String> {
    let bytes = raw.as_bytes();
    let len = bytes.len();
    let is_space = |b: u8| b.is_ascii_whitespace();
    let mut names = Vec::new();

    // skip `<` and the tag name
    let mut i = 1;
    while i < len && !is_space(bytes[i]) && bytes[i] != b'>' && bytes[i] != b'/' {
        i += 1;
    }

    loop {
        while i < len && (is_space(bytes[i]) || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len || bytes[i] == b'>' {
            break;
        }

        let start = i;
        while i < len && !is_space(bytes[i]) && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        if i == start {
            i += 1;
            continue;
        }
        names.push(raw[start..i].to_ascii_lowercase());

        while i < len && is_space(bytes[i]) {
            i += 1;
        }
        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && is_space(bytes[i]) {
                i += 1;
            }
            match bytes.get(i) {
                Some(&quote @ (b'"' | b'\'')) => {
                    i += 1;
                    while i < len && bytes[i] != quote {
                        i += 1;
                    }
                    i += 1;
                }
                _ => {
                    while i < len && !is_space(bytes[i]) && bytes[i] != b'>' {
                        i += 1;
                    }
                }
            }
        }
    }
    names
}

/// Split a leading `<!DOCTYPE ...>` off the markup.
fn split_doctype(html: &str) -> (Option<&str>, &str) {
    let trimmed = html.trim_start();
    let is_doctype = trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));
    if !is_doctype {
        return (None, html);
    }
    match trimmed.find('>') {
        Some(end) => (Some(&trimmed[..=end]), &trimmed[end + 1..]),
        None => (None, html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_doctype() {
        let (decl, rest) = split_doctype("<!DOCTYPE html>\n<html></html>");
        assert_eq!(decl, Some("<!DOCTYPE html>"));
        assert_eq!(rest, "\n<html></html>");

        let (decl, rest) = split_doctype("<div></div>");
        assert!(decl.is_none());
        assert_eq!(rest, "<div></div>");
    }

    #[test]
    fn test_parse_keeps_id_and_class() {
        let doc = Document::parse(r#"<div id="mobile-nav" class="header__mobile-nav" aria-hidden="true"></div>"#)
            .unwrap();
        let div = doc.children(NodeId::ROOT)[0];
        assert_eq!(doc.attr(div, "id"), Some("mobile-nav"));
        assert_eq!(doc.attr(div, "class"), Some("header__mobile-nav"));
        assert_eq!(doc.attr(div, "aria-hidden"), Some("true"));
    }

    #[test]
    fn test_parse_lowercases_tags_and_decodes_attrs() {
        let doc = Document::parse(r#"<A HREF="/?a=1&amp;b=2">x</A>"#).unwrap();
        let a = doc.children(NodeId::ROOT)[0];
        assert_eq!(doc.tag(a), Some("a"));
        assert_eq!(doc.attr(a, "href"), Some("/?a=1&b=2"));
    }

    #[test]
    fn test_parse_keeps_comments() {
        let doc = Document::parse("<p><!-- note -->text</p>").unwrap();
        let p = doc.children(NodeId::ROOT)[0];
        assert_eq!(doc.text_content(p), "text");
        assert_eq!(doc.to_html(), "<p><!-- note -->text</p>");
    }

    #[test]
    fn test_script_and_style_bodies_are_verbatim() {
        let html = "<head><!-- keep -->\
<script>if (a < b && c > d) { x = '<p>'; }</script>\
<style>a > b { }</style></head>";
        let doc = Document::parse(html).unwrap();
        assert_eq!(doc.to_html(), html);

        let head = doc.children(NodeId::ROOT)[0];
        assert_eq!(doc.children(head).len(), 3);
        assert_eq!(doc.text_content(head), "");
    }

    #[test]
    fn test_uppercase_and_self_closing_script() {
        let html = r#"<SCRIPT src="a.js"/><div>x</div><script>let t = "</div>";</script>"#;
        let (hollowed, bodies) = hollow_raw_text(html);
        assert_eq!(hollowed, r#"<SCRIPT src="a.js"/><div>x</div><script></script>"#);
        assert_eq!(bodies, [String::new(), r#"let t = "</div>";"#.to_string()]);
    }

    #[test]
    fn test_attribute_order_is_stable() {
        let html = r#"<button type="button" id="menu-toggle" class="header__mobile-toggle" aria-expanded="false" aria-controls="mobile-nav" data-page="home" hidden>x</button>"#;
        let first = Document::parse(html).unwrap().to_html();
        for _ in 0..20 {
            assert_eq!(Document::parse(html).unwrap().to_html(), first);
        }
        assert_eq!(
            first,
            r#"<button type="button" id="menu-toggle" class="header__mobile-toggle" aria-expanded="false" aria-controls="mobile-nav" data-page="home" hidden>x</button>"#
        );
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(
            attribute_names(r#"<a HREF=x.html data-page = "about" download class='c'>"#),
            ["href", "data-page", "download", "class"]
        );
    }
}
