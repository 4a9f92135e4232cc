//! Single-token selectors: `#id`, `.class`, `tag`, `[attr]`, `[attr=value]`.

use super::{Document, Element, NodeId};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
    Attr { name: String, value: Option<String> },
}

impl Selector {
    pub fn matches(&self, elem: &Element) -> bool {
        match self {
            Self::Id(id) => elem.attr("id") == Some(id.as_str()),
            Self::Class(class) => elem.has_class(class),
            Self::Tag(tag) => elem.tag.eq_ignore_ascii_case(tag),
            Self::Attr { name, value } => match (elem.attr(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("unsupported selector `{s}`");

        if let Some(id) = s.strip_prefix('#') {
            return non_empty(id).map(Self::Id).ok_or_else(invalid);
        }
        if let Some(class) = s.strip_prefix('.') {
            return non_empty(class).map(Self::Class).ok_or_else(invalid);
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                    let name = non_empty(name.trim()).ok_or_else(invalid)?;
                    Ok(Self::Attr {
                        name,
                        value: Some(value.to_string()),
                    })
                }
                None => non_empty(inner.trim())
                    .map(|name| Self::Attr { name, value: None })
                    .ok_or_else(invalid),
            };
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Ok(Self::Tag(s.to_ascii_lowercase()));
        }
        Err(invalid())
    }
}

fn non_empty(s: &str) -> Option<String> {
    let valid = !s.is_empty() && !s.contains(char::is_whitespace);
    valid.then(|| s.to_string())
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Attr { name, value: None } => write!(f, "[{name}]"),
            Self::Attr {
                name,
                value: Some(v),
            } => write!(f, "[{name}=\"{v}\"]"),
        }
    }
}

impl Document {
    /// First element under `scope` matching `selector` (`querySelector`).
    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.element(n).is_some_and(|e| selector.matches(e)))
    }

    /// All elements under `scope` matching `selector` (`querySelectorAll`).
    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| selector.matches(e)))
            .collect()
    }
}
