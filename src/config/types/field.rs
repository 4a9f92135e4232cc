//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::{borrow::Cow, fmt};

/// Dotted path of a config field, e.g. `assemble.breakpoint` or
/// `navigation[2].config_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of `field` inside element `index` of array table `table`.
    pub fn indexed(table: &str, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("{table}[{index}].{field}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(Cow::Owned(path))
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_path() {
        let path = FieldPath::indexed("navigation", 2, "config_key");
        assert_eq!(path.as_str(), "navigation[2].config_key");
        assert_eq!(FieldPath::new("assemble.breakpoint").as_ref(), "assemble.breakpoint");
    }
}
