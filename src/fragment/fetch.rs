//! Fetch-or-fallback for the header and footer fragments.

use super::source::{FetchError, FragmentSource};
use crate::config::{AssembleConfig, is_relative_resource};
use crate::dom::{Document, DomError, NodeId};
use crate::embed::fallback;
use crate::{debug, log};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Header,
    Footer,
}

impl FragmentKind {
    /// Embedded markup used when the fragment cannot be fetched.
    pub const fn fallback(self) -> &'static str {
        match self {
            Self::Header => fallback::HEADER_HTML,
            Self::Footer => fallback::FOOTER_HTML,
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Footer => "footer",
        })
    }
}

/// Where the injected markup came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "reason", rename_all = "lowercase")]
pub enum Origin {
    Remote,
    /// Embedded markup, with the failure that caused it.
    Fallback(String),
}

/// Outcome of one fragment fetch. Always carries usable markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentLoadResult {
    pub kind: FragmentKind,
    pub markup: String,
    pub origin: Origin,
}

impl FragmentLoadResult {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback(_))
    }

    /// Replace the content of `mount` with the markup.
    ///
    /// Markup that does not parse is replaced by the embedded fallback.
    pub fn inject(&self, doc: &mut Document, mount: NodeId) -> Result<(), DomError> {
        match doc.set_inner_html(mount, &self.markup) {
            Err(DomError::Parse(reason)) if !self.is_fallback() => {
                log!("fragment"; "{} markup unusable ({}), using fallback", self.kind, reason);
                doc.set_inner_html(mount, self.kind.fallback())
            }
            other => other,
        }
    }
}

/// Retrieves fragments from a source, falling back on any failure.
pub struct FragmentFetcher<'a, S> {
    source: &'a S,
    timeout: Option<Duration>,
}

impl<'a, S: FragmentSource> FragmentFetcher<'a, S> {
    pub fn new(source: &'a S, timeout: Option<Duration>) -> Self {
        Self { source, timeout }
    }

    pub fn from_config(source: &'a S, config: &AssembleConfig) -> Self {
        Self::new(source, config.timeout())
    }

    /// Fetch `name`. Never fails: errors yield the fallback markup.
    pub async fn fetch(&self, kind: FragmentKind, name: &str) -> FragmentLoadResult {
        match self.try_fetch(name).await {
            Ok(markup) => {
                debug!("fragment"; "loaded {} from {}", name, self.source.describe());
                FragmentLoadResult {
                    kind,
                    markup,
                    origin: Origin::Remote,
                }
            }
            Err(err) => {
                log!("fragment"; "failed to load {}: {}, using fallback", name, err);
                FragmentLoadResult {
                    kind,
                    markup: kind.fallback().to_string(),
                    origin: Origin::Fallback(err.to_string()),
                }
            }
        }
    }

    async fn try_fetch(&self, name: &str) -> Result<String, FetchError> {
        if !is_relative_resource(name) {
            return Err(FetchError::InvalidName(name.to_string()));
        }
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch(name))
                .await
                .map_err(|_| FetchError::Timeout(limit))?,
            None => self.source.fetch(name).await,
        }
    }
}
