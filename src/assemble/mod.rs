//! Page assembly.
//!
//! One load runs in four steps:
//!
//! 1. detect the header and footer mounts by id (either may be absent)
//! 2. fetch the fragments for the present mounts concurrently
//! 3. once both settle, inject them if the load is still current
//! 4. with a header present, mark the active links and bind the menu
//!
//! Steps 2 and 3 are separate so a caller can start a newer load while an
//! older fetch is still in flight; the older one then reports
//! [`AssemblyOutcome::Superseded`] and touches nothing.

mod generation;
mod report;

pub use generation::{LoadGenerations, LoadToken};
pub use report::AssemblyReport;

use crate::config::SiteConfig;
use crate::dom::{Document, DomError, NodeId};
use crate::fragment::{FragmentFetcher, FragmentKind, FragmentLoadResult, FragmentSource};
use crate::menu::MenuBinding;
use crate::page::{Page, PageIdentity};
use crate::{debug, nav};
use std::sync::Arc;

/// Mount points found in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mounts {
    pub header: Option<NodeId>,
    pub footer: Option<NodeId>,
}

impl Mounts {
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.footer.is_none()
    }
}

/// Fragment results for the present mounts.
#[derive(Debug, Default)]
pub struct Fetched {
    pub header: Option<FragmentLoadResult>,
    pub footer: Option<FragmentLoadResult>,
}

/// A completed load.
pub struct Assembly {
    pub identity: PageIdentity,
    pub generation: u64,
    pub header: Option<FragmentLoadResult>,
    pub footer: Option<FragmentLoadResult>,
    pub activated: usize,
    /// Live menu controller. Dropping it unbinds the menu.
    pub menu: Option<MenuBinding>,
}

pub enum AssemblyOutcome {
    Assembled(Assembly),
    /// A newer load started before this one settled.
    Superseded,
}

impl AssemblyOutcome {
    pub fn assembled(self) -> Option<Assembly> {
        match self {
            Self::Assembled(assembly) => Some(assembly),
            Self::Superseded => None,
        }
    }
}

/// Runs page loads against one configuration.
///
/// Generations are scoped to the assembler: use one assembler per page
/// context, so that only loads of the same page supersede each other.
#[derive(Debug, Clone)]
pub struct PageAssembler {
    config: Arc<SiteConfig>,
    generations: LoadGenerations,
}

impl PageAssembler {
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            generations: LoadGenerations::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Start a load, superseding any load still in flight.
    pub fn begin(&self) -> LoadToken {
        self.generations.begin()
    }

    /// Locate the configured mount elements.
    pub fn detect(&self, doc: &Document) -> Mounts {
        let assemble = &self.config.assemble;
        Mounts {
            header: doc.get_element_by_id(&assemble.header_mount),
            footer: doc.get_element_by_id(&assemble.footer_mount),
        }
    }

    /// Fetch fragments for the present mounts. Both requests run at once and
    /// this returns when both have settled.
    pub async fn fetch<S: FragmentSource>(&self, mounts: &Mounts, source: &S) -> Fetched {
        let assemble = &self.config.assemble;
        let fetcher = FragmentFetcher::from_config(source, assemble);

        let header = async {
            match mounts.header {
                Some(_) => Some(fetcher.fetch(FragmentKind::Header, &assemble.header_fragment).await),
                None => None,
            }
        };
        let footer = async {
            match mounts.footer {
                Some(_) => Some(fetcher.fetch(FragmentKind::Footer, &assemble.footer_fragment).await),
                None => None,
            }
        };

        let (header, footer) = tokio::join!(header, footer);
        Fetched { header, footer }
    }

    /// Inject fetched fragments, then activate navigation and bind the menu.
    pub fn complete(
        &self,
        page: &mut Page,
        mounts: &Mounts,
        fetched: Fetched,
        token: &LoadToken,
    ) -> Result<AssemblyOutcome, DomError> {
        if !token.is_current() {
            debug!("assemble"; "discarding load {} for {}", token.generation(), page.location());
            return Ok(AssemblyOutcome::Superseded);
        }

        if let (Some(mount), Some(result)) = (mounts.header, &fetched.header) {
            result.inject(&mut page.document, mount)?;
        }
        if let (Some(mount), Some(result)) = (mounts.footer, &fetched.footer) {
            result.inject(&mut page.document, mount)?;
        }

        let identity = page.identity().clone();
        let (activated, menu) = match mounts.header {
            Some(header) => {
                let activated = nav::activate(&mut page.document, header, &identity)?;
                let menu = MenuBinding::bind(page, header, self.config.assemble.breakpoint);
                (activated, menu)
            }
            None => (0, None),
        };

        debug!(
            "assemble";
            "{} assembled as `{}`: {} active link(s), menu {}",
            page.location(),
            identity,
            activated,
            if menu.is_some() { "bound" } else { "absent" }
        );

        Ok(AssemblyOutcome::Assembled(Assembly {
            identity,
            generation: token.generation(),
            header: fetched.header,
            footer: fetched.footer,
            activated,
            menu,
        }))
    }

    /// Run a full load of `page`.
    pub async fn assemble<S: FragmentSource>(
        &self,
        page: &mut Page,
        source: &S,
    ) -> Result<AssemblyOutcome, DomError> {
        let token = self.begin();
        let mounts = self.detect(&page.document);
        if mounts.is_empty() {
            debug!("assemble"; "no mounts in {}", page.location());
        }
        let fetched = self.fetch(&mounts, source).await;
        self.complete(page, &mounts, fetched, &token)
    }
}
