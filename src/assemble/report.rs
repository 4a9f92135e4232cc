//! Machine-readable summary of an assembly (`quiver assemble --json`).

use super::Assembly;
use crate::fragment::{FragmentKind, FragmentLoadResult, Origin};
use crate::menu::MenuState;
use crate::page::PageIdentity;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AssemblyReport {
    pub location: String,
    pub identity: PageIdentity,
    pub generation: u64,
    pub header: Option<FragmentReport>,
    pub footer: Option<FragmentReport>,
    /// Links marked active for the page identity.
    pub activated: usize,
    /// Menu state after replayed events, absent when no menu was bound.
    pub menu: Option<MenuState>,
    /// Events replayed after assembly.
    pub events: usize,
}

#[derive(Debug, Serialize)]
pub struct FragmentReport {
    pub kind: FragmentKind,
    pub origin: Origin,
    pub bytes: usize,
}

impl From<&FragmentLoadResult> for FragmentReport {
    fn from(result: &FragmentLoadResult) -> Self {
        Self {
            kind: result.kind,
            origin: result.origin.clone(),
            bytes: result.markup.len(),
        }
    }
}

impl AssemblyReport {
    pub fn new(assembly: &Assembly, location: &str, events: usize) -> Self {
        Self {
            location: location.to_string(),
            identity: assembly.identity.clone(),
            generation: assembly.generation,
            header: assembly.header.as_ref().map(FragmentReport::from),
            footer: assembly.footer.as_ref().map(FragmentReport::from),
            activated: assembly.activated,
            menu: assembly.menu.as_ref().map(|m| m.state()),
            events,
        }
    }
}
