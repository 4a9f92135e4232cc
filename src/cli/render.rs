//! `quiver render`: write the configured header and footer fragments.

use crate::config::SiteConfig;
use crate::log;
use crate::render::{render_footer, render_header};
use crate::utils::date::current_year;
use anyhow::{Context, Result};
use std::{fs, path::Path};

pub fn run(config: &SiteConfig, output: Option<&Path>) -> Result<()> {
    let dir = output.map_or_else(|| config.root.clone(), Path::to_path_buf);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let fragments = [
        (&config.assemble.header_fragment, render_header(config)),
        (
            &config.assemble.footer_fragment,
            render_footer(config, current_year()),
        ),
    ];
    for (name, markup) in fragments {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, markup).with_context(|| format!("Failed to write {}", path.display()))?;
        log!("render"; "wrote {}", path.display());
    }
    Ok(())
}
