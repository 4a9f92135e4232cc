//! `quiver assemble`: assemble one page file and print the result.

use super::AssembleArgs;
use crate::assemble::{AssemblyOutcome, AssemblyReport, PageAssembler};
use crate::config::SiteConfig;
use crate::fragment::{DirSource, FragmentSource, HttpSource, Source};
use crate::page::Page;
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use std::{fs, io::Write, path::Path, sync::Arc};

pub fn run(config: Arc<SiteConfig>, args: &AssembleArgs) -> Result<()> {
    let html = fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read {}", args.page.display()))?;
    let location = args.path.clone().unwrap_or_else(|| location_for(&args.page));
    let source = source_for(&config, args);
    debug!(
        "assemble";
        "{} as {} (fragments from {})",
        args.page.display(),
        location,
        source.describe()
    );

    let mut page = Page::parse(&html, &location)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let assembler = PageAssembler::new(config);
    let outcome = runtime.block_on(assembler.assemble(&mut page, &source))?;
    let AssemblyOutcome::Assembled(assembly) = outcome else {
        bail!("page load was superseded");
    };

    let mut replayed = 0;
    for spec in &args.events {
        match spec.to_event(&page.document) {
            Some(event) => {
                page.dispatch(event);
                replayed += 1;
            }
            None => log!("warning"; "no element matches event `{:?}`, skipped", spec),
        }
    }

    let body = if args.json {
        let report = AssemblyReport::new(&assembly, page.location(), replayed);
        serde_json::to_string_pretty(&report)? + "\n"
    } else {
        page.document.to_html()
    };

    match &args.output {
        Some(path) => {
            fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
            log!("assemble"; "wrote {}", path.display());
        }
        None => std::io::stdout().lock().write_all(body.as_bytes())?,
    }
    Ok(())
}

/// Location a page file is served at: `/<file name>`.
fn location_for(page: &Path) -> String {
    let name = page
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("/{name}")
}

fn source_for(config: &SiteConfig, args: &AssembleArgs) -> Source {
    match (&args.base_url, &args.fragments) {
        (Some(base), _) => Source::Http(HttpSource::new(base.clone())),
        (None, Some(dir)) => Source::Dir(DirSource::new(dir)),
        (None, None) => Source::Dir(DirSource::new(&config.root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use tempfile::TempDir;

    fn args(argv: &[&str]) -> AssembleArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Assemble { args } => args,
            _ => unreachable!(),
        }
    }

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("about.html"),
            r#"<!DOCTYPE html><html><body><header id="header"></header><footer id="footer"></footer></body></html>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("header.html"),
            concat!(
                r#"<a class="header__nav-link" data-page="about">About</a>"#,
                r#"<button class="header__mobile-toggle"></button>"#,
                r#"<div class="header__mobile-nav"></div>"#,
            ),
        )
        .unwrap();
        dir
    }

    fn config(dir: &TempDir) -> Arc<SiteConfig> {
        Arc::new(SiteConfig {
            root: dir.path().to_path_buf(),
            ..SiteConfig::default()
        })
    }

    #[test]
    fn test_location_for() {
        assert_eq!(location_for(Path::new("pages/about.html")), "/about.html");
    }

    #[test]
    fn test_assemble_writes_html() {
        let dir = site();
        let page = dir.path().join("about.html");
        let out = dir.path().join("out.html");
        let args = args(&[
            "quiver",
            "assemble",
            page.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "-e",
            "click:.header__mobile-toggle",
        ]);

        run(config(&dir), &args).unwrap();
        let html = fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"aria-current="page""#));
        assert!(html.contains("header__mobile-nav--active"));
        // footer.html is missing, so the fallback footer is injected
        assert!(html.contains("footer__copyright"));
    }

    #[test]
    fn test_assemble_json_report() {
        let dir = site();
        let page = dir.path().join("about.html");
        let out = dir.path().join("report.json");
        let args = args(&[
            "quiver",
            "assemble",
            page.to_str().unwrap(),
            "--json",
            "--output",
            out.to_str().unwrap(),
            "-e",
            "click:.header__mobile-toggle",
            "-e",
            "resize:1024",
            "-e",
            "click:#missing",
        ]);

        run(config(&dir), &args).unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["identity"], "about");
        assert_eq!(report["activated"], 1);
        assert_eq!(report["menu"], "closed");
        assert_eq!(report["events"], 2);
        assert_eq!(report["footer"]["origin"]["type"], "fallback");
    }
}
