//! Command-line interface definitions.

use crate::config::parse_override;
use crate::dom::Selector;
use crate::event::Event;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Header/footer assembly for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: quiver.toml)
    #[arg(short = 'C', long, global = true, default_value = "quiver.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Override a config value, e.g. `--set assemble.breakpoint=1024`
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, toml::Value)>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Assemble one page: inject fragments, mark the active link, bind the menu
    #[command(visible_alias = "a")]
    Assemble {
        #[command(flatten)]
        args: AssembleArgs,
    },

    /// Generate header.html and footer.html from the config
    #[command(visible_alias = "r")]
    Render {
        /// Output directory (default: site root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Serve the site, assembling HTML pages per request
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Assemble command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct AssembleArgs {
    /// HTML page to assemble
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub page: PathBuf,

    /// Location path the page is served at (default: the page file name)
    #[arg(long)]
    pub path: Option<String>,

    /// Directory holding the fragments (default: site root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath, conflicts_with = "base_url")]
    pub fragments: Option<PathBuf>,

    /// Fetch fragments over HTTP from this base URL
    #[arg(short = 'u', long = "base-url", value_hint = clap::ValueHint::Url)]
    pub base_url: Option<url::Url>,

    /// Event replayed after assembly: `click:<.class|#id>`, `key:<Key>`, `resize:<width>`
    #[arg(short, long = "event", value_name = "EVENT")]
    pub events: Vec<EventSpec>,

    /// Write the assembled HTML here (default: stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Print an assembly report as JSON instead of HTML
    #[arg(long)]
    pub json: bool,
}

/// An event to replay against an assembled page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSpec {
    /// Click the first element matching the selector.
    Click(Selector),
    Key(String),
    Resize(u32),
}

impl EventSpec {
    /// Resolve against a page. `None` when a click target does not exist.
    pub fn to_event(&self, doc: &crate::dom::Document) -> Option<Event> {
        match self {
            Self::Click(selector) => doc
                .select_first(doc.root(), selector)
                .map(|target| Event::Click { target }),
            Self::Key(key) => Some(Event::key(key)),
            Self::Resize(width) => Some(Event::Resize { width: *width }),
        }
    }
}

impl FromStr for EventSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("expected `kind:argument`, got `{s}`"))?;
        match kind {
            "click" => arg.parse().map(Self::Click),
            "key" if !arg.is_empty() => Ok(Self::Key(arg.to_string())),
            "resize" => arg
                .parse()
                .map(Self::Resize)
                .map_err(|_| format!("invalid width `{arg}`")),
            _ => Err(format!("unknown event `{s}` (use click:, key: or resize:)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_and_version_flags() {
        let cli = Cli::try_parse_from(["quiver", "-v", "render"]).unwrap();
        assert!(cli.verbose);

        let err = Cli::try_parse_from(["quiver", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_parse_assemble_command() {
        let cli = Cli::try_parse_from([
            "quiver",
            "--set",
            "assemble.breakpoint=1024",
            "assemble",
            "about.html",
            "-e",
            "click:.header__mobile-toggle",
            "-e",
            "key:Escape",
        ])
        .unwrap();

        assert_eq!(cli.overrides.len(), 1);
        let Commands::Assemble { args } = cli.command else {
            panic!("expected assemble");
        };
        assert_eq!(args.page, PathBuf::from("about.html"));
        assert_eq!(
            args.events,
            vec![
                EventSpec::Click(Selector::Class("header__mobile-toggle".into())),
                EventSpec::Key("Escape".into()),
            ]
        );
    }

    #[test]
    fn test_fragments_conflict_with_base_url() {
        let result = Cli::try_parse_from([
            "quiver",
            "assemble",
            "index.html",
            "--fragments",
            "partials",
            "--base-url",
            "https://example.com/",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_event_spec_parse() {
        assert_eq!(
            "resize:1024".parse::<EventSpec>(),
            Ok(EventSpec::Resize(1024))
        );
        assert!(matches!(
            "click:#menu".parse::<EventSpec>(),
            Ok(EventSpec::Click(Selector::Id(_)))
        ));
        assert!("resize:wide".parse::<EventSpec>().is_err());
        assert!("scroll:10".parse::<EventSpec>().is_err());
        assert!("key:".parse::<EventSpec>().is_err());
    }
}
