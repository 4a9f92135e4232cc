//! Quiver - assembles shared headers and footers into static site pages.

mod assemble;
mod cli;
mod config;
mod core;
mod dom;
mod embed;
mod event;
mod fragment;
mod logger;
mod menu;
mod nav;
mod page;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Assemble { args } => {
            let config = Arc::new(SiteConfig::load(&cli)?);
            cli::assemble::run(config, args)
        }
        Commands::Render { output } => {
            let config = SiteConfig::load(&cli)?;
            cli::render::run(&config, output.as_deref())
        }
        // Validation happens in the background once the server is bound
        Commands::Serve { .. } => cli::serve::serve(&cli),
    }
}
