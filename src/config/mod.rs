//! Site configuration management for `quiver.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── assemble   # [assemble]
//! │   ├── navigation # [[navigation]], [links]
//! │   ├── serve      # [serve]
//! │   └── site       # [site], [contact], [[social]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # ConfigSignal / ConfigReady
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The loaded config is frozen into an `Arc<SiteConfig>` and handed to every
//! consumer. `--set` overrides are applied before that point.

pub mod section;
pub mod types;
mod util;

pub use util::parse_override;
use util::{assign, find_config_file, lookup};

pub use section::{
    AssembleConfig, ContactConfig, LinksTable, NavEntryConfig, NavigationEntry, ServeConfig,
    SiteInfoConfig, SocialLink, is_relative_resource,
};
pub use types::{ConfigDiagnostics, ConfigError, ConfigReady, ConfigSignal, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    page::PageIdentity,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing quiver.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    /// Named URLs (`shop_url`, `privacy_policy`, ...).
    #[serde(default)]
    pub links: LinksTable,

    /// Feature flags. Missing flags are disabled.
    #[serde(default)]
    pub features: BTreeMap<String, bool>,

    #[serde(default)]
    pub assemble: AssembleConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub navigation: Vec<NavEntryConfig>,

    #[serde(default)]
    pub social: Vec<SocialLink>,
}

impl SiteConfig {
    /// Load and validate configuration from CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = Self::resolve(cli)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration and apply CLI overrides, without validating.
    ///
    /// Searches upward from cwd for the config file. A missing file is not an
    /// error: defaults are used and the site root is the working directory.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                log!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        for (path, value) in &cli.overrides {
            config.set(path, value.clone())?;
        }
        config.apply_command_options(cli);

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let mut diag = ConfigDiagnostics::new();
            for field in ignored {
                diag.warn(FieldPath::from(field), "unknown field, ignored");
            }
            diag.print_warnings();
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Join a path with the site root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Value at a dotted path (`site.name`, `navigation.0.url`).
    pub fn get(&self, path: &str) -> Option<toml::Value> {
        let value = toml::Value::try_from(self).ok()?;
        lookup(&value, path).cloned()
    }

    /// Replace the value at a dotted path.
    ///
    /// Missing tables on the path are created. The result must still
    /// deserialize as a `SiteConfig`; otherwise `self` is left unchanged.
    pub fn set(&mut self, path: &str, value: toml::Value) -> Result<(), ConfigError> {
        let override_err = |reason: String| ConfigError::Override {
            path: path.to_string(),
            reason,
        };

        let mut tree = toml::Value::try_from(&*self)?;
        assign(&mut tree, path, value).map_err(override_err)?;
        let mut updated: Self = tree
            .try_into()
            .map_err(|err: toml::de::Error| override_err(err.message().to_string()))?;

        updated.root = std::mem::take(&mut self.root);
        updated.config_path = std::mem::take(&mut self.config_path);
        *self = updated;
        Ok(())
    }

    /// Navigation entries with links resolved and slugs derived.
    pub fn navigation(&self) -> Vec<NavigationEntry> {
        self.navigation
            .iter()
            .map(|entry| entry.resolve(&self.links))
            .collect()
    }

    /// Social links with a non-blank URL.
    pub fn social_links(&self) -> Vec<&SocialLink> {
        self.social.iter().filter(|link| link.is_set()).collect()
    }

    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    /// Page identity for a location path.
    pub fn current_page_slug(&self, path: &str) -> PageIdentity {
        PageIdentity::from_path(path)
    }

    /// Named link from `[links]`.
    pub fn link(&self, key: &str) -> Option<&str> {
        self.links.get(key).map(String::as_str)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole config, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.site.validate(&mut diag);
        self.assemble.validate(&mut diag);
        section::validate_navigation(&self.navigation, &self.links, &mut diag);
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

impl FromStr for SiteConfig {
    type Err = ConfigError;

    /// Parse configuration from a TOML string, without validating.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

/// Parse a config in tests, panicking on invalid TOML.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    content.parse().unwrap()
}
