//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Site metadata (name, url, declared sections)     |
//! | `[build]`   | Build paths, minify, build steps, feed, sitemap  |
//! | `[theme]`   | Default theme options                            |
//! | `[deploy]`  | Deployment steps and command timeout             |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "bekditlevsen.dk"
//! url = "https://bekditlevsen.dk"
//! sections = ["swift-evolution", "firebase"]
//!
//! [build]
//! output = "public"
//!
//! [deploy]
//! steps = [{ remote = { project = "bekditlevsen" } }]
//! ```

mod build;
pub mod defaults;
mod deploy;
mod error;
mod site;
mod theme;

pub use build::{BuildConfig, FeedConfig, SitemapConfig};
pub use deploy::DeployConfig;
pub use error::ConfigError;
pub use site::Site;
pub use theme::{FooterLink, ThemeOptions};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    deploy::DeployStep,
    steps::{BuildStep, CopyResources},
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    pub site: Site,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Default theme options
    #[serde(default)]
    pub theme: ThemeOptions,

    /// Deployment settings
    #[serde(default)]
    pub deploy: DeployConfig,
}

impl SiteConfig {
    /// Parse configuration text read from `path`
    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(path, &content)?)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Some(args) = cli.build_args() {
            self.apply_build_args(args);
        }

        self.update_path_with_root(&root, &cli.config);
        self.sync_theme();
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        self.build.clean |= args.clean;
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.site.url, args.base_url.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every configured path against the project root
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(config));

        self.build.content = Self::resolve(&root, &self.build.content);
        self.build.output = Self::resolve(&root, &self.build.output);

        for step in &mut self.build.steps {
            let BuildStep::CopyResources(copy) = step;
            Self::resolve_copy(&root, copy);
        }
        for step in &mut self.deploy.steps {
            if let DeployStep::CopyResources(copy) = step {
                Self::resolve_copy(&root, copy);
            }
        }

        self.root = root;
    }

    fn resolve_copy(root: &Path, copy: &mut CopyResources) {
        copy.from = Self::resolve(root, &copy.from);
    }

    /// Expand `~` and make `path` absolute relative to `root`
    fn resolve(root: &Path, path: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        if path.is_relative() {
            Self::normalize_path(&root.join(path))
        } else {
            Self::normalize_path(&path)
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Point the theme's feed link at the generated feed, if any
    fn sync_theme(&mut self) {
        self.theme.feed_path = self
            .build
            .feed
            .enable
            .then(|| self.build.feed.path.trim_matches('/').to_owned());
    }

    /// Validate configuration for the current command
    pub fn validate(&self, command: &Commands) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if self.site.name.trim().is_empty() {
            bail!(ConfigError::invalid("site.name", "must not be empty"));
        }

        if !self.site.url.starts_with("http") {
            bail!(ConfigError::invalid(
                "site.url",
                "must start with http:// or https://"
            ));
        }

        let mut seen = BTreeSet::new();
        for id in &self.site.sections {
            if id.as_str().is_empty() || id.as_str().contains('/') {
                bail!(ConfigError::invalid(
                    "site.sections",
                    format!("contains invalid id `{id}`")
                ));
            }
            if !seen.insert(id) {
                bail!(ConfigError::invalid(
                    "site.sections",
                    format!("declares `{id}` twice")
                ));
            }
        }

        if self.build.feed.enable {
            if self.build.feed.max_items == 0 {
                bail!(ConfigError::invalid("build.feed.max_items", "must be at least 1"));
            }
            if self.build.feed.path.trim_matches('/').is_empty() {
                bail!(ConfigError::invalid("build.feed.path", "must not be empty"));
            }
        }

        if self.build.sitemap.enable && self.build.sitemap.path.trim_matches('/').is_empty() {
            bail!(ConfigError::invalid("build.sitemap.path", "must not be empty"));
        }

        let timeout = self
            .deploy
            .timeout()
            .map_err(|err| ConfigError::invalid("deploy.timeout", err.to_string()))?;
        if timeout.is_zero() {
            bail!(ConfigError::invalid("deploy.timeout", "must be positive"));
        }

        if let Commands::Deploy { .. } = command {
            for step in &self.deploy.steps {
                if let DeployStep::Remote(remote) = step {
                    Self::check_command_installed("deploy.steps.remote.command", &remote.command)?;
                }
            }
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(key: &'static str, command: &[String]) -> Result<(), ConfigError> {
        let Some(cmd) = command.first() else {
            return Err(ConfigError::invalid(key, "must have at least one element"));
        };

        which::which(cmd).map_err(|source| ConfigError::CommandNotFound {
            command: cmd.clone(),
            source,
        })?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
