//! `[build]` section configuration.
//!
//! Contains build settings: paths, minification, additional build steps,
//! feed and sitemap generation.

use super::defaults;
use crate::steps::BuildStep;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
/// minify = true            # Minify HTML
/// steps = [{ copy_resources = { from = "resources", to = "" } }]
///
/// [build.feed]
/// max_items = 10
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Content source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify HTML and XML output.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before writing.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Additional steps run after rendering, in order.
    pub steps: Vec<BuildStep>,

    /// RSS feed generation settings.
    pub feed: FeedConfig,

    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
}

impl BuildConfig {
    /// Output paths of the enabled feed and sitemap.
    pub fn generated_paths(&self) -> Vec<&str> {
        let feed = self.feed.enable.then_some(self.feed.path.as_str());
        let sitemap = self.sitemap.enable.then_some(self.sitemap.path.as_str());
        feed.into_iter().chain(sitemap).collect()
    }
}

/// `[build.feed]` section - RSS feed of the newest items.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path relative to the output directory.
    #[serde(default = "defaults::build::feed::path")]
    #[educe(Default = defaults::build::feed::path())]
    pub path: String,

    /// Number of newest items included.
    #[serde(default = "defaults::build::feed::max_items")]
    #[educe(Default = defaults::build::feed::max_items())]
    pub max_items: usize,
}

/// `[build.sitemap]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: String,
}
