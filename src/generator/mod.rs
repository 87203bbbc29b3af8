//! Generated documents that are not rendered by the theme.

mod feed;
mod sitemap;

pub use feed::build_feed;
pub use sitemap::{SitemapEntry, build_sitemap};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("rss validation failed: {0}")]
    Feed(String),
}
