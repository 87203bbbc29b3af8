//! `[site]` section configuration.
//!
//! The [`Site`] is the immutable description of the website every theme
//! renders against: name, canonical URL, default head metadata and the
//! closed list of sections content may belong to.

use super::defaults;
use crate::content::{
    SectionId, Tag,
    location::{TAG_LIST_PATH, tag_path},
};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml.
///
/// # Example
/// ```toml
/// [site]
/// name = "bekditlevsen.dk"
/// url = "https://bekditlevsen.dk"
/// description = "Blog about Swift and Firebase"
/// sections = ["swift-evolution", "firebase"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct Site {
    /// Site name, shown in the header and appended to page titles.
    pub name: String,

    /// Canonical base URL used for absolute links in head, feed and sitemap.
    pub url: String,

    /// Fallback description for locations without their own.
    #[serde(default)]
    pub description: String,

    /// BCP 47 language code (e.g., "en", "da").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Fallback social image for locations without their own.
    #[serde(default, rename = "image")]
    pub image_path: Option<String>,

    #[serde(default)]
    pub favicon: Option<String>,

    /// Declared sections, in navigation order.
    #[serde(default)]
    pub sections: Vec<SectionId>,
}

impl Site {
    /// Absolute URL for a site path or resource path.
    ///
    /// Values that already are absolute URLs are returned unchanged.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        let base = self.url.trim_end_matches('/');
        format!("{base}/{}", path.trim_matches('/'))
    }

    pub fn path_for_tag(&self, tag: &Tag) -> String {
        tag_path(tag)
    }

    pub fn tag_list_path(&self) -> &'static str {
        TAG_LIST_PATH
    }
}
