//! Typed content tree: sections, items, pages and tags.

use crate::utils::slug::normalize_tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet, fmt};

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a section, e.g. `swift-evolution`.
///
/// The set of valid ids is closed: it is whatever the site author lists in
/// `[site].sections`. Content using any other id fails validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human title derived from the id: `swift-evolution` → `Swift evolution`.
    pub fn default_title(&self) -> String {
        let spaced = self.0.replace(['-', '_'], " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A free-text label attached to items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL segment for this tag's details page.
    pub fn normalized(&self) -> String {
        normalize_tag(&self.0)
    }

    /// Tags must carry at least one visible character.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Content nodes
// ============================================================================

/// Embedded media shown on an item page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase", deny_unknown_fields)]
pub enum Video {
    /// YouTube video id
    Youtube(String),
    /// Vimeo video id
    Vimeo(String),
    /// Direct link to a video file
    Url(String),
}

/// A dated entry (blog post) belonging to exactly one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub section: SectionId,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Pre-rendered HTML
    pub body: String,
    pub date: DateTime<Utc>,
    pub tags: BTreeSet<Tag>,
    pub image_path: Option<String>,
    pub video: Option<Video>,
}

impl Item {
    /// Site path: `{section}/{slug}`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.section, self.slug)
    }
}

/// A named, ordered group of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub description: String,
    pub body: String,
    pub items: Vec<Item>,
}

impl Section {
    /// Empty section titled after its id.
    pub fn new(id: SectionId) -> Self {
        Self {
            title: id.default_title(),
            id,
            description: String::new(),
            body: String::new(),
            items: Vec::new(),
        }
    }

    /// Site path: the section id.
    pub fn path(&self) -> &str {
        self.id.as_str()
    }
}

/// A standalone document outside the section hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub image_path: Option<String>,
}

/// The whole content tree for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentModel {
    pub sections: Vec<Section>,
    pub pages: Vec<Page>,
}

impl ContentModel {
    /// All items across all sections, in section order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Newest first; equal dates fall back to ascending item path so the
/// order is identical across builds.
pub fn by_date_desc(a: &Item, b: &Item) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.path().cmp(&b.path()))
}
