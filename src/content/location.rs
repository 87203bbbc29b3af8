//! Locations: anything that is served at a path and carries head metadata.
//!
//! Content nodes (sections, items, pages) are locations, and so are the
//! derived pages the builder generates on its own: the index, the tag
//! list and one tag details page per tag.

use super::model::{Item, Page, Section, Tag};

/// Site path of the tag list page.
pub const TAG_LIST_PATH: &str = "tags";

pub trait Location {
    /// Site path, without leading or trailing `/` (`""` for the root).
    fn path(&self) -> String;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn image_path(&self) -> Option<&str> {
        None
    }
}

impl Location for Item {
    fn path(&self) -> String {
        Item::path(self)
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }
}

impl Location for Section {
    fn path(&self) -> String {
        Section::path(self).to_owned()
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
}

impl Location for Page {
    fn path(&self) -> String {
        self.path.clone()
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }
}

/// The site root. Untitled, so its head falls back to the site name.
#[derive(Debug, Default)]
pub struct Index;

impl Location for Index {
    fn path(&self) -> String {
        String::new()
    }
    fn title(&self) -> &str {
        ""
    }
    fn description(&self) -> &str {
        ""
    }
}

/// The page listing every tag.
#[derive(Debug, Default)]
pub struct TagList;

impl Location for TagList {
    fn path(&self) -> String {
        TAG_LIST_PATH.to_owned()
    }
    fn title(&self) -> &str {
        "Tags"
    }
    fn description(&self) -> &str {
        ""
    }
}

/// The page listing every item with one tag.
#[derive(Debug)]
pub struct TagDetails<'a> {
    pub tag: &'a Tag,
    title: String,
}

impl<'a> TagDetails<'a> {
    pub fn new(tag: &'a Tag) -> Self {
        Self {
            title: format!("Tagged with {tag}"),
            tag,
        }
    }
}

/// Site path of a tag's details page.
pub fn tag_path(tag: &Tag) -> String {
    format!("{TAG_LIST_PATH}/{}", tag.normalized())
}

impl Location for TagDetails<'_> {
    fn path(&self) -> String {
        tag_path(self.tag)
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        ""
    }
}
