//! Indexes derived from the content tree, computed once per build.

use crate::content::{ContentModel, Item, Tag, model::by_date_desc};
use std::collections::BTreeMap;

/// Read-only views over the content used by every render call.
#[derive(Debug)]
pub struct SiteIndex<'a> {
    /// Every item, newest first, ties broken by path.
    pub items: Vec<&'a Item>,
    /// Items per tag, in the same order as `items`.
    pub tagged: BTreeMap<&'a Tag, Vec<&'a Item>>,
}

impl<'a> SiteIndex<'a> {
    pub fn new(content: &'a ContentModel) -> Self {
        let mut items: Vec<&Item> = content.items().collect();
        items.sort_by(|a, b| by_date_desc(a, b));

        let mut tagged: BTreeMap<&Tag, Vec<&Item>> = BTreeMap::new();
        for &item in &items {
            for tag in &item.tags {
                tagged.entry(tag).or_default().push(item);
            }
        }

        Self { items, tagged }
    }

    /// Every distinct tag, sorted.
    pub fn tags(&self) -> Vec<&'a Tag> {
        self.tagged.keys().copied().collect()
    }

    pub fn items_tagged(&self, tag: &Tag) -> &[&'a Item] {
        self.tagged.get(tag).map(Vec::as_slice).unwrap_or_default()
    }
}
