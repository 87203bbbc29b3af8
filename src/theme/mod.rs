//! Themes turn content into documents.
//!
//! A [`Theme`] is a set of pure functions, one per kind of location. The
//! builder hands every function read-only data and already-sorted item
//! lists, so two calls with equal input always return equal documents.
//! Any implementor can replace [`DefaultTheme`] without touching the
//! builder.

mod default;
pub mod head;

pub use default::DefaultTheme;
pub use head::HeadMeta;

use crate::{
    config::Site,
    content::{Item, Page, Section, Tag},
    html::Document,
};

pub trait Theme: Send + Sync {
    /// Root page. `items` holds every item, newest first.
    fn render_index(&self, site: &Site, items: &[&Item]) -> Document;

    fn render_section(&self, site: &Site, section: &Section) -> Document;

    fn render_item(&self, site: &Site, item: &Item) -> Document;

    fn render_page(&self, site: &Site, page: &Page) -> Document;

    /// `tags` is sorted and free of duplicates.
    fn render_tag_list(&self, site: &Site, tags: &[&Tag]) -> Document;

    /// `items` holds every item tagged with `tag`, newest first.
    fn render_tag_details(&self, site: &Site, tag: &Tag, items: &[&Item]) -> Document;
}
