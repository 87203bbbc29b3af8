//! The content tree: model, locations, validation and loading.

pub mod loader;
pub mod location;
pub mod model;
mod validate;

pub use location::{Index, Location, TagDetails, TagList};
pub use model::{ContentModel, Item, Page, Section, SectionId, Tag, Video};
pub use validate::ValidationErrors;
