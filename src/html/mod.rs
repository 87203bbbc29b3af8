//! Typed HTML document builder.

mod node;
mod render;

pub use node::{Document, Element, Node, el, group, link, meta_name, meta_property, raw, text};
#[cfg(test)]
pub use render::node_to_string;
