//! Immutable HTML node tree.
//!
//! Themes describe pages with small constructor functions instead of
//! string templates:
//!
//! ```ignore
//! el("a").attr("href", "/posts").child(text("Posts"))
//! ```
//!
//! Text and attribute values are escaped on serialization. [`raw`] is the
//! only way to inject markup and is reserved for trusted input such as
//! pre-rendered item bodies.

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Escaped text
    Text(String),
    /// Trusted markup written verbatim
    Raw(String),
    /// Several nodes without a wrapper element
    Group(Vec<Node>),
    /// Renders nothing
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(super) tag: &'static str,
    pub(super) attrs: Vec<(&'static str, String)>,
    pub(super) children: Vec<Node>,
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Add the attribute only when `value` is present.
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(node: Option<T>) -> Self {
        node.map_or(Self::Empty, Into::into)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Group(nodes)
    }
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

pub fn raw(value: impl Into<String>) -> Node {
    Node::Raw(value.into())
}

pub fn group<I>(nodes: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Node::Group(nodes.into_iter().map(Into::into).collect())
}

/// `<a href="...">label</a>`
pub fn link(href: impl Into<String>, label: impl Into<String>) -> Element {
    el("a").attr("href", href).child(text(label))
}

/// `<meta name="..." content="...">`
pub fn meta_name(name: &str, content: impl Into<String>) -> Element {
    el("meta").attr("name", name.to_owned()).attr("content", content)
}

/// `<meta property="..." content="...">`
pub fn meta_property(property: &str, content: impl Into<String>) -> Element {
    el("meta")
        .attr("property", property.to_owned())
        .attr("content", content)
}

/// A complete page: `<!DOCTYPE html><html lang>head body</html>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(super) lang: String,
    pub(super) head: Vec<Node>,
    pub(super) body: Element,
}

impl Document {
    pub fn new(lang: impl Into<String>, head: Vec<Node>, body: Element) -> Self {
        Self {
            lang: lang.into(),
            head,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_children() {
        let list = el("ul")
            .class("item-list")
            .children(["a", "b"].map(|s| el("li").child(text(s))));

        assert_eq!(list.tag, "ul");
        assert_eq!(list.attrs, [("class", "item-list".to_owned())]);
        assert_eq!(list.children.len(), 2);
    }

    #[test]
    fn test_option_into_node() {
        let none: Option<Element> = None;
        assert_eq!(Node::from(none), Node::Empty);
        assert!(matches!(Node::from(Some(el("p"))), Node::Element(_)));
    }

    #[test]
    fn test_attr_opt() {
        let img = el("img").attr_opt("src", Some("a.png")).attr_opt("alt", None::<String>);
        assert_eq!(img.attrs, [("src", "a.png".to_owned())]);
    }

    #[test]
    fn test_void_elements() {
        assert!(el("meta").is_void());
        assert!(el("img").is_void());
        assert!(!el("div").is_void());
        assert!(!el("script").is_void());
    }
}
