//! Serializing a [`Document`] to bytes with quick-xml.

use super::node::{Document, Element, Node};
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{Cursor, Result, Write};

type HtmlWriter = Writer<Cursor<Vec<u8>>>;

impl Document {
    /// Serialize to UTF-8 HTML. Identical documents give identical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::with_capacity(8 * 1024)));
        writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;

        let mut html = BytesStart::new("html");
        html.push_attribute(("lang", self.lang.as_str()));
        writer.write_event(Event::Start(html))?;

        writer.write_event(Event::Start(BytesStart::new("head")))?;
        for node in &self.head {
            write_node(&mut writer, node)?;
        }
        writer.write_event(Event::End(BytesEnd::new("head")))?;

        write_element(&mut writer, &self.body)?;
        writer.write_event(Event::End(BytesEnd::new("html")))?;

        Ok(writer.into_inner().into_inner())
    }
}

/// Serialize a single node.
#[cfg(test)]
pub fn node_to_string(node: &Node) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_node(&mut writer, node)?;
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_node(writer: &mut HtmlWriter, node: &Node) -> Result<()> {
    match node {
        Node::Element(element) => write_element(writer, element)?,
        Node::Text(value) => writer.write_event(Event::Text(BytesText::new(value)))?,
        // Raw HTML elements (trusted input)
        Node::Raw(value) => writer.get_mut().write_all(value.as_bytes())?,
        Node::Group(nodes) => {
            for node in nodes {
                write_node(writer, node)?;
            }
        }
        Node::Empty => {}
    }
    Ok(())
}

fn write_element(writer: &mut HtmlWriter, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.tag);
    for (name, value) in &element.attrs {
        start.push_attribute((*name, value.as_str()));
    }

    if element.is_void() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag)))?;
    Ok(())
}
