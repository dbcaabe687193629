//! Minimal owned element tree over `quick-xml` events.
//!
//! IBFS responses are small attribute-heavy documents, so instead of wiring
//! serde into every wire shape we build one generic tree per response and
//! navigate it with querySelector-style helpers. Extraction code treats
//! "element not found" as "empty result"; only malformed markup is an error.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ClientError;

/// One parsed XML element: name, attributes in document order, and child
/// elements. Text nodes are not captured; every value in the IBFS contract
/// rides on an attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the named attribute, or `""`, the wire contract's default
    /// for every optional attribute.
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or("")
    }

    /// First direct child with this element name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children with this element name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First element with this name in document order, the receiver itself
    /// included (`querySelector` semantics on a rooted tree).
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        for child in &self.children {
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }
}

/// Parse a complete document into its root element.
pub fn parse(text: &str) -> Result<Element, ClientError> {
    let mut reader = Reader::from_str(text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        match event {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml verifies the end-tag name; the stack can only be
                // empty here on a stray closing tag.
                let element = stack
                    .pop()
                    .ok_or_else(|| ClientError::Parse("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            // Text nodes, declarations, comments and processing instructions
            // carry nothing the IBFS contract reads.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ClientError::Parse(
            "unclosed element at end of document".to_string(),
        ));
    }
    root.ok_or_else(|| ClientError::Parse("document has no root element".to_string()))
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ClientError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(ClientError::Parse(
            "document has more than one root element".to_string(),
        )),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, ClientError> {
    let mut element = Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Element::default()
    };
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ClientError::Parse(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| ClientError::Parse(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}
