//! Markup layer of the parser: raw XML text → generic element tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::ParseError;

/// A generic XML element with its attributes in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated text and CDATA content (trimmed by the reader)
    pub text: String,
}

impl Element {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Read a whole document into an element tree.
///
/// Nesting is tracked on an explicit stack, so deeply nested groups do not
/// recurse here.
pub(crate) fn read_tree(text: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|source| ParseError::Xml {
            position: reader.buffer_position(),
            source,
        })?;

        match event {
            Event::Start(start) => {
                let element = open_element(&start).map_err(|source| ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start).map_err(|source| ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // The reader verifies end tag names, so a pop always matches
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(content) => {
                let content = content.unescape().map_err(|source| ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&content);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::UnexpectedEof(open.name.clone()));
    }

    root.ok_or(ParseError::EmptyDocument)
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, quick_xml::Error> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(ParseError::UnexpectedRoot(element.name));
    } else {
        *root = Some(element);
    }
    Ok(())
}
