//! Reader Events
//!
//! What the slice reader yields: borrowed slices of the input wherever no
//! entity decoding was needed.

use crate::core::attributes::{split_name, Attribute};
use std::borrow::Cow;

/// XML parsing event
#[derive(Debug, Clone)]
pub enum XmlEvent<'a> {
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement(EndElement<'a>),
    /// Empty element: <name attrs.../>
    EmptyElement(StartElement<'a>),
    /// Text content between tags (entities decoded)
    Text(Cow<'a, [u8]>),
    /// CDATA section content
    CData(&'a [u8]),
    /// Comment content
    Comment(&'a [u8]),
    /// Processing instruction, including the XML declaration: <?target data?>
    ProcessingInstruction {
        target: &'a [u8],
        data: Option<&'a [u8]>,
    },
    /// DOCTYPE declaration (raw)
    DocType(&'a [u8]),
}

impl<'a> XmlEvent<'a> {
    /// Start data of a start or empty element
    pub fn as_start_element(&self) -> Option<&StartElement<'a>> {
        match self {
            XmlEvent::StartElement(e) | XmlEvent::EmptyElement(e) => Some(e),
            _ => None,
        }
    }

    /// Character data of a text or CDATA event
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            XmlEvent::Text(t) => Some(t.as_ref()),
            XmlEvent::CData(t) => Some(t),
            _ => None,
        }
    }
}

/// Start element event data
#[derive(Debug, Clone)]
pub struct StartElement<'a> {
    /// Full element name (may include prefix)
    pub name: &'a [u8],
    /// Element attributes, including namespace declarations
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> StartElement<'a> {
    pub fn new(name: &'a [u8], attributes: Vec<Attribute<'a>>) -> Self {
        StartElement { name, attributes }
    }

    /// Namespace prefix (before colon), if any
    pub fn prefix(&self) -> Option<&'a [u8]> {
        split_name(self.name).0
    }

    /// Local name (after colon)
    pub fn local_name(&self) -> &'a [u8] {
        split_name(self.name).1
    }

    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Get an attribute value by qualified name as string
    pub fn get_attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name_str() == Some(name))
            .and_then(|a| a.value_str())
    }
}

/// End element event data
#[derive(Debug, Clone)]
pub struct EndElement<'a> {
    /// Full element name
    pub name: &'a [u8],
}

impl<'a> EndElement<'a> {
    pub fn new(name: &'a [u8]) -> Self {
        EndElement { name }
    }

    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }
}
