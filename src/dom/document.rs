//! XML Document - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes, appended in document order
//! - NodeId indices for traversal
//! - String interning for names, attribute values and text
//! - Namespace URIs resolved once, at build time
//!
//! The document owns everything it needs, so it can outlive the input
//! buffer and be shared across threads.

use super::namespace::NamespaceResolver;
use super::node::{NodeId, NodeKind, XmlAttribute, XmlNode};
use super::strings::StringPool;
use crate::core::scanner::is_whitespace;
use crate::reader::events::{StartElement, XmlEvent};
use crate::reader::slice::{ParseError, SliceReader};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An XML document stored in arena format
#[derive(Debug)]
pub struct XmlDocument {
    /// Arena of nodes
    nodes: Vec<XmlNode>,
    /// Arena of attributes
    attributes: Vec<XmlAttribute>,
    /// Interned strings
    pub strings: StringPool,
    /// Root element node ID (not document node)
    root_element: Option<NodeId>,
}

/// An open element on the build stack
struct OpenElement<'a> {
    id: NodeId,
    name: &'a [u8],
}

impl XmlDocument {
    /// Parse XML from bytes (lenient mode, recovers from malformed markup)
    pub fn parse(input: &[u8]) -> Self {
        Self::parse_with_bindings(input, &[])
    }

    /// Parse leniently with extra `(prefix, uri)` bindings in scope
    ///
    /// Declarations inside the document shadow the seeded bindings.
    pub fn parse_with_bindings(input: &[u8], bindings: &[(&str, &str)]) -> Self {
        // Lenient builds do not fail
        Self::build(input, false, bindings).unwrap_or_else(|_| Self::empty())
    }

    /// Parse XML in strict mode (returns the first well-formedness error)
    pub fn parse_strict(input: &[u8]) -> Result<Self, ParseError> {
        Self::build(input, true, &[])
    }

    /// Parse strictly with extra `(prefix, uri)` bindings in scope
    pub fn parse_strict_with_bindings(
        input: &[u8],
        bindings: &[(&str, &str)],
    ) -> Result<Self, ParseError> {
        Self::build(input, true, bindings)
    }

    fn empty() -> Self {
        XmlDocument {
            nodes: vec![XmlNode::document()],
            attributes: Vec::new(),
            strings: StringPool::new(),
            root_element: None,
        }
    }

    fn build(input: &[u8], strict: bool, bindings: &[(&str, &str)]) -> Result<Self, ParseError> {
        let offset = if input.starts_with(UTF8_BOM) { UTF8_BOM.len() } else { 0 };
        let input = &input[offset..];

        let mut doc = XmlDocument {
            nodes: Vec::with_capacity(input.len() / 48 + 16),
            attributes: Vec::with_capacity(input.len() / 96 + 16),
            strings: StringPool::new(),
            root_element: None,
        };
        doc.nodes.push(XmlNode::document());

        let mut resolver = NamespaceResolver::new(&mut doc.strings);
        for (prefix, uri) in bindings {
            let prefix_id = doc.strings.intern(prefix.as_bytes());
            let uri_id = doc.strings.intern(uri.as_bytes());
            resolver.predeclare(prefix_id, uri_id);
        }

        let mut reader = if strict {
            SliceReader::new_strict(input)
        } else {
            SliceReader::new(input)
        };
        let mut stack: Vec<OpenElement<'_>> = Vec::new();

        while let Some(event) = reader.next_event() {
            let parent = stack.last().map_or(0, |open| open.id);
            let depth = stack.len() as u32 + 1;

            match event {
                XmlEvent::StartElement(elem) => {
                    if stack.is_empty() && doc.root_element.is_some() && strict {
                        return Err(doc.error("Multiple root elements", &reader, offset));
                    }
                    let id = doc.add_element(&elem, &mut resolver, parent, depth);
                    stack.push(OpenElement { id, name: elem.name });
                }
                XmlEvent::EmptyElement(elem) => {
                    if stack.is_empty() && doc.root_element.is_some() && strict {
                        return Err(doc.error("Multiple root elements", &reader, offset));
                    }
                    doc.add_element(&elem, &mut resolver, parent, depth);
                    resolver.pop_scope();
                }
                XmlEvent::EndElement(end) => match stack.last().map(|open| open.name) {
                    Some(open) if open == end.name => {
                        stack.pop();
                        resolver.pop_scope();
                    }
                    Some(open) if strict => {
                        let message = format!(
                            "Tag mismatch: <{}> closed by </{}>",
                            String::from_utf8_lossy(open),
                            String::from_utf8_lossy(end.name)
                        );
                        return Err(doc.error(message, &reader, offset));
                    }
                    None if strict => {
                        return Err(doc.error("Unexpected end tag", &reader, offset));
                    }
                    _ => {
                        // Close up to the nearest matching open element, or drop the tag
                        match stack.iter().rposition(|open| open.name == end.name) {
                            Some(pos) => {
                                warn!(
                                    unclosed = stack.len() - pos - 1,
                                    "recovering from mismatched end tag"
                                );
                                for _ in pos..stack.len() {
                                    resolver.pop_scope();
                                }
                                stack.truncate(pos);
                            }
                            None => debug!("ignoring end tag without matching start tag"),
                        }
                    }
                },
                XmlEvent::Text(content) => {
                    if stack.is_empty() {
                        if strict && !content.iter().all(|&b| is_whitespace(b)) {
                            return Err(doc.error("Text outside root element", &reader, offset));
                        }
                        continue;
                    }
                    doc.add_text(NodeKind::Text, &content, parent, depth);
                }
                XmlEvent::CData(content) => {
                    if !stack.is_empty() {
                        doc.add_text(NodeKind::CData, content, parent, depth);
                    }
                }
                XmlEvent::Comment(_)
                | XmlEvent::ProcessingInstruction { .. }
                | XmlEvent::DocType(_) => {}
            }
        }

        if let Some(err) = reader.error() {
            return Err(ParseError::new(err.message.clone(), err.position + offset));
        }

        if strict {
            if let Some(open) = stack.last() {
                let message = format!("Unclosed tag <{}>", String::from_utf8_lossy(open.name));
                return Err(ParseError::new(message, input.len() + offset));
            }
            if doc.root_element.is_none() {
                return Err(ParseError::new("Document has no root element", input.len() + offset));
            }
        } else if !stack.is_empty() {
            warn!(unclosed = stack.len(), "closing unterminated elements at end of input");
        }

        Ok(doc)
    }

    fn error(&self, message: impl Into<String>, reader: &SliceReader<'_>, offset: usize) -> ParseError {
        ParseError::new(message, reader.position() + offset)
    }

    fn add_element(
        &mut self,
        elem: &StartElement<'_>,
        resolver: &mut NamespaceResolver,
        parent: NodeId,
        depth: u32,
    ) -> NodeId {
        resolver.push_scope();

        // Declarations on this element apply to its own name and attributes
        for attr in elem.attributes.iter().filter(|a| a.is_namespace_declaration()) {
            let uri_id = self.strings.intern(&attr.value);
            match attr.prefix() {
                Some(_) => {
                    let prefix_id = self.strings.intern(attr.local_name());
                    resolver.declare(prefix_id, uri_id);
                }
                None => resolver.declare_default(uri_id),
            }
        }

        let name_id = self.strings.intern(elem.name);
        let local_id = self.strings.intern(elem.local_name());
        let mut node = XmlNode::element(name_id, local_id, parent, depth);

        match elem.prefix() {
            Some(prefix) => {
                node.prefix_id = self.strings.intern(prefix);
                node.namespace_id = resolver.resolve(node.prefix_id).unwrap_or(0);
            }
            None => node.namespace_id = resolver.resolve_default().unwrap_or(0),
        }

        node.attr_start = self.attributes.len() as u32;
        for attr in &elem.attributes {
            let namespace_id = match attr.prefix() {
                Some(prefix) => {
                    let prefix_id = self.strings.intern(prefix);
                    resolver.resolve(prefix_id).unwrap_or(0)
                }
                // Unprefixed attributes are in no namespace
                None => 0,
            };
            self.attributes.push(XmlAttribute {
                name_id: self.strings.intern(&attr.name),
                local_id: self.strings.intern(attr.local_name()),
                namespace_id,
                value_id: self.strings.intern(&attr.value),
            });
        }
        node.attr_count = self.attributes.len() as u32 - node.attr_start;

        let id = self.push_node(node, parent);
        if parent == 0 && self.root_element.is_none() {
            self.root_element = Some(id);
        }
        id
    }

    fn add_text(&mut self, kind: NodeKind, content: &[u8], parent: NodeId, depth: u32) {
        let content_id = self.strings.intern(content);
        self.push_node(XmlNode::text(kind, content_id, parent, depth), parent);
    }

    fn push_node(&mut self, node: XmlNode, parent: NodeId) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);

        let prev = self.nodes[parent as usize].last_child;
        if let Some(prev) = prev {
            self.nodes[prev as usize].next_sibling = Some(id);
        }
        let parent_node = &mut self.nodes[parent as usize];
        if parent_node.first_child.is_none() {
            parent_node.first_child = Some(id);
        }
        parent_node.last_child = Some(id);
        id
    }

    // ========================================================================
    // Node access
    // ========================================================================

    /// Get root element ID
    #[inline]
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by ID
    #[inline]
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Number of nodes in the arena, including the document node
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get node qualified name as string
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id).filter(|n| n.is_element())?;
        self.strings.get_str(node.name_id)
    }

    /// Get node local name (without prefix)
    pub fn node_local_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id).filter(|n| n.is_element())?;
        self.strings.get_str(node.local_id)
    }

    /// Get the resolved namespace URI of an element, if it has one
    pub fn node_namespace(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id).filter(|n| n.is_element() && n.namespace_id != 0)?;
        self.strings.get_str(node.namespace_id)
    }

    /// Get text content of a text or CDATA node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id).filter(|n| n.is_text())?;
        self.strings.get_str(node.name_id)
    }

    /// Get attributes for an element
    pub fn attributes(&self, id: NodeId) -> &[XmlAttribute] {
        match self.get_node(id) {
            Some(node) if node.is_element() => {
                let start = node.attr_start as usize;
                let end = start + node.attr_count as usize;
                self.attributes.get(start..end).unwrap_or(&[])
            }
            _ => &[],
        }
    }

    /// Get attribute value by qualified name
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        let name_id = self.strings.find(name)?;
        self.attributes(node_id)
            .iter()
            .find(|a| a.name_id == name_id)
            .and_then(|a| self.strings.get_str(a.value_id))
    }

    /// Get attribute value by interned namespace URI and local name ids
    pub fn get_attribute_ns(&self, node_id: NodeId, namespace_id: u32, local_id: u32) -> Option<&str> {
        self.attributes(node_id)
            .iter()
            .find(|a| a.namespace_id == namespace_id && a.local_id == local_id)
            .and_then(|a| self.strings.get_str(a.value_id))
    }

    /// Iterate over child nodes
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        ChildIter {
            doc: self,
            next: self.get_node(id).and_then(|n| n.first_child),
        }
    }

    /// Iterate over child element nodes
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |&child| self.nodes[child as usize].is_element())
    }

    /// Iterate over descendant nodes in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let depth = self.get_node(id).map_or(u32::MAX, |n| n.depth);
        DescendantIter {
            doc: self,
            next: id + 1,
            depth,
        }
    }

    /// Iterate over every element in document order
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(0)
            .filter(move |&id| self.nodes[id as usize].is_element())
    }

    /// First text or CDATA child of an element with non-whitespace content
    pub fn first_text(&self, id: NodeId) -> Option<&str> {
        self.children(id)
            .filter_map(|child| self.text_content(child))
            .find(|text| !text.trim().is_empty())
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d XmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (document order)
///
/// Descendants of a node occupy the contiguous arena range that follows it,
/// up to the first node that is not deeper.
pub struct DescendantIter<'d> {
    doc: &'d XmlDocument,
    next: NodeId,
    depth: u32,
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.doc.get_node(self.next)?;
        if node.depth <= self.depth {
            return None;
        }
        let current = self.next;
        self.next += 1;
        Some(current)
    }
}
