//! Arena Nodes
//!
//! Nodes live in one `Vec` and refer to each other by `NodeId` (u32 index).
//! They are appended in document order, so comparing two `NodeId`s compares
//! their positions in the file; the index relies on this for ordering.

/// Index into the node arena; 0 is the document node
pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    CData,
}

/// One node of the arena; links are arena indices
#[derive(Debug, Clone)]
pub struct XmlNode {
    pub kind: NodeKind,
    /// `None` only for the document node
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// String pool id of the qualified name (elements) or the content (text nodes)
    pub name_id: u32,
    /// String pool id of the local name, or 0
    pub local_id: u32,
    /// String pool id of the namespace prefix, or 0
    pub prefix_id: u32,
    /// String pool id of the resolved namespace URI, or 0
    pub namespace_id: u32,
    /// Attributes are `attributes[attr_start..attr_start + attr_count]`
    pub attr_start: u32,
    pub attr_count: u32,
    /// Document node is 0, root element 1
    pub depth: u32,
}

impl XmlNode {
    fn new(kind: NodeKind, parent: Option<NodeId>, depth: u32) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            name_id: 0,
            local_id: 0,
            prefix_id: 0,
            namespace_id: 0,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document, None, 0)
    }

    pub fn element(name_id: u32, local_id: u32, parent: NodeId, depth: u32) -> Self {
        XmlNode {
            name_id,
            local_id,
            ..Self::new(NodeKind::Element, Some(parent), depth)
        }
    }

    /// Text or CDATA node; the content id goes into `name_id`
    pub fn text(kind: NodeKind, content_id: u32, parent: NodeId, depth: u32) -> Self {
        debug_assert!(matches!(kind, NodeKind::Text | NodeKind::CData));
        XmlNode {
            name_id: content_id,
            ..Self::new(kind, Some(parent), depth)
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::CData)
    }
}

/// Attribute in the attribute arena, all fields string-pool ids
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    pub name_id: u32,
    pub local_id: u32,
    /// 0 for unprefixed attributes
    pub namespace_id: u32,
    pub value_id: u32,
}
