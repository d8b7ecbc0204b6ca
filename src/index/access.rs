//! Model Access Trait
//!
//! The capability surface the resolver, queries and validator are written
//! against. [`CimIndex`](super::CimIndex) is the production implementation;
//! tests wrap it to observe how it is used.

use super::schema::{CimClass, CimProperty, RdfAttribute};
use crate::dom::NodeId;

/// Stand-in identifier for elements without `rdf:ID`
pub const UNKNOWN_IDENTIFIER: &str = "UNKNOWN";

/// Strip the leading `#` of an RDF reference, if present
///
/// `"#_BV110"` becomes `"_BV110"`; anything else is returned unchanged.
#[inline]
pub fn strip_fragment(reference: &str) -> &str {
    reference.strip_prefix('#').unwrap_or(reference)
}

/// Read-only access to an indexed CIM model
pub trait ModelAccess {
    /// Element carrying `rdf:ID == identifier` (first in document order)
    fn by_identifier(&self, identifier: &str) -> Option<NodeId>;

    /// Elements of a CIM class, in document order
    fn by_type(&self, class: CimClass) -> &[NodeId];

    /// CIM class of an element, if it is one the engine knows
    fn class_of(&self, element: NodeId) -> Option<CimClass>;

    /// Value of an RDF attribute on an element
    fn attribute(&self, element: NodeId, attr: RdfAttribute) -> Option<&str>;

    /// First non-empty text of the first `property` child of `element`
    fn child_text(&self, element: NodeId, property: CimProperty) -> Option<&str>;

    /// Raw `rdf:resource` values of every `property` child, in document order
    fn references(&self, element: NodeId, property: CimProperty) -> Vec<&str>;

    /// Number of `property` children of `element`
    fn property_count(&self, element: NodeId, property: CimProperty) -> usize;

    /// True if any element in the model is a `property` element
    fn declares(&self, property: CimProperty) -> bool;

    /// Distinct local tag names across the whole document, sorted
    fn tag_names(&self) -> Vec<&str>;

    /// Elements whose identifier repeats an earlier one, in document order
    fn shadowed_duplicates(&self) -> &[NodeId] {
        &[]
    }

    /// `rdf:ID` of an element
    fn identifier(&self, element: NodeId) -> Option<&str> {
        self.attribute(element, RdfAttribute::Id)
    }

    /// `rdf:ID` of an element, or [`UNKNOWN_IDENTIFIER`]
    fn identifier_or_unknown(&self, element: NodeId) -> &str {
        self.identifier(element).unwrap_or(UNKNOWN_IDENTIFIER)
    }

    /// Raw `rdf:resource` of the first `property` child
    fn reference(&self, element: NodeId, property: CimProperty) -> Option<&str> {
        self.references(element, property).into_iter().next()
    }

    /// Elements of `class` whose `property` resolves to `target`, in document order
    ///
    /// The provided implementation scans `by_type(class)`; indexes with a
    /// reverse-edge table override it.
    fn referrers(&self, class: CimClass, property: CimProperty, target: NodeId) -> Vec<NodeId> {
        self.by_type(class)
            .iter()
            .copied()
            .filter(|&element| {
                self.references(element, property)
                    .into_iter()
                    .any(|r| self.by_identifier(strip_fragment(r)) == Some(target))
            })
            .collect()
    }
}
