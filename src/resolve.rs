//! Reference Resolver
//!
//! Follows `rdf:resource` references through the index. Resolution is pure:
//! an absent property and a dangling target both come back as `None`, which
//! callers treat as "absent" rather than as an error.

use crate::dom::NodeId;
use crate::index::{strip_fragment, CimClass, CimProperty, ModelAccess};

/// Resolves references of one model
pub struct Resolver<'m, M: ModelAccess + ?Sized> {
    model: &'m M,
}

impl<'m, M: ModelAccess + ?Sized> Resolver<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Resolver { model }
    }

    /// The model this resolver reads
    pub fn model(&self) -> &'m M {
        self.model
    }

    /// Resolve the first `property` reference of `element`
    #[inline]
    pub fn resolve(&self, element: NodeId, property: CimProperty) -> Option<NodeId> {
        let reference = self.model.reference(element, property)?;
        self.model.by_identifier(strip_fragment(reference))
    }

    /// Resolve a chain of references, stopping at the first unresolved hop
    pub fn resolve_chain(&self, element: NodeId, chain: &[CimProperty]) -> Option<NodeId> {
        chain
            .iter()
            .try_fold(element, |current, &property| self.resolve(current, property))
    }

    /// Resolve every `property` reference of `element`, skipping dangling ones
    pub fn resolve_all(&self, element: NodeId, property: CimProperty) -> Vec<NodeId> {
        self.model
            .references(element, property)
            .into_iter()
            .filter_map(|reference| self.model.by_identifier(strip_fragment(reference)))
            .collect()
    }

    /// Elements of `class` whose `property` resolves to `target`, in document order
    pub fn referrers(&self, class: CimClass, property: CimProperty, target: NodeId) -> Vec<NodeId> {
        self.model.referrers(class, property, target)
    }
}
