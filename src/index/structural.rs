//! Structural Index - identifiers, types and reference edges
//!
//! Built in one walk over the arena document:
//! - `rdf:ID` -> element (first in document order wins; later ones recorded)
//! - `(namespace, local name)` -> elements, in document order
//! - reverse reference edges: target element -> (owning element, property)
//!
//! All keys are string-pool ids, so lookups never allocate.

use super::access::{strip_fragment, ModelAccess};
use super::schema::{CimClass, CimProperty, RdfAttribute};
use crate::config::NamespaceBindings;
use crate::dom::{NodeId, XmlDocument};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};

/// (namespace URI id, local name id)
type TypeKey = (u32, u32);

/// One `rdf:resource` edge seen from its target
#[derive(Debug, Clone, Copy)]
struct Edge {
    /// Element owning the property element
    source: NodeId,
    /// Local name id of the property element
    property: u32,
}

/// Index over a parsed CIM document
///
/// Owns the document for the session; everything handed out borrows from it.
#[derive(Debug)]
pub struct CimIndex {
    doc: XmlDocument,
    cim_ns: Option<u32>,
    rdf_ns: Option<u32>,
    rdf_locals: [Option<u32>; 3],
    class_keys: [Option<TypeKey>; 14],
    property_ids: [Option<u32>; CimProperty::COUNT],
    ids: HashMap<u32, NodeId>,
    duplicates: Vec<NodeId>,
    by_type: HashMap<TypeKey, Vec<NodeId>>,
    incoming: HashMap<NodeId, Vec<Edge>>,
    reference_count: usize,
    dangling_count: usize,
}

impl CimIndex {
    /// Index a parsed document under the given namespace bindings
    pub fn build(doc: XmlDocument, bindings: &NamespaceBindings) -> Self {
        let strings = &doc.strings;
        let cim_ns = strings.find(&bindings.cim.uri).filter(|&id| id != 0);
        let rdf_ns = strings.find(&bindings.rdf.uri).filter(|&id| id != 0);
        let rdf_locals = RdfAttribute::ALL.map(|attr| strings.find(attr.local_name()));
        let class_keys = CimClass::ALL.map(|class| cim_ns.zip(strings.find(class.local_name())));
        let property_ids = CimProperty::ALL.map(|property| strings.find(property.local_name()));

        if cim_ns.is_none() && doc.root_element_id().is_some() {
            warn!(uri = %bindings.cim.uri, "CIM namespace does not occur in the document");
        }

        let rdf_key = |attr: RdfAttribute| rdf_ns.zip(rdf_locals[attr.index()]);
        let id_key = rdf_key(RdfAttribute::Id);
        let resource_key = rdf_key(RdfAttribute::Resource);

        let mut ids: HashMap<u32, NodeId> = HashMap::new();
        let mut duplicates = Vec::new();
        let mut by_type: HashMap<TypeKey, Vec<NodeId>> = HashMap::new();
        // (property element, interned target identifier if any)
        let mut pending: Vec<(NodeId, Option<u32>)> = Vec::new();
        let mut element_count = 0usize;

        for id in doc.elements() {
            let Some(node) = doc.get_node(id) else { continue };
            element_count += 1;
            by_type
                .entry((node.namespace_id, node.local_id))
                .or_default()
                .push(id);

            for attr in doc.attributes(id) {
                let key = Some((attr.namespace_id, attr.local_id));
                if key == id_key && attr.value_id != 0 {
                    match ids.entry(attr.value_id) {
                        Entry::Vacant(slot) => {
                            slot.insert(id);
                        }
                        Entry::Occupied(_) => duplicates.push(id),
                    }
                } else if key == resource_key && Some(node.namespace_id) == cim_ns {
                    let target = strings
                        .get_str(attr.value_id)
                        .and_then(|value| strings.find(strip_fragment(value)));
                    pending.push((id, target));
                }
            }
        }

        let mut incoming: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        let mut dangling_count = 0usize;
        for &(property_element, target) in &pending {
            let Some(&target) = target.and_then(|t| ids.get(&t)) else {
                dangling_count += 1;
                continue;
            };
            let Some(node) = doc.get_node(property_element) else { continue };
            let owner = node.parent.filter(|&p| doc.get_node(p).is_some_and(|n| n.is_element()));
            let Some(source) = owner else { continue };
            incoming.entry(target).or_default().push(Edge {
                source,
                property: node.local_id,
            });
        }

        info!(
            elements = element_count,
            identifiers = ids.len(),
            duplicates = duplicates.len(),
            references = pending.len(),
            dangling = dangling_count,
            "indexed CIM model"
        );
        if dangling_count > 0 && dangling_count * 2 > pending.len() {
            warn!(
                dangling = dangling_count,
                references = pending.len(),
                "most references do not resolve; the model may be missing a profile"
            );
        }

        CimIndex {
            doc,
            cim_ns,
            rdf_ns,
            rdf_locals,
            class_keys,
            property_ids,
            ids,
            duplicates,
            by_type,
            incoming,
            reference_count: pending.len(),
            dangling_count,
        }
    }

    /// The indexed document
    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    /// Number of distinct identifiers
    pub fn identifier_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of CIM `rdf:resource` references and how many of them dangle
    pub fn reference_stats(&self) -> (usize, usize) {
        (self.reference_count, self.dangling_count)
    }

    #[inline]
    fn type_key(&self, element: NodeId) -> Option<TypeKey> {
        self.doc
            .get_node(element)
            .filter(|n| n.is_element())
            .map(|n| (n.namespace_id, n.local_id))
    }

    /// Child elements of `element` that are `property` elements
    fn property_children(
        &self,
        element: NodeId,
        property: CimProperty,
    ) -> impl Iterator<Item = NodeId> + '_ {
        let key = self.cim_ns.zip(self.property_ids[property.index()]);
        self.doc
            .element_children(element)
            .filter(move |&child| key.is_some() && self.type_key(child) == key)
    }

    fn rdf_attribute(&self, element: NodeId, attr: RdfAttribute) -> Option<&str> {
        let ns = self.rdf_ns?;
        let local = self.rdf_locals[attr.index()]?;
        self.doc.get_attribute_ns(element, ns, local)
    }
}

impl ModelAccess for CimIndex {
    fn by_identifier(&self, identifier: &str) -> Option<NodeId> {
        let id = self.doc.strings.find(identifier).filter(|&id| id != 0)?;
        self.ids.get(&id).copied()
    }

    fn by_type(&self, class: CimClass) -> &[NodeId] {
        self.class_keys[class.index()]
            .and_then(|key| self.by_type.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn class_of(&self, element: NodeId) -> Option<CimClass> {
        let key = self.type_key(element)?;
        CimClass::ALL
            .into_iter()
            .find(|class| self.class_keys[class.index()] == Some(key))
    }

    fn attribute(&self, element: NodeId, attr: RdfAttribute) -> Option<&str> {
        self.rdf_attribute(element, attr)
    }

    fn child_text(&self, element: NodeId, property: CimProperty) -> Option<&str> {
        let child = self.property_children(element, property).next()?;
        self.doc.first_text(child)
    }

    fn references(&self, element: NodeId, property: CimProperty) -> Vec<&str> {
        self.property_children(element, property)
            .filter_map(|child| self.rdf_attribute(child, RdfAttribute::Resource))
            .collect()
    }

    fn reference(&self, element: NodeId, property: CimProperty) -> Option<&str> {
        self.property_children(element, property)
            .find_map(|child| self.rdf_attribute(child, RdfAttribute::Resource))
    }

    fn property_count(&self, element: NodeId, property: CimProperty) -> usize {
        self.property_children(element, property).count()
    }

    fn declares(&self, property: CimProperty) -> bool {
        self.cim_ns
            .zip(self.property_ids[property.index()])
            .and_then(|key| self.by_type.get(&key))
            .is_some_and(|elements| !elements.is_empty())
    }

    fn tag_names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .by_type
            .keys()
            .filter_map(|&(_, local)| self.doc.strings.get_str(local))
            .collect();
        names.into_iter().collect()
    }

    fn shadowed_duplicates(&self) -> &[NodeId] {
        &self.duplicates
    }

    fn referrers(&self, class: CimClass, property: CimProperty, target: NodeId) -> Vec<NodeId> {
        let (Some(class_key), Some(property_id)) =
            (self.class_keys[class.index()], self.property_ids[property.index()])
        else {
            return Vec::new();
        };

        let mut sources: Vec<NodeId> = self
            .incoming
            .get(&target)
            .into_iter()
            .flatten()
            .filter(|edge| edge.property == property_id && self.type_key(edge.source) == Some(class_key))
            .map(|edge| edge.source)
            .collect();
        sources.sort_unstable();
        sources.dedup();
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_index, index_of};

    /// Forwards the required methods only, so `referrers` takes the scanning path
    struct Scanning<'a>(&'a CimIndex);

    impl ModelAccess for Scanning<'_> {
        fn by_identifier(&self, identifier: &str) -> Option<NodeId> {
            self.0.by_identifier(identifier)
        }
        fn by_type(&self, class: CimClass) -> &[NodeId] {
            self.0.by_type(class)
        }
        fn class_of(&self, element: NodeId) -> Option<CimClass> {
            self.0.class_of(element)
        }
        fn attribute(&self, element: NodeId, attr: RdfAttribute) -> Option<&str> {
            self.0.attribute(element, attr)
        }
        fn child_text(&self, element: NodeId, property: CimProperty) -> Option<&str> {
            self.0.child_text(element, property)
        }
        fn references(&self, element: NodeId, property: CimProperty) -> Vec<&str> {
            self.0.references(element, property)
        }
        fn property_count(&self, element: NodeId, property: CimProperty) -> usize {
            self.0.property_count(element, property)
        }
        fn declares(&self, property: CimProperty) -> bool {
            self.0.declares(property)
        }
        fn tag_names(&self) -> Vec<&str> {
            self.0.tag_names()
        }
    }

    #[test]
    fn test_lookup_round_trips_every_identifier() {
        let index = fixture_index();
        let doc = index.document();
        for element in doc.elements() {
            if let Some(id) = index.identifier(element) {
                let found = index.by_identifier(id).unwrap();
                assert_eq!(index.identifier(found), Some(id));
            }
        }
        assert!(index.identifier_count() > 10);
        assert_eq!(index.by_identifier("does-not-exist"), None);
        assert_eq!(index.by_identifier(""), None);
    }

    #[test]
    fn test_by_type_in_document_order() {
        let index = fixture_index();
        let ids: Vec<_> = index
            .by_type(CimClass::PowerTransformerEnd)
            .iter()
            .filter_map(|&e| index.identifier(e))
            .collect();
        assert_eq!(ids, vec!["TE2", "TE1", "TE3"]);
        assert_eq!(index.class_of(index.by_identifier("TE2").unwrap()), Some(CimClass::PowerTransformerEnd));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let index = index_of(
            r#"<cim:ACLineSegment rdf:ID="L1"><cim:IdentifiedObject.name>first</cim:IdentifiedObject.name></cim:ACLineSegment>
               <cim:ACLineSegment rdf:ID="L1"><cim:IdentifiedObject.name>second</cim:IdentifiedObject.name></cim:ACLineSegment>"#,
        );
        let line = index.by_identifier("L1").unwrap();
        assert_eq!(index.child_text(line, CimProperty::IdentifiedObjectName), Some("first"));
        assert_eq!(index.shadowed_duplicates().len(), 1);
        assert_eq!(index.by_type(CimClass::ACLineSegment).len(), 2);
    }

    #[test]
    fn test_child_text_and_references() {
        let index = fixture_index();
        let sm1 = index.by_identifier("SM1").unwrap();
        assert_eq!(index.child_text(sm1, CimProperty::IdentifiedObjectName), Some("G1"));
        assert_eq!(index.reference(sm1, CimProperty::RegulatingCondEqRegulatingControl), Some("#RC1"));
        assert_eq!(index.child_text(sm1, CimProperty::GeneratingUnitMaxOperatingP), None);

        let ols1 = index.by_identifier("OLS1").unwrap();
        assert_eq!(
            index.references(ols1, CimProperty::OperationalLimitSetOperationalLimit),
            vec!["#OL1", "#OL2", "#OL_missing"]
        );
        assert_eq!(index.property_count(ols1, CimProperty::OperationalLimitSetOperationalLimit), 3);
    }

    #[test]
    fn test_declares() {
        let index = fixture_index();
        assert!(index.declares(CimProperty::SynchronousMachineReferencePriority));
        assert!(!index.declares(CimProperty::VoltageLimitValue));
    }

    #[test]
    fn test_referrers_match_scanning_path() {
        let index = fixture_index();
        let scanning = Scanning(&index);
        let cases = [
            ("T1", CimClass::PowerTransformerEnd, CimProperty::PowerTransformerEndPowerTransformer),
            ("T2", CimClass::PowerTransformerEnd, CimProperty::PowerTransformerEndPowerTransformer),
            ("L1", CimClass::Terminal, CimProperty::TerminalConductingEquipment),
            ("L2", CimClass::Terminal, CimProperty::TerminalConductingEquipment),
            ("TL1a", CimClass::OperationalLimitSet, CimProperty::OperationalLimitSetTerminal),
        ];
        for (target, class, property) in cases {
            let target = index.by_identifier(target).unwrap();
            assert_eq!(
                index.referrers(class, property, target),
                scanning.referrers(class, property, target),
                "{class} {property}"
            );
        }

        let t1 = index.by_identifier("T1").unwrap();
        let ends: Vec<_> = index
            .referrers(CimClass::PowerTransformerEnd, CimProperty::PowerTransformerEndPowerTransformer, t1)
            .into_iter()
            .filter_map(|e| index.identifier(e))
            .collect();
        assert_eq!(ends, vec!["TE2", "TE1"]);
    }

    #[test]
    fn test_reference_stats() {
        let index = index_of(
            r##"<cim:ACLineSegment rdf:ID="L"/>
                <cim:Terminal rdf:ID="T">
                  <cim:Terminal.ConductingEquipment rdf:resource="#L"/>
                  <cim:Terminal.TopologicalNode rdf:resource="#TN"/>
                </cim:Terminal>"##,
        );
        assert_eq!(index.reference_stats(), (2, 1));

        let (references, dangling) = fixture_index().reference_stats();
        assert!(references > dangling);
    }

    #[test]
    fn test_tag_names_sorted_and_distinct() {
        let index = fixture_index();
        let names = index.tag_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(names.contains(&"RDF"));
        assert!(names.contains(&"Terminal.TopologicalNode"));
    }

    #[test]
    fn test_other_cim_namespace_does_not_match() {
        let doc = XmlDocument::parse(
            br#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                        xmlns:cim="http://iec.ch/TC57/2013/CIM-schema-cim16#">
                  <cim:ACLineSegment rdf:ID="L1"/>
                </rdf:RDF>"#,
        );
        let index = CimIndex::build(doc, &NamespaceBindings::default());
        assert!(index.by_type(CimClass::ACLineSegment).is_empty());
        // Identifiers do not depend on the CIM namespace
        assert!(index.by_identifier("L1").is_some());
    }
}
