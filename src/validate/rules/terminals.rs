//! Validation rule for terminals.

use crate::index::{CimClass, CimProperty, ModelAccess};
use crate::validate::issue::Issue;

pub(crate) const NO_TOPOLOGICAL_NODE: &str = "Terminal without TopologicalNode";

/// Flags every `Terminal` without a `Terminal.TopologicalNode` reference.
///
/// EQ-only models carry no topology, so every terminal of such a model is
/// reported.
pub(crate) fn check<M: ModelAccess + ?Sized>(model: &M) -> Vec<Issue> {
    model
        .by_type(CimClass::Terminal)
        .iter()
        .copied()
        .filter(|&terminal| {
            model
                .reference(terminal, CimProperty::TerminalTopologicalNode)
                .is_none()
        })
        .map(|terminal| Issue::logical(NO_TOPOLOGICAL_NODE, model.identifier_or_unknown(terminal)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::index_of;

    #[test]
    fn test_terminals() {
        let index = index_of(
            r##"<cim:Terminal rdf:ID="A"><cim:Terminal.TopologicalNode rdf:resource="#TN"/></cim:Terminal>
               <cim:Terminal rdf:ID="B"/>
               <cim:Terminal><cim:Terminal.TopologicalNode/></cim:Terminal>"##,
        );
        assert_eq!(
            check(&index),
            vec![
                Issue::logical(NO_TOPOLOGICAL_NODE, "B"),
                Issue::logical(NO_TOPOLOGICAL_NODE, "UNKNOWN"),
            ]
        );
    }
}
