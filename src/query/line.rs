//! Line operational limits
//!
//! Line -> `Terminal` -> `OperationalLimitSet` -> listed limits ->
//! `OperationalLimitType`. A listed limit that does not resolve to a limit
//! element produces no row; a limit whose type does not resolve keeps its
//! value and reports no kind.

use super::parse_number;
use crate::dom::NodeId;
use crate::error::Result;
use crate::index::{strip_fragment, CimClass, CimProperty, ModelAccess};
use crate::resolve::Resolver;
use serde::Serialize;
use tracing::debug;

/// One operational limit on a line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitRow {
    #[serde(rename = "LimitKind")]
    pub kind: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

/// Operational limits attached to the terminals of line `line_id`
pub fn line_limits<M: ModelAccess + ?Sized>(model: &M, line_id: &str) -> Result<Vec<LimitRow>> {
    let Some(line) = model.by_identifier(strip_fragment(line_id)) else {
        debug!(line_id, "line not in model");
        return Ok(Vec::new());
    };

    let resolver = Resolver::new(model);
    let mut rows = Vec::new();

    for terminal in resolver.referrers(CimClass::Terminal, CimProperty::TerminalConductingEquipment, line) {
        let limit_sets =
            resolver.referrers(CimClass::OperationalLimitSet, CimProperty::OperationalLimitSetTerminal, terminal);

        for limit_set in limit_sets {
            for limit in resolver.resolve_all(limit_set, CimProperty::OperationalLimitSetOperationalLimit) {
                let Some(class) = model.class_of(limit).filter(|c| c.is_operational_limit()) else {
                    continue;
                };
                let kind = resolver
                    .resolve(limit, CimProperty::OperationalLimitOperationalLimitType)
                    .filter(|&t| model.class_of(t) == Some(CimClass::OperationalLimitType))
                    .and_then(|t| model.child_text(t, CimProperty::OperationalLimitTypeKind))
                    .map(str::to_owned);
                rows.push(LimitRow {
                    kind,
                    value: limit_value(model, limit, class)?,
                });
            }
        }
    }

    debug!(line_id, rows = rows.len(), "collected line limits");
    Ok(rows)
}

/// First value property present on a limit, for its concrete class
fn limit_value<M: ModelAccess + ?Sized>(model: &M, limit: NodeId, class: CimClass) -> Result<Option<f64>> {
    for &property in class.limit_value_properties() {
        if let Some(value) = parse_number(model, limit, property)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_index, index_of};

    #[test]
    fn test_line_limits() {
        let index = fixture_index();
        let rows = line_limits(&index, "L1").unwrap();
        assert_eq!(
            rows,
            vec![
                LimitRow {
                    kind: Some("patl".to_string()),
                    value: Some(400.0),
                },
                LimitRow {
                    kind: None,
                    value: Some(525.5),
                },
            ]
        );
    }

    #[test]
    fn test_line_without_terminals() {
        let index = fixture_index();
        assert!(line_limits(&index, "L2").unwrap().is_empty());
        assert!(line_limits(&index, "nope").unwrap().is_empty());
    }

    #[test]
    fn test_empty_limit_set_does_not_affect_others() {
        // TL1b's set lists nothing; TL1a's rows are unchanged
        let index = fixture_index();
        let tl1b = index.by_identifier("TL1b").unwrap();
        let resolver = Resolver::new(&index);
        let sets = resolver.referrers(CimClass::OperationalLimitSet, CimProperty::OperationalLimitSetTerminal, tl1b);
        assert_eq!(sets.len(), 1);
        assert_eq!(line_limits(&index, "L1").unwrap().len(), 2);
    }

    #[test]
    fn test_limit_value_fallbacks() {
        let index = index_of(
            r##"<cim:ACLineSegment rdf:ID="L"/>
               <cim:Terminal rdf:ID="T"><cim:Terminal.ConductingEquipment rdf:resource="#L"/></cim:Terminal>
               <cim:OperationalLimitSet rdf:ID="S">
                 <cim:OperationalLimitSet.Terminal rdf:resource="#T"/>
                 <cim:OperationalLimitSet.OperationalLimit rdf:resource="#V"/>
                 <cim:OperationalLimitSet.OperationalLimit rdf:resource="#A"/>
                 <cim:OperationalLimitSet.OperationalLimit rdf:resource="#T"/>
               </cim:OperationalLimitSet>
               <cim:VoltageLimit rdf:ID="V"><cim:VoltageLimit.value>121</cim:VoltageLimit.value></cim:VoltageLimit>
               <cim:ActivePowerLimit rdf:ID="A"/>"##,
        );
        let rows = line_limits(&index, "L").unwrap();
        assert_eq!(
            rows,
            vec![
                LimitRow { kind: None, value: Some(121.0) },
                LimitRow { kind: None, value: None },
            ]
        );
    }

    #[test]
    fn test_malformed_limit_value() {
        let index = index_of(
            r##"<cim:ACLineSegment rdf:ID="L"/>
               <cim:Terminal rdf:ID="T"><cim:Terminal.ConductingEquipment rdf:resource="#L"/></cim:Terminal>
               <cim:OperationalLimitSet rdf:ID="S">
                 <cim:OperationalLimitSet.Terminal rdf:resource="#T"/>
                 <cim:OperationalLimitSet.OperationalLimit rdf:resource="#C"/>
               </cim:OperationalLimitSet>
               <cim:CurrentLimit rdf:ID="C"><cim:OperationalLimit.value>high</cim:OperationalLimit.value></cim:CurrentLimit>"##,
        );
        assert!(line_limits(&index, "L").is_err());
    }
}
