//! Validation rule for synchronous machines.

use crate::index::{CimClass, CimProperty, ModelAccess};
use crate::query::parse_number;
use crate::validate::issue::Issue;

pub(crate) const NO_REGULATING_CONTROL: &str = "Generator without regulating control";
pub(crate) const ZERO_REGULATION_RANGE: &str = "Generator has zero voltage regulation range";
pub(crate) const MALFORMED_REGULATION_RANGE: &str = "Generator has malformed voltage regulation range";
pub(crate) const NO_GENERATING_UNIT: &str = "Generator without GeneratingUnit link";

/// Checks each `SynchronousMachine` for its regulating control, a usable
/// voltage regulation range and its generating unit link.
pub(crate) fn check<M: ModelAccess + ?Sized>(model: &M) -> Vec<Issue> {
    let mut issues = Vec::new();

    for &machine in model.by_type(CimClass::SynchronousMachine) {
        let object = model.identifier_or_unknown(machine);

        if model
            .reference(machine, CimProperty::RegulatingCondEqRegulatingControl)
            .is_none()
        {
            issues.push(Issue::logical(NO_REGULATING_CONTROL, object));
        }

        match parse_number::<_, f64>(model, machine, CimProperty::SynchronousMachineVoltageRegulationRange) {
            Ok(Some(range)) if range == 0.0 => issues.push(Issue::parameter(ZERO_REGULATION_RANGE, object)),
            Ok(_) => {}
            Err(_) => issues.push(Issue::parameter(MALFORMED_REGULATION_RANGE, object)),
        }

        if model
            .reference(machine, CimProperty::RotatingMachineGeneratingUnit)
            .is_none()
        {
            issues.push(Issue::logical(NO_GENERATING_UNIT, object));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::index_of;

    #[test]
    fn test_unlinked_machine() {
        let index = index_of(
            r#"<cim:SynchronousMachine rdf:ID="SM">
                 <cim:IdentifiedObject.name>G</cim:IdentifiedObject.name>
                 <cim:SynchronousMachine.voltageRegulationRange>0.0</cim:SynchronousMachine.voltageRegulationRange>
               </cim:SynchronousMachine>"#,
        );
        let issues = check(&index);
        let descriptions: Vec<_> = issues.iter().map(|i| i.description).collect();
        assert_eq!(descriptions, vec![NO_REGULATING_CONTROL, ZERO_REGULATION_RANGE, NO_GENERATING_UNIT]);
        // Object is the identifier, not the name
        assert!(issues.iter().all(|i| i.object == "SM"));
    }

    #[test]
    fn test_malformed_range_is_an_issue() {
        let index = index_of(
            r##"<cim:SynchronousMachine>
                 <cim:RegulatingCondEq.RegulatingControl rdf:resource="#RC"/>
                 <cim:RotatingMachine.GeneratingUnit rdf:resource="#GU"/>
                 <cim:SynchronousMachine.voltageRegulationRange>wide</cim:SynchronousMachine.voltageRegulationRange>
               </cim:SynchronousMachine>"##,
        );
        let issues = check(&index);
        assert_eq!(issues, vec![Issue::parameter(MALFORMED_REGULATION_RANGE, "UNKNOWN")]);
    }

    #[test]
    fn test_missing_range_is_fine() {
        let index = index_of(
            r##"<cim:SynchronousMachine rdf:ID="SM">
                 <cim:RegulatingCondEq.RegulatingControl rdf:resource="#RC"/>
                 <cim:RotatingMachine.GeneratingUnit rdf:resource="#GU"/>
               </cim:SynchronousMachine>"##,
        );
        assert!(check(&index).is_empty());
    }
}
