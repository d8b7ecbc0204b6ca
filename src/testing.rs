//! Shared test fixture: a small CGMES-style equipment profile.
//!
//! - `SM1` ("G1") is fully linked and is the slack machine; `SM2` ("G2") has
//!   no regulating control, a zero regulation range and no generating unit.
//! - `T1` has two ends (listed end 2 first); `T2` has one end without a
//!   base voltage.
//! - `L1` has terminals `TL1a` (with a topological node) and `TL1b`; `L2`
//!   has none.
//! - `OLS1` on `TL1a` lists `OL1`, `OL2` and a dangling limit; `OLS2` on
//!   `TL1b` lists nothing.

use crate::config::NamespaceBindings;
use crate::dom::XmlDocument;
use crate::index::CimIndex;

pub const FIXTURE: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:cim="http://iec.ch/TC57/CIM100#"
         xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:md="http://iec.ch/TC57/61970-552/ModelDescription/1#">
  <md:FullModel rdf:about="urn:uuid:0a5b7f2c-eq">
    <md:Model.profile>http://iec.ch/TC57/ns/CIM/CoreEquipment-EU/3.0</md:Model.profile>
  </md:FullModel>
  <cim:BaseVoltage rdf:ID="BV110">
    <cim:IdentifiedObject.name>110 kV</cim:IdentifiedObject.name>
    <cim:BaseVoltage.nominalVoltage>110</cim:BaseVoltage.nominalVoltage>
  </cim:BaseVoltage>
  <cim:BaseVoltage rdf:ID="BV20">
    <cim:BaseVoltage.nominalVoltage> 20.0 </cim:BaseVoltage.nominalVoltage>
  </cim:BaseVoltage>
  <cim:GeneratingUnit rdf:ID="GU1">
    <cim:IdentifiedObject.name>Unit A</cim:IdentifiedObject.name>
    <cim:GeneratingUnit.maxOperatingP>100.5</cim:GeneratingUnit.maxOperatingP>
  </cim:GeneratingUnit>
  <cim:GeneratingUnit rdf:ID="GU2"/>
  <cim:SynchronousMachine rdf:ID="SM1">
    <cim:IdentifiedObject.name>G1</cim:IdentifiedObject.name>
    <cim:RegulatingCondEq.RegulatingControl rdf:resource="#RC1"/>
    <cim:RotatingMachine.GeneratingUnit rdf:resource="#GU1"/>
    <cim:SynchronousMachine.type rdf:resource="http://iec.ch/TC57/CIM100#SynchronousMachineKind.generator"/>
    <cim:SynchronousMachine.voltageRegulationRange>5.0</cim:SynchronousMachine.voltageRegulationRange>
    <cim:SynchronousMachine.referencePriority>1</cim:SynchronousMachine.referencePriority>
  </cim:SynchronousMachine>
  <cim:SynchronousMachine rdf:ID="SM2">
    <cim:IdentifiedObject.name>G2</cim:IdentifiedObject.name>
    <cim:SynchronousMachine.voltageRegulationRange>0</cim:SynchronousMachine.voltageRegulationRange>
    <cim:SynchronousMachine.referencePriority>0</cim:SynchronousMachine.referencePriority>
  </cim:SynchronousMachine>
  <cim:PowerTransformer rdf:ID="T1">
    <cim:IdentifiedObject.name>T1</cim:IdentifiedObject.name>
  </cim:PowerTransformer>
  <cim:PowerTransformerEnd rdf:ID="TE2">
    <cim:PowerTransformerEnd.endNumber>2</cim:PowerTransformerEnd.endNumber>
    <cim:PowerTransformerEnd.PowerTransformer rdf:resource="#T1"/>
    <cim:TransformerEnd.BaseVoltage rdf:resource="#BV20"/>
  </cim:PowerTransformerEnd>
  <cim:PowerTransformerEnd rdf:ID="TE1">
    <cim:PowerTransformerEnd.endNumber>1</cim:PowerTransformerEnd.endNumber>
    <cim:PowerTransformerEnd.PowerTransformer rdf:resource="#T1"/>
    <cim:TransformerEnd.BaseVoltage rdf:resource="#BV110"/>
  </cim:PowerTransformerEnd>
  <cim:PowerTransformer rdf:ID="T2"/>
  <cim:PowerTransformerEnd rdf:ID="TE3">
    <cim:PowerTransformerEnd.endNumber>1</cim:PowerTransformerEnd.endNumber>
    <cim:PowerTransformerEnd.PowerTransformer rdf:resource="#T2"/>
  </cim:PowerTransformerEnd>
  <cim:ACLineSegment rdf:ID="L1">
    <cim:IdentifiedObject.name>Line 1</cim:IdentifiedObject.name>
  </cim:ACLineSegment>
  <cim:ACLineSegment rdf:ID="L2"/>
  <cim:Terminal rdf:ID="TL1a">
    <cim:Terminal.ConductingEquipment rdf:resource="#L1"/>
    <cim:Terminal.TopologicalNode rdf:resource="#TN1"/>
  </cim:Terminal>
  <cim:Terminal rdf:ID="TL1b">
    <cim:Terminal.ConductingEquipment rdf:resource="#L1"/>
  </cim:Terminal>
  <cim:OperationalLimitType rdf:ID="OLT1">
    <cim:OperationalLimitType.kind>patl</cim:OperationalLimitType.kind>
  </cim:OperationalLimitType>
  <cim:OperationalLimitSet rdf:ID="OLS1">
    <cim:OperationalLimitSet.Terminal rdf:resource="#TL1a"/>
    <cim:OperationalLimitSet.OperationalLimit rdf:resource="#OL1"/>
    <cim:OperationalLimitSet.OperationalLimit rdf:resource="#OL2"/>
    <cim:OperationalLimitSet.OperationalLimit rdf:resource="#OL_missing"/>
  </cim:OperationalLimitSet>
  <cim:OperationalLimitSet rdf:ID="OLS2">
    <cim:OperationalLimitSet.Terminal rdf:resource="#TL1b"/>
  </cim:OperationalLimitSet>
  <cim:OperationalLimit rdf:ID="OL1">
    <cim:OperationalLimit.OperationalLimitType rdf:resource="#OLT1"/>
    <cim:OperationalLimit.value>400</cim:OperationalLimit.value>
  </cim:OperationalLimit>
  <cim:CurrentLimit rdf:ID="OL2">
    <cim:OperationalLimit.OperationalLimitType rdf:resource="#OLT_missing"/>
    <cim:CurrentLimit.normalValue>525.5</cim:CurrentLimit.normalValue>
  </cim:CurrentLimit>
</rdf:RDF>
"##;

/// Index of [`FIXTURE`] under the default bindings
pub fn fixture_index() -> CimIndex {
    CimIndex::build(XmlDocument::parse(FIXTURE.as_bytes()), &NamespaceBindings::default())
}

/// Index of a fragment wrapped in an `rdf:RDF` root with the default namespaces
pub fn index_of(body: &str) -> CimIndex {
    let bindings = NamespaceBindings::default();
    let xml = format!(
        r#"<rdf:RDF xmlns:cim="{}" xmlns:rdf="{}">{}</rdf:RDF>"#,
        bindings.cim.uri, bindings.rdf.uri, body
    );
    CimIndex::build(XmlDocument::parse(xml.as_bytes()), &bindings)
}
