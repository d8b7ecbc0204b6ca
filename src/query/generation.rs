//! Generating units and generator regulation

use super::parse_number;
use crate::error::Result;
use crate::index::{CimClass, CimProperty, ModelAccess};
use serde::Serialize;
use tracing::debug;

/// One generating unit and its rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratingUnitRow {
    #[serde(rename = "GeneratingUnit")]
    pub name: Option<String>,
    #[serde(rename = "MaxOperatingP_MW")]
    pub max_operating_p: Option<f64>,
}

/// Voltage regulation details of one synchronous machine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorRegulation {
    #[serde(rename = "Generator")]
    pub generator: String,
    #[serde(rename = "VoltageRegulationRange")]
    pub voltage_regulation_range: Option<f64>,
    /// Raw reference, including the leading `#`
    #[serde(rename = "RegulatingControlRef")]
    pub regulating_control: Option<String>,
    /// Raw reference to the machine kind
    #[serde(rename = "MachineType")]
    pub machine_type: Option<String>,
}

/// Every `GeneratingUnit` with its name and maximum operating power
pub fn generating_units<M: ModelAccess + ?Sized>(model: &M) -> Result<Vec<GeneratingUnitRow>> {
    let units = model.by_type(CimClass::GeneratingUnit);
    debug!(count = units.len(), "listing generating units");

    units
        .iter()
        .map(|&unit| {
            Ok(GeneratingUnitRow {
                name: model
                    .child_text(unit, CimProperty::IdentifiedObjectName)
                    .map(str::to_owned),
                max_operating_p: parse_number(model, unit, CimProperty::GeneratingUnitMaxOperatingP)?,
            })
        })
        .collect()
}

/// Regulation details of the first `SynchronousMachine` named exactly `name`
///
/// `Ok(None)` when no machine carries that name.
pub fn generator_regulation<M: ModelAccess + ?Sized>(
    model: &M,
    name: &str,
) -> Result<Option<GeneratorRegulation>> {
    let machine = model
        .by_type(CimClass::SynchronousMachine)
        .iter()
        .copied()
        .find(|&sm| model.child_text(sm, CimProperty::IdentifiedObjectName) == Some(name));

    let Some(machine) = machine else {
        debug!(name, "no synchronous machine with this name");
        return Ok(None);
    };

    Ok(Some(GeneratorRegulation {
        generator: name.to_string(),
        voltage_regulation_range: parse_number(
            model,
            machine,
            CimProperty::SynchronousMachineVoltageRegulationRange,
        )?,
        regulating_control: model
            .reference(machine, CimProperty::RegulatingCondEqRegulatingControl)
            .map(str::to_owned),
        machine_type: model
            .reference(machine, CimProperty::SynchronousMachineType)
            .map(str::to_owned),
    }))
}
