//! Transformer windings
//!
//! Transformer -> referencing `PowerTransformerEnd`s -> `BaseVoltage`.

use super::parse_number;
use crate::error::Result;
use crate::index::{strip_fragment, CimClass, CimProperty, ModelAccess};
use crate::resolve::Resolver;
use serde::Serialize;
use tracing::debug;

/// One winding of a transformer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindingRow {
    #[serde(rename = "EndNumber")]
    pub end_number: Option<i64>,
    #[serde(rename = "NominalVoltage_kV")]
    pub nominal_voltage: Option<f64>,
}

/// Windings of the transformer with identifier `transformer_id`, in document order
///
/// An unknown identifier, or a transformer nobody references, yields no rows.
pub fn transformer_windings<M: ModelAccess + ?Sized>(
    model: &M,
    transformer_id: &str,
) -> Result<Vec<WindingRow>> {
    let Some(transformer) = model.by_identifier(strip_fragment(transformer_id)) else {
        debug!(transformer_id, "transformer not in model");
        return Ok(Vec::new());
    };

    let resolver = Resolver::new(model);
    resolver
        .referrers(
            CimClass::PowerTransformerEnd,
            CimProperty::PowerTransformerEndPowerTransformer,
            transformer,
        )
        .into_iter()
        .map(|end| {
            let base_voltage = resolver
                .resolve(end, CimProperty::TransformerEndBaseVoltage)
                .filter(|&bv| model.class_of(bv) == Some(CimClass::BaseVoltage));
            let nominal_voltage = match base_voltage {
                Some(bv) => parse_number(model, bv, CimProperty::BaseVoltageNominalVoltage)?,
                None => None,
            };
            Ok(WindingRow {
                end_number: parse_number(model, end, CimProperty::PowerTransformerEndEndNumber)?,
                nominal_voltage,
            })
        })
        .collect()
}
