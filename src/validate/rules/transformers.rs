//! Validation rule for power transformers and their windings.

use crate::index::{CimClass, CimProperty, ModelAccess};
use crate::validate::issue::Issue;

pub(crate) const TOO_FEW_WINDINGS: &str = "Transformer with less than two windings";
pub(crate) const WINDING_WITHOUT_BASE_VOLTAGE: &str = "Transformer winding without BaseVoltage";

/// Requires at least two `PowerTransformerEnd`s per transformer and a
/// `BaseVoltage` reference on each of them.
pub(crate) fn check<M: ModelAccess + ?Sized>(model: &M) -> Vec<Issue> {
    let mut issues = Vec::new();

    for &transformer in model.by_type(CimClass::PowerTransformer) {
        let object = model.identifier_or_unknown(transformer);
        let ends = model.referrers(
            CimClass::PowerTransformerEnd,
            CimProperty::PowerTransformerEndPowerTransformer,
            transformer,
        );

        if ends.len() < 2 {
            issues.push(Issue::logical(TOO_FEW_WINDINGS, object));
        }

        for end in ends {
            if model.reference(end, CimProperty::TransformerEndBaseVoltage).is_none() {
                issues.push(Issue::power_system(WINDING_WITHOUT_BASE_VOLTAGE, object));
            }
        }
    }

    issues
}
