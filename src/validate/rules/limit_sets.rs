//! Validation rule for operational limit sets.

use crate::index::{CimClass, CimProperty, ModelAccess};
use crate::validate::issue::Issue;

pub(crate) const NO_LIMITS: &str = "OperationalLimitSet without limits";

/// Flags every `OperationalLimitSet` listing no limits. Listed limits count
/// even when they dangle.
pub(crate) fn check<M: ModelAccess + ?Sized>(model: &M) -> Vec<Issue> {
    model
        .by_type(CimClass::OperationalLimitSet)
        .iter()
        .copied()
        .filter(|&set| model.property_count(set, CimProperty::OperationalLimitSetOperationalLimit) == 0)
        .map(|set| Issue::logical(NO_LIMITS, model.identifier_or_unknown(set)))
        .collect()
}
