//! Validation rule for AC line segments.

use crate::index::{CimClass, CimProperty, ModelAccess};
use crate::validate::issue::Issue;

pub(crate) const NO_TERMINALS: &str = "Line without terminals";

/// Flags every `ACLineSegment` no `Terminal` points at.
pub(crate) fn check<M: ModelAccess + ?Sized>(model: &M) -> Vec<Issue> {
    model
        .by_type(CimClass::ACLineSegment)
        .iter()
        .copied()
        .filter(|&line| {
            model
                .referrers(CimClass::Terminal, CimProperty::TerminalConductingEquipment, line)
                .is_empty()
        })
        .map(|line| Issue::logical(NO_TERMINALS, model.identifier_or_unknown(line)))
        .collect()
}
