//! Validation rule for repeated identifiers.

use crate::index::ModelAccess;
use crate::validate::issue::Issue;

pub(crate) const DUPLICATE_IDENTIFIER: &str = "Duplicate identifier";

/// Reports every element whose `rdf:ID` repeats an earlier one. Lookups
/// resolve to the first occurrence, so these elements are unreachable.
pub(crate) fn check<M: ModelAccess + ?Sized>(model: &M) -> Vec<Issue> {
    model
        .shadowed_duplicates()
        .iter()
        .map(|&element| Issue::logical(DUPLICATE_IDENTIFIER, model.identifier_or_unknown(element)))
        .collect()
}
