//! Validation rules, one sweep per object category.
//!
//! Every sweep walks one class in document order and never fails: a missing
//! or unparseable value becomes an issue.

pub(crate) mod duplicates;
pub(crate) mod limit_sets;
pub(crate) mod lines;
pub(crate) mod machines;
pub(crate) mod terminals;
pub(crate) mod transformers;
