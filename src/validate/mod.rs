//! Structural Validator
//!
//! Sweeps an indexed model for structural and parameter problems and reports
//! them as [`Issue`] records. Validation never fails: an empty list means no
//! rule fired.

pub mod issue;
pub(crate) mod rules;
pub mod validator;

pub use issue::{Issue, IssueType};
pub use validator::{Validator, ValidatorOptions};
