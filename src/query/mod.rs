//! Domain Query Engine
//!
//! Read-only queries over an indexed model. Every query is a function of the
//! model and an optional key; rows derive `Serialize` with the column names
//! of the tables they feed.
//!
//! Missing data is `None`. Data that is present but does not parse is a
//! [`CimError::MalformedValue`].

pub mod discovery;
pub mod generation;
pub mod line;
pub mod slack;
pub mod transformer;

pub use discovery::{class_counts, tag_names_containing, ClassCount};
pub use generation::{generating_units, generator_regulation, GeneratingUnitRow, GeneratorRegulation};
pub use line::{line_limits, LimitRow};
pub use slack::{slack_generator, SlackGenerator};
pub use transformer::{transformer_windings, WindingRow};

use crate::dom::NodeId;
use crate::error::{CimError, Result};
use crate::index::{CimProperty, ModelAccess};
use std::str::FromStr;

/// Parse the text of a `property` child as a number
///
/// Absent or blank text is `Ok(None)`; surrounding whitespace is ignored.
pub(crate) fn parse_number<M, T>(model: &M, element: NodeId, property: CimProperty) -> Result<Option<T>>
where
    M: ModelAccess + ?Sized,
    T: FromStr,
{
    let Some(text) = model.child_text(element, property) else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| CimError::MalformedValue {
            identifier: model.identifier_or_unknown(element).to_string(),
            property,
            value: text.to_string(),
        })
}
