//! XML Reader Module
//!
//! - SliceReader: zero-copy, lenient-by-default pull parser
//! - Events: XML event types for pull parsing

pub mod events;
pub mod slice;

pub use events::{EndElement, StartElement, XmlEvent};
pub use slice::{ParseError, SliceReader};
