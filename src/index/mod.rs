//! Document Index Module
//!
//! Turns a parsed CIM document into something queries can walk cheaply.
//!
//! ## Architecture
//!
//! ```text
//! CimIndex
//! ├── ids:      rdf:ID value id -> NodeId       (first in document order)
//! ├── by_type:  (namespace, local name) -> [NodeId]
//! └── incoming: target NodeId -> [(source, property)]
//! ```
//!
//! Consumers go through the [`ModelAccess`] trait and name classes and
//! properties with the typed enums in [`schema`].

pub mod access;
pub mod schema;
pub mod structural;

pub use access::{strip_fragment, ModelAccess, UNKNOWN_IDENTIFIER};
pub use schema::{CimClass, CimProperty, RdfAttribute};
pub use structural::CimIndex;
