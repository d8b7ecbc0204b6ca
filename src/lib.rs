//! cimgraph - Reference resolution and structural validation for CIM models
//!
//! Layers, leaves first:
//! A: Lenient slice reader and arena DOM (reader, dom)
//! B: Structural index over identifiers, types and references (index)
//! C: Reference resolver (resolve)
//! D: Domain queries (query)
//! E: Structural validator (validate)
//!
//! [`Model`] ties them together for one loaded document. Balancing
//! time-series metrics live in [`timeseries`].

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod index;
pub mod model;
pub mod query;
pub mod reader;
pub mod resolve;
pub mod timeseries;
pub mod validate;

#[cfg(test)]
mod testing;

pub use config::{NamespaceBinding, NamespaceBindings, Settings, CIM100_NS, RDF_NS};
pub use dom::{NodeId, XmlDocument};
pub use error::{CimError, Result};
pub use index::{CimClass, CimIndex, CimProperty, ModelAccess, RdfAttribute, UNKNOWN_IDENTIFIER};
pub use model::Model;
pub use query::{
    ClassCount, GeneratingUnitRow, GeneratorRegulation, LimitRow, SlackGenerator, WindingRow,
};
pub use reader::ParseError;
pub use resolve::Resolver;
pub use validate::{Issue, IssueType, Validator, ValidatorOptions};
