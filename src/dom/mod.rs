//! DOM Module - Arena-based XML Document
//!
//! Implements an efficient DOM representation using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element/attribute names
//! - Namespace resolution stack

pub mod document;
pub mod namespace;
pub mod node;
pub mod strings;

pub use document::XmlDocument;
pub use node::{NodeId, NodeKind, XmlAttribute, XmlNode};
pub use strings::StringPool;
