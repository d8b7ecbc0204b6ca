//! Error types

use crate::index::CimProperty;
use crate::reader::ParseError;
use thiserror::Error;

/// Errors surfaced by model loading, queries and configuration
///
/// Dangling references are not errors: they show up as absent fields or as
/// validation issues.
#[derive(Debug, Error)]
pub enum CimError {
    #[error("XML parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("malformed value {value:?} for {property} on {identifier}")]
    MalformedValue {
        identifier: String,
        property: CimProperty,
        value: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid time-series payload: {0}")]
    Payload(String),
}

impl CimError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        CimError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CimError>;
