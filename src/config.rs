//! Configuration
//!
//! Namespace bindings for a model session plus the layered runtime settings
//! used by the `cimgraph` binary: built-in defaults, then an optional TOML
//! file, then `CIMGRAPH_*` environment variables (nested keys separated by
//! `__`, e.g. `CIMGRAPH_NAMESPACES__CIM__URI`).

use crate::error::{CimError, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CIM 100 profile namespace (CGMES 3.0)
pub const CIM100_NS: &str = "http://iec.ch/TC57/CIM100#";
/// RDF syntax namespace
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// One prefix bound to one namespace URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBinding {
    pub prefix: String,
    pub uri: String,
}

impl NamespaceBinding {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        NamespaceBinding {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// The two namespaces every query and rule is qualified by
///
/// Elements are matched by namespace URI. The prefixes only matter for
/// documents that use `cim:`/`rdf:` without declaring them; those fall back
/// to these bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBindings {
    pub cim: NamespaceBinding,
    pub rdf: NamespaceBinding,
}

impl Default for NamespaceBindings {
    fn default() -> Self {
        NamespaceBindings {
            cim: NamespaceBinding::new("cim", CIM100_NS),
            rdf: NamespaceBinding::new("rdf", RDF_NS),
        }
    }
}

impl NamespaceBindings {
    /// Bindings for an older CIM schema (e.g. CGMES 2.4.15's `CIM-schema-cim16#`)
    pub fn with_cim_uri(uri: impl Into<String>) -> Self {
        NamespaceBindings {
            cim: NamespaceBinding::new("cim", uri),
            ..Self::default()
        }
    }

    /// `(prefix, uri)` pairs to seed a parser with
    pub fn pairs(&self) -> [(&str, &str); 2] {
        [
            (self.cim.prefix.as_str(), self.cim.uri.as_str()),
            (self.rdf.prefix.as_str(), self.rdf.uri.as_str()),
        ]
    }

    /// Reject bindings that could never match anything
    pub fn validate(&self) -> Result<()> {
        for binding in [&self.cim, &self.rdf] {
            if binding.uri.trim().is_empty() {
                return Err(CimError::Config(format!(
                    "namespace URI for prefix '{}' is empty",
                    binding.prefix
                )));
            }
            if binding.prefix.is_empty() || binding.prefix.contains(':') {
                return Err(CimError::Config(format!(
                    "invalid namespace prefix '{}'",
                    binding.prefix
                )));
            }
        }
        if self.cim.prefix == self.rdf.prefix {
            return Err(CimError::Config(format!(
                "cim and rdf share the prefix '{}'",
                self.cim.prefix
            )));
        }
        if self.cim.uri == self.rdf.uri {
            return Err(CimError::Config("cim and rdf share one namespace URI".to_string()));
        }
        Ok(())
    }
}

/// Runtime settings for a model session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub namespaces: NamespaceBindings,
    /// Reject malformed XML instead of recovering
    pub strict: bool,
    /// Run validation sweeps and batch queries on the rayon pool
    pub parallel: bool,
    /// Report later duplicates of an identifier during validation
    pub check_duplicate_ids: bool,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            namespaces: NamespaceBindings::default(),
            strict: false,
            parallel: false,
            check_duplicate_ids: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(CimError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        Self::extract(figment.merge(Env::prefixed("CIMGRAPH_").split("__")))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let settings: Settings = figment
            .extract()
            .map_err(|e| CimError::Config(format!("failed to load configuration: {}", e)))?;
        settings.namespaces.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.namespaces.cim.uri, CIM100_NS);
        assert_eq!(settings.namespaces.rdf.prefix, "rdf");
        assert!(!settings.strict);
        assert!(settings.namespaces.validate().is_ok());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
strict = true
check_duplicate_ids = true

[namespaces.cim]
prefix = "cim"
uri = "http://iec.ch/TC57/2013/CIM-schema-cim16#"
"#
        )
        .unwrap();

        let figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file.path()));
        let settings = Settings::extract(figment).unwrap();

        assert!(settings.strict);
        assert!(settings.check_duplicate_ids);
        assert!(!settings.parallel);
        assert_eq!(settings.namespaces.cim.uri, "http://iec.ch/TC57/2013/CIM-schema-cim16#");
        assert_eq!(settings.namespaces.rdf.uri, RDF_NS);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CimError::Config(_)));
    }

    #[test]
    fn test_invalid_bindings_rejected() {
        let mut bindings = NamespaceBindings::default();
        bindings.rdf.prefix = "cim".to_string();
        assert!(bindings.validate().is_err());

        let bindings = NamespaceBindings::with_cim_uri("  ");
        assert!(bindings.validate().is_err());
    }

    #[test]
    fn test_pairs() {
        let bindings = NamespaceBindings::default();
        assert_eq!(bindings.pairs()[0], ("cim", CIM100_NS));
        assert_eq!(bindings.pairs()[1], ("rdf", RDF_NS));
    }
}
