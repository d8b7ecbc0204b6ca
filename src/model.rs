//! Model Session
//!
//! [`Model`] owns a parsed CIM document together with its index and exposes
//! the resolver, the domain queries and the validator over it. It is
//! immutable after construction and can be shared across threads.

use crate::config::{NamespaceBindings, Settings};
use crate::dom::{NodeId, XmlDocument};
use crate::error::Result;
use crate::index::{strip_fragment, CimIndex, ModelAccess};
use crate::query::{self, ClassCount, GeneratingUnitRow, GeneratorRegulation, LimitRow, SlackGenerator, WindingRow};
use crate::resolve::Resolver;
use crate::validate::{Issue, Validator, ValidatorOptions};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// A loaded CIM model
#[derive(Debug)]
pub struct Model {
    index: CimIndex,
}

impl Model {
    /// Parse leniently, recovering from malformed markup
    pub fn parse(input: &[u8], bindings: &NamespaceBindings) -> Self {
        let doc = XmlDocument::parse_with_bindings(input, &bindings.pairs());
        Self::from_document(doc, bindings)
    }

    /// Parse, failing on the first well-formedness error
    pub fn parse_strict(input: &[u8], bindings: &NamespaceBindings) -> Result<Self> {
        let doc = XmlDocument::parse_strict_with_bindings(input, &bindings.pairs())?;
        Ok(Self::from_document(doc, bindings))
    }

    /// Index an already parsed document
    pub fn from_document(doc: XmlDocument, bindings: &NamespaceBindings) -> Self {
        Model {
            index: CimIndex::build(doc, bindings),
        }
    }

    /// Read and parse a model file under the given settings
    pub fn load(path: &Path, settings: &Settings) -> Result<Self> {
        let started = Instant::now();
        let input = std::fs::read(path)?;
        let model = if settings.strict {
            Self::parse_strict(&input, &settings.namespaces)?
        } else {
            Self::parse(&input, &settings.namespaces)
        };
        info!(
            path = %path.display(),
            bytes = input.len(),
            identifiers = model.index.identifier_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model loaded"
        );
        Ok(model)
    }

    #[inline]
    pub fn index(&self) -> &CimIndex {
        &self.index
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        self.index.document()
    }

    pub fn resolver(&self) -> Resolver<'_, CimIndex> {
        Resolver::new(&self.index)
    }

    /// Element with identifier `id`; a leading `#` is accepted
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.by_identifier(strip_fragment(id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn generating_units(&self) -> Result<Vec<GeneratingUnitRow>> {
        query::generating_units(&self.index)
    }

    pub fn generator_regulation(&self, name: &str) -> Result<Option<GeneratorRegulation>> {
        query::generator_regulation(&self.index, name)
    }

    pub fn transformer_windings(&self, transformer_id: &str) -> Result<Vec<WindingRow>> {
        query::transformer_windings(&self.index, transformer_id)
    }

    pub fn line_limits(&self, line_id: &str) -> Result<Vec<LimitRow>> {
        query::line_limits(&self.index, line_id)
    }

    pub fn tag_names_containing(&self, needle: &str) -> Vec<String> {
        query::tag_names_containing(&self.index, needle)
    }

    pub fn slack_generator(&self) -> SlackGenerator {
        query::slack_generator(&self.index)
    }

    pub fn summary(&self) -> Vec<ClassCount> {
        query::class_counts(&self.index)
    }

    // ========================================================================
    // Batch queries
    // ========================================================================

    /// Windings of several transformers on the rayon pool, in input order
    pub fn windings_for_all(&self, transformer_ids: &[&str]) -> Result<Vec<(String, Vec<WindingRow>)>> {
        transformer_ids
            .par_iter()
            .map(|&id| self.transformer_windings(id).map(|rows| (id.to_string(), rows)))
            .collect()
    }

    /// Limits of several lines on the rayon pool, in input order
    pub fn limits_for_all(&self, line_ids: &[&str]) -> Result<Vec<(String, Vec<LimitRow>)>> {
        line_ids
            .par_iter()
            .map(|&id| self.line_limits(id).map(|rows| (id.to_string(), rows)))
            .collect()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Run the standard validation sweeps
    pub fn validate(&self) -> Vec<Issue> {
        self.validator(ValidatorOptions::default()).run()
    }

    pub fn validator(&self, options: ValidatorOptions) -> Validator<'_, CimIndex> {
        Validator::with_options(&self.index, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CimError;
    use crate::query::SlackGenerator;
    use crate::testing::FIXTURE;
    use std::io::Write;

    fn fixture() -> Model {
        Model::parse(FIXTURE.as_bytes(), &NamespaceBindings::default())
    }

    #[test]
    fn test_model_is_sync() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<Model>();
    }

    #[test]
    fn test_lookup_accepts_fragment() {
        let model = fixture();
        assert!(model.lookup("T1").is_some());
        assert_eq!(model.lookup("#T1"), model.lookup("T1"));
        assert!(model.lookup("nope").is_none());
    }

    #[test]
    fn test_queries_through_model() {
        let model = fixture();
        assert_eq!(model.slack_generator(), SlackGenerator::Found { name: "G1".to_string() });
        assert_eq!(model.transformer_windings("T1").unwrap().len(), 2);
        assert_eq!(model.line_limits("L1").unwrap().len(), 2);
        assert_eq!(model.validate().len(), 8);
        let counts = model.summary();
        let machines = counts.iter().find(|c| c.class == "SynchronousMachine").unwrap();
        assert_eq!(machines.count, 2);
    }

    #[test]
    fn test_batch_queries_keep_input_order() {
        let model = fixture();
        let windings = model.windings_for_all(&["T2", "missing", "T1"]).unwrap();
        let shape: Vec<_> = windings.iter().map(|(id, rows)| (id.as_str(), rows.len())).collect();
        assert_eq!(shape, vec![("T2", 1), ("missing", 0), ("T1", 2)]);

        let limits = model.limits_for_all(&["L2", "L1"]).unwrap();
        let shape: Vec<_> = limits.iter().map(|(id, rows)| (id.as_str(), rows.len())).collect();
        assert_eq!(shape, vec![("L2", 0), ("L1", 2)]);
    }

    #[test]
    fn test_strict_parse_rejects_mismatched_tags() {
        let err = Model::parse_strict(b"<rdf:RDF><a></b></rdf:RDF>", &NamespaceBindings::default()).unwrap_err();
        assert!(matches!(err, CimError::Parse(_)));
        // Lenient parsing of the same input recovers
        let model = Model::parse(b"<rdf:RDF><a></b></rdf:RDF>", &NamespaceBindings::default());
        assert!(model.document().root_element_id().is_some());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let settings = Settings {
            strict: true,
            ..Settings::default()
        };
        let model = Model::load(file.path(), &settings).unwrap();
        assert_eq!(model.generating_units().unwrap().len(), 2);

        let err = Model::load(Path::new("/nonexistent/model.xml"), &settings).unwrap_err();
        assert!(matches!(err, CimError::Io(_)));
    }
}
