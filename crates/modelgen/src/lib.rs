//! Modelgen - generate configuration artifacts from class models.
//!
//! A class model (classes, attributes and containment relations with
//! multiplicities) is read from XML or JSON, built into a
//! [`Graph`](model::Graph) and rendered into a nested XML configuration
//! document and a flat JSON metadata listing. Separately, two flat JSON
//! configuration documents can be diffed into a [`Delta`](delta::Delta) and
//! the patched document rebuilt from it.

pub mod config;
pub mod delta;
pub mod element;
pub mod export;
pub mod traverse;

mod error;

pub use modelgen_core::{builder, model, multiplicity, node, record};

pub use error::ModelgenError;

use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use serde_json::Value;

use modelgen_parser::ParserRegistry;

use builder::GraphBuilder;
use config::AppConfig;
use delta::{Delta, Document};
use export::OutputGenerator;
use model::Graph;

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    key: &'static str,
    path: PathBuf,
    contents: Vec<u8>,
}

impl GeneratedOutput {
    /// Key of the generator that produced this output.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Configured destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// The delta between two configuration documents, and the patched document
/// rebuilt from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDelta {
    delta: Delta,
    patched: Document,
}

impl ConfigDelta {
    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// The original document with the delta applied.
    pub fn patched(&self) -> &Document {
        &self.patched
    }

    /// Renders the delta as JSON indented four spaces per level.
    pub fn delta_json(&self) -> Result<Vec<u8>, ModelgenError> {
        Ok(export::to_json_pretty(&self.delta)?)
    }

    /// Renders the patched document as JSON indented four spaces per level.
    pub fn patched_json(&self) -> Result<Vec<u8>, ModelgenError> {
        Ok(export::to_json_pretty(&self.patched)?)
    }
}

/// Pipeline for reading class models, rendering outputs and diffing
/// configuration documents.
///
/// The pipeline only works on in-memory text; callers read and write
/// files.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use modelgen::{ModelPipeline, config::AppConfig};
///
/// let source = r#"
///     <Model>
///       <Class name="Program" isRoot="true"/>
///       <Class name="Course"><Attribute name="title" type="string"/></Class>
///       <Aggregation source="Course" target="Program"
///                    sourceMultiplicity="1..*" targetMultiplicity="1"/>
///     </Model>
/// "#;
///
/// let pipeline = ModelPipeline::new(AppConfig::default());
/// let graph = pipeline
///     .parse_model(source, Path::new("model.xml"))
///     .expect("Failed to parse");
///
/// let outputs = pipeline.generate_outputs(&graph).expect("Failed to render");
/// assert_eq!(outputs.len(), 2);
/// assert_eq!(outputs[0].path(), Path::new("out/config.xml"));
/// ```
#[derive(Debug)]
pub struct ModelPipeline {
    config: AppConfig,
    parsers: ParserRegistry,
    generators: Vec<Box<dyn OutputGenerator>>,
}

impl Default for ModelPipeline {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl ModelPipeline {
    /// Creates a pipeline with the default readers and generators.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            parsers: ParserRegistry::default(),
            generators: export::default_generators(),
        }
    }

    /// Replaces the output generators.
    pub fn with_generators(mut self, generators: Vec<Box<dyn OutputGenerator>>) -> Self {
        self.generators = generators;
        self
    }

    /// Replaces the model reader registry.
    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Reads a class model and builds its graph.
    ///
    /// `path` selects the reader by extension and is not opened.
    ///
    /// # Errors
    ///
    /// Returns [`ModelgenError::Parse`] with every diagnostic of the reader.
    pub fn parse_model(&self, source: &str, path: &Path) -> Result<Graph, ModelgenError> {
        let parser = self.parsers.for_path(path);
        info!(path = path.display().to_string(), format = parser.name(); "Reading model");

        let record = parser
            .parse(source)
            .map_err(|err| ModelgenError::new_parse_error(err, source))?;
        trace!(record:?; "Model record");

        Ok(GraphBuilder::from_record(&record).build())
    }

    /// Renders every generator's output for the graph.
    ///
    /// # Errors
    ///
    /// Returns [`ModelgenError::MissingOutputPath`] if a generator's key has
    /// no configured path, or the first generation error.
    pub fn generate_outputs(&self, graph: &Graph) -> Result<Vec<GeneratedOutput>, ModelgenError> {
        self.generators
            .iter()
            .map(|generator| -> Result<GeneratedOutput, ModelgenError> {
                let key = generator.key();
                let path = self
                    .config
                    .output()
                    .generator_path(key)
                    .ok_or_else(|| ModelgenError::MissingOutputPath(key.to_string()))?;
                let contents = generator.generate(graph)?;
                debug!(generator = key, bytes = contents.len(); "Output generated");

                Ok(GeneratedOutput {
                    key,
                    path,
                    contents,
                })
            })
            .collect()
    }

    /// Diffs two configuration documents and rebuilds the patched one from
    /// the delta.
    pub fn process_configs(&self, original: &Document, patched: &Document) -> ConfigDelta {
        let delta = delta::compute_delta(original, patched);
        let rebuilt = delta::apply_delta(original, &delta);
        info!(
            additions = delta.additions().len(),
            deletions = delta.deletions().len(),
            updates = delta.updates().len();
            "Configuration delta computed"
        );

        ConfigDelta {
            delta,
            patched: rebuilt,
        }
    }
}

/// Parses a flat configuration document.
///
/// # Errors
///
/// Returns [`ModelgenError::Document`] if `source` is not JSON or its top
/// level is not an object. `path` is only used in the message.
pub fn parse_document(source: &str, path: &Path) -> Result<Document, ModelgenError> {
    let value: Value = serde_json::from_str(source)
        .map_err(|err| ModelgenError::new_document_error(path, format!("invalid JSON: {err}")))?;

    match value {
        Value::Object(document) => Ok(document),
        other => Err(ModelgenError::new_document_error(
            path,
            format!("expected a JSON object at the top level, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_requires_object() {
        let path = Path::new("config.json");

        assert!(parse_document(r#"{"a": 1}"#, path).is_ok());

        let err = parse_document("[1, 2]", path).unwrap_err();
        assert!(matches!(err, ModelgenError::Document { .. }));
        assert!(err.to_string().contains("an array"));

        let err = parse_document("{", path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_parse_document_keeps_key_order() {
        let document = parse_document(r#"{"z": 1, "a": 2, "m": 3}"#, Path::new("c.json")).unwrap();

        let keys: Vec<_> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
