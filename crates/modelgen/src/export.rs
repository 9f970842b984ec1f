//! Output generators for a class model graph.
//!
//! This module provides the [`OutputGenerator`] trait that turns a built
//! [`Graph`] into the bytes of one output file. Each generator has a stable
//! key that configuration uses to map it to an output path.
//!
//! # Available Generators
//!
//! - [`XmlConfigGenerator`] (`xml-config`) - the nested XML configuration,
//!   indented two spaces per level, without an XML declaration
//! - [`MetaJsonGenerator`] (`meta-json`) - the flat class metadata listing as
//!   a JSON array indented four spaces per level
//!
//! # Error Handling
//!
//! Generation returns [`Error`], which converts into
//! [`ModelgenError`](crate::ModelgenError) at the crate boundary.

use std::fmt;

use log::debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use modelgen_core::model::Graph;

use crate::traverse::{MetadataProducer, TraversalError, XmlConfigProducer};

/// Indentation of every JSON document written by modelgen.
const JSON_INDENT: &[u8] = b"    ";

/// Abstraction for output generators.
pub trait OutputGenerator: fmt::Debug {
    /// Stable key naming this generator in configuration.
    fn key(&self) -> &'static str;

    /// Renders the graph to the bytes of the output file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Traversal`] if the graph cannot be walked, or
    /// [`Error::Serialize`] if the output cannot be encoded.
    fn generate(&self, graph: &Graph) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur while generating output.
#[derive(Debug)]
pub enum Error {
    /// The graph could not be walked.
    Traversal(TraversalError),
    /// The output could not be encoded.
    Serialize(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Traversal(err) => write!(f, "Traversal error: {err}"),
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Traversal(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<TraversalError> for Error {
    fn from(err: TraversalError) -> Self {
        Self::Traversal(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Generates the nested XML configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlConfigGenerator {
    producer: XmlConfigProducer,
}

impl XmlConfigGenerator {
    pub const KEY: &'static str = "xml-config";

    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputGenerator for XmlConfigGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, graph: &Graph) -> Result<Vec<u8>, Error> {
        let mut document = self.producer.produce(graph)?;
        document.indent();
        debug!(elements = document.element_count(); "XML configuration rendered");
        Ok(document.to_xml_string().into_bytes())
    }
}

/// Generates the JSON class metadata listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaJsonGenerator {
    producer: MetadataProducer,
}

impl MetaJsonGenerator {
    pub const KEY: &'static str = "meta-json";

    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputGenerator for MetaJsonGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, graph: &Graph) -> Result<Vec<u8>, Error> {
        let records = self.producer.produce(graph);
        Ok(to_json_pretty(&records)?)
    }
}

/// Returns the default generators, XML configuration first.
pub fn default_generators() -> Vec<Box<dyn OutputGenerator>> {
    vec![
        Box::new(XmlConfigGenerator::new()),
        Box::new(MetaJsonGenerator::new()),
    ]
}

/// Serializes a value as JSON indented four spaces per level.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::builder::GraphBuilder;

    fn program_course() -> Graph {
        let mut builder = GraphBuilder::new();
        builder
            .declare_class("Program", true, "")
            .declare_class("Course", false, "")
            .add_attribute("Course", "title", "string")
            .add_relation("Course", "Program", "1..*", "1");
        builder.build()
    }

    #[test]
    fn test_xml_config_output() {
        let bytes = XmlConfigGenerator::new().generate(&program_course()).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<Program>\n  <Course>\n    <title>string</title>\n  </Course>\n</Program>\n"
        );
    }

    #[test]
    fn test_xml_config_without_root() {
        let mut builder = GraphBuilder::new();
        builder.declare_class("Course", false, "");

        let err = XmlConfigGenerator::new().generate(&builder.build()).unwrap_err();

        assert!(matches!(err, Error::Traversal(TraversalError::NoRootClass)));
    }

    #[test]
    fn test_meta_json_output() {
        let bytes = MetaJsonGenerator::new().generate(&program_course()).unwrap();

        let expected = r#"[
    {
        "class": "Program",
        "documentation": "",
        "isRoot": true,
        "max": "1",
        "min": "1",
        "parameters": [
            {
                "name": "Course",
                "type": "class"
            }
        ]
    },
    {
        "class": "Course",
        "documentation": "",
        "isRoot": false,
        "max": "*",
        "min": "1",
        "parameters": [
            {
                "name": "title",
                "type": "string"
            }
        ]
    }
]"#;
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_empty_parameters_render_inline() {
        let mut builder = GraphBuilder::new();
        builder.declare_class("Solo", true, "");

        let bytes = MetaJsonGenerator::new().generate(&builder.build()).unwrap();

        assert!(String::from_utf8(bytes).unwrap().contains("\"parameters\": []"));
    }

    #[test]
    fn test_default_generator_keys() {
        let keys: Vec<_> = default_generators().iter().map(|g| g.key()).collect();
        assert_eq!(keys, vec!["xml-config", "meta-json"]);
    }
}
