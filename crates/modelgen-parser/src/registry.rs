//! Model reader selection by file extension.

use std::{collections::HashMap, fmt, path::Path};

use log::debug;

use modelgen_core::record::ModelRecord;

use crate::{error::ParseError, json_reader::JsonModelParser, xml_reader::XmlModelParser};

/// A reader that turns model source text into a [`ModelRecord`].
pub trait ModelParser: fmt::Debug {
    /// Short name of the format, used in logs.
    fn name(&self) -> &'static str;

    /// Reads a complete model from `source`.
    fn parse(&self, source: &str) -> Result<ModelRecord, ParseError>;
}

/// Keyed set of model readers.
///
/// Extensions are matched case-insensitively. Paths with an unknown or
/// missing extension are read with the fallback reader.
///
/// # Examples
///
/// ```
/// use modelgen_parser::ParserRegistry;
///
/// let registry = ParserRegistry::default();
/// assert_eq!(registry.for_path("model.JSON").name(), "json");
/// assert_eq!(registry.for_path("model.uml").name(), "xml");
/// ```
#[derive(Debug)]
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn ModelParser>>,
    fallback: Box<dyn ModelParser>,
}

impl ParserRegistry {
    /// Creates a registry with no extensions registered.
    pub fn new(fallback: impl ModelParser + 'static) -> Self {
        Self {
            parsers: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Registers a reader for an extension, replacing any previous one.
    pub fn register(&mut self, extension: &str, parser: impl ModelParser + 'static) -> &mut Self {
        self.parsers
            .insert(extension.to_ascii_lowercase(), Box::new(parser));
        self
    }

    /// Returns the reader for an extension (without the leading dot).
    pub fn for_extension(&self, extension: &str) -> &dyn ModelParser {
        match self.parsers.get(&extension.to_ascii_lowercase()) {
            Some(parser) => parser.as_ref(),
            None => {
                debug!(extension = extension; "No reader registered for extension, using fallback");
                self.fallback.as_ref()
            }
        }
    }

    /// Returns the reader for a path based on its extension.
    pub fn for_path(&self, path: impl AsRef<Path>) -> &dyn ModelParser {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        self.for_extension(extension)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut registry = Self::new(XmlModelParser::new());
        registry
            .register("xml", XmlModelParser::new())
            .register("json", JsonModelParser::new());
        registry
    }
}
