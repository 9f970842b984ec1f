//! # Modelgen Parser
//!
//! Readers that turn class model files into a
//! [`ModelRecord`](modelgen_core::record::ModelRecord). Two formats are
//! supported out of the box:
//!
//! - **XML**: `Class`, `Attribute` and `Aggregation` elements, read by a
//!   small error-recovering XML reader.
//! - **JSON**: the record shape itself, deserialized with `serde_json`.
//!
//! Readers are picked by file extension through a [`ParserRegistry`].
//!
//! ## Usage
//!
//! ```
//! # use modelgen_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <Model>
//!           <Class name="Program" isRoot="true"/>
//!           <Class name="Course"/>
//!           <Aggregation source="Course" target="Program"
//!                        sourceMultiplicity="1..*" targetMultiplicity="1"/>
//!         </Model>
//!     "#;
//!
//!     let record = parse(source, "model.xml")?;
//!     assert_eq!(record.class_count(), 2);
//!     Ok(())
//! }
//! ```

mod document;
pub mod error;
mod json_reader;
mod lexer;
mod registry;
mod span;
mod tokens;
mod xml_reader;

pub use error::ParseError;
pub use json_reader::JsonModelParser;
pub use registry::{ModelParser, ParserRegistry};
pub use span::Span;
pub use xml_reader::XmlModelParser;

use std::path::Path;

use modelgen_core::record::ModelRecord;

/// Reads a model with the default reader for `path`'s extension.
///
/// `path` only selects the format; nothing is read from disk.
pub fn parse(source: &str, path: impl AsRef<Path>) -> Result<ModelRecord, ParseError> {
    ParserRegistry::default().for_path(path).parse(source)
}
