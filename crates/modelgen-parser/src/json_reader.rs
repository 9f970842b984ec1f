//! Reader for the JSON model format.
//!
//! The document deserializes directly into [`ModelRecord`]:
//!
//! ```json
//! {
//!     "classes": {
//!         "Program": {"is_root": true, "documentation": "", "attributes": []}
//!     },
//!     "relations": [
//!         {"source": "Course", "target": "Program",
//!          "source_multiplicity": "1..*", "target_multiplicity": "1"}
//!     ]
//! }
//! ```

use log::info;

use modelgen_core::record::ModelRecord;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    registry::ModelParser,
    span::Span,
};

/// Reads class models from JSON source.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonModelParser;

impl JsonModelParser {
    pub fn new() -> Self {
        Self
    }
}

impl ModelParser for JsonModelParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, source: &str) -> Result<ModelRecord, ParseError> {
        let record: ModelRecord = serde_json::from_str(source)
            .map_err(|err| invalid_model(source, &err))?;

        info!(
            classes = record.class_count(),
            relations = record.relations().len();
            "JSON model read"
        );
        Ok(record)
    }
}

fn invalid_model(source: &str, err: &serde_json::Error) -> Diagnostic {
    let offset = offset_of(source, err.line(), err.column());
    let end = source[offset..]
        .chars()
        .next()
        .map_or(offset, |ch| offset + ch.len_utf8());

    Diagnostic::error(format!("invalid JSON model: {err}"))
        .with_code(ErrorCode::E300)
        .with_label(Span::new(offset..end), ErrorCode::E300.description())
        .with_help("expected an object with `classes` and `relations`")
}

/// Converts a 1-based line and column into a byte offset, clamped to the
/// source length and to a character boundary.
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
