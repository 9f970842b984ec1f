//! Reader for the XML model format.
//!
//! ```xml
//! <Model>
//!   <Class name="Program" isRoot="true" documentation="Top-level program">
//!     <Attribute name="name" type="string"/>
//!   </Class>
//!   <Aggregation source="Course" target="Program"
//!                sourceMultiplicity="1..*" targetMultiplicity="1"/>
//! </Model>
//! ```
//!
//! `Class` and `Aggregation` elements are collected wherever they appear
//! below the document element, so models exported with package wrappers
//! read the same way as flat ones.

use log::{debug, info};

use modelgen_core::record::{AttributeRecord, ClassRecord, ModelRecord, RelationRecord};

use crate::{
    document::{self, Element},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lexer,
    registry::ModelParser,
};

const CLASS_TAG: &str = "Class";
const ATTRIBUTE_TAG: &str = "Attribute";
const RELATION_TAG: &str = "Aggregation";

/// Multiplicity used when an `Aggregation` omits one of its ends.
const DEFAULT_MULTIPLICITY: &str = "1";

/// Reads class models from XML source.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlModelParser;

impl XmlModelParser {
    pub fn new() -> Self {
        Self
    }
}

impl ModelParser for XmlModelParser {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn parse(&self, source: &str) -> Result<ModelRecord, ParseError> {
        let tokens = lexer::tokenize(source)?;
        let root = document::build(tokens, source.len())?;

        let mut extractor = RecordExtractor::default();
        extractor.extract(&root);
        let record = extractor.finish()?;

        info!(
            classes = record.class_count(),
            relations = record.relations().len();
            "XML model read"
        );
        Ok(record)
    }
}

/// Collects class and relation records from a document, accumulating
/// diagnostics for elements that lack required attributes.
#[derive(Debug, Default)]
struct RecordExtractor {
    record: ModelRecord,
    diagnostics: DiagnosticCollector,
}

impl RecordExtractor {
    fn extract(&mut self, root: &Element<'_>) {
        for class in root.descendants_named(CLASS_TAG) {
            self.class(class);
        }
        for relation in root.descendants_named(RELATION_TAG) {
            self.relation(relation);
        }
    }

    fn class(&mut self, element: &Element<'_>) {
        let name = self.required(element, "name");
        let is_root = element.attribute("isRoot") == Some("true");
        let documentation = element.attribute("documentation").unwrap_or_default();

        let attributes: Vec<_> = element
            .children_named(ATTRIBUTE_TAG)
            .filter_map(|attribute| {
                let attr_name = self.required(attribute, "name");
                let attr_type = self.required(attribute, "type");
                Some(AttributeRecord::new(attr_name?, attr_type?))
            })
            .collect();

        let Some(name) = name else {
            return;
        };
        let class = ClassRecord::new(is_root, documentation, attributes);
        if self.record.insert_class(name, class).is_some() {
            debug!(class = name; "Duplicate class element replaces the earlier one");
        }
    }

    fn relation(&mut self, element: &Element<'_>) {
        let source = self.required(element, "source");
        let target = self.required(element, "target");
        let (Some(source), Some(target)) = (source, target) else {
            return;
        };

        let source_multiplicity = element
            .attribute("sourceMultiplicity")
            .unwrap_or(DEFAULT_MULTIPLICITY);
        let target_multiplicity = element
            .attribute("targetMultiplicity")
            .unwrap_or(DEFAULT_MULTIPLICITY);

        self.record.push_relation(RelationRecord::new(
            source,
            target,
            source_multiplicity,
            target_multiplicity,
        ));
    }

    /// Returns the attribute value, emitting a diagnostic if it is absent.
    fn required<'e>(&mut self, element: &'e Element<'_>, attribute: &str) -> Option<&'e str> {
        let value = element.attribute(attribute);
        if value.is_none() {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "`{}` element is missing the `{attribute}` attribute",
                    element.name()
                ))
                .with_code(ErrorCode::E200)
                .with_label(element.span(), ErrorCode::E200.description())
                .with_help(format!("add `{attribute}=\"...\"` to the element")),
            );
        }
        value
    }

    fn finish(self) -> Result<ModelRecord, ParseError> {
        self.diagnostics.finish()?;
        Ok(self.record)
    }
}
