//! Flat class metadata producer.

use log::debug;
use serde::{Deserialize, Serialize};

use modelgen_core::{model::Graph, node::ModelNode};

/// Declared type of a parameter that refers to a nested child class.
pub const CLASS_PARAMETER_TYPE: &str = "class";

/// A named, typed parameter of a class in the metadata listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,

    #[serde(rename = "type")]
    type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Metadata record of one class.
///
/// Serializes with the keys `class`, `documentation`, `isRoot`, `max`,
/// `min` and `parameters`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    class: String,
    documentation: String,

    #[serde(rename = "isRoot")]
    is_root: bool,

    max: String,
    min: String,
    parameters: Vec<Parameter>,
}

impl ClassMetadata {
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn min(&self) -> &str {
        &self.min
    }

    pub fn max(&self) -> &str {
        &self.max
    }

    /// Attribute parameters in declaration order, then one
    /// [`CLASS_PARAMETER_TYPE`] parameter per nested child class.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// Produces one [`ClassMetadata`] record per declared class.
///
/// Classes are listed in declaration order, whether or not they are
/// reachable from the root.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataProducer;

impl MetadataProducer {
    pub fn new() -> Self {
        Self
    }

    pub fn produce(&self, graph: &Graph) -> Vec<ClassMetadata> {
        let mut records = Vec::with_capacity(graph.class_count());
        for class in graph.classes() {
            visit(graph, &mut records, ModelNode::Class(class));
        }
        debug!(records = records.len(); "Class metadata produced");
        records
    }
}

fn visit(graph: &Graph, records: &mut Vec<ClassMetadata>, node: ModelNode<'_>) {
    match node {
        ModelNode::Class(class) => {
            let multiplicity = graph.multiplicity(class);
            records.push(ClassMetadata {
                class: class.name().to_string(),
                documentation: class.documentation().to_string(),
                is_root: class.is_root(),
                max: multiplicity.max().to_string(),
                min: multiplicity.min().to_string(),
                parameters: Vec::new(),
            });
            for member in graph.members(class) {
                visit(graph, records, member);
            }
        }
        ModelNode::Attribute(attribute) => {
            if let Some(current) = records.last_mut() {
                current
                    .parameters
                    .push(Parameter::new(attribute.name(), attribute.type_name()));
            }
        }
        ModelNode::Relation(relation) => {
            if let Some(current) = records.last_mut() {
                current
                    .parameters
                    .push(Parameter::new(relation.source(), CLASS_PARAMETER_TYPE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::builder::GraphBuilder;

    fn program_course() -> Graph {
        let mut builder = GraphBuilder::new();
        builder
            .declare_class("Program", true, "Top-level program")
            .declare_class("Course", false, "")
            .add_attribute("Course", "title", "string")
            .add_relation("Course", "Program", "1..*", "1");
        builder.build()
    }

    #[test]
    fn test_program_course() {
        let records = MetadataProducer::new().produce(&program_course());

        assert_eq!(records.len(), 2);

        let program = &records[0];
        assert_eq!(program.class(), "Program");
        assert_eq!(program.documentation(), "Top-level program");
        assert!(program.is_root());
        assert_eq!((program.min(), program.max()), ("1", "1"));
        assert_eq!(program.parameters(), &[Parameter::new("Course", "class")]);

        let course = &records[1];
        assert_eq!(course.class(), "Course");
        assert!(!course.is_root());
        assert_eq!((course.min(), course.max()), ("1", "*"));
        assert_eq!(course.parameters(), &[Parameter::new("title", "string")]);
    }

    #[test]
    fn test_serialized_field_names_and_order() {
        let records = MetadataProducer::new().produce(&program_course());

        let json = serde_json::to_string(&records[1]).unwrap();
        assert_eq!(
            json,
            r#"{"class":"Course","documentation":"","isRoot":false,"max":"*","min":"1","parameters":[{"name":"title","type":"string"}]}"#
        );
    }

    #[test]
    fn test_every_class_listed_regardless_of_reachability() {
        let mut builder = GraphBuilder::new();
        builder
            .declare_class("Orphan", false, "")
            .declare_class("Root", true, "")
            .declare_class("Island", false, "")
            .add_relation("Island", "Orphan", "0..1", "1");
        let records = MetadataProducer::new().produce(&builder.build());

        let names: Vec<_> = records.iter().map(ClassMetadata::class).collect();
        assert_eq!(names, vec!["Orphan", "Root", "Island"]);
        assert_eq!(records[0].parameters(), &[Parameter::new("Island", "class")]);
        assert_eq!((records[2].min(), records[2].max()), ("0", "1"));
    }

    #[test]
    fn test_dangling_child_is_still_a_parameter() {
        let mut builder = GraphBuilder::new();
        builder
            .declare_class("Root", true, "")
            .add_attribute("Root", "id", "int")
            .add_relation("Ghost", "Root", "1", "1");
        let records = MetadataProducer::new().produce(&builder.build());

        assert_eq!(
            records[0].parameters(),
            &[Parameter::new("id", "int"), Parameter::new("Ghost", "class")]
        );
    }

    #[test]
    fn test_no_root_is_not_an_error() {
        let mut builder = GraphBuilder::new();
        builder.declare_class("Loose", false, "");
        let records = MetadataProducer::new().produce(&builder.build());

        assert_eq!(records.len(), 1);
        assert_eq!((records[0].min(), records[0].max()), ("1", "1"));
    }
}
