//! Incremental construction of a [`Graph`].
//!
//! [`GraphBuilder`] accepts class, attribute and relation declarations in any
//! order and never fails: duplicate classes are ignored, attributes for
//! undeclared classes are dropped, and relations with undeclared endpoints
//! are kept in the master list without being indexed on the missing side.

use indexmap::IndexMap;
use log::{debug, info};

use crate::{
    model::{Attribute, ClassEntry, ContainmentRelation, Graph, RelationIndex},
    record::ModelRecord,
};

/// Builder for a class model [`Graph`].
///
/// The builder is consumed by [`GraphBuilder::build`], so each builder
/// produces exactly one graph.
///
/// # Examples
///
/// ```
/// use modelgen_core::builder::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder
///     .declare_class("Program", true, "Top-level program")
///     .declare_class("Course", false, "")
///     .add_attribute("Course", "title", "string")
///     .add_relation("Course", "Program", "1..*", "1");
///
/// let graph = builder.build();
/// assert_eq!(graph.class_count(), 2);
/// assert_eq!(graph.relations().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    classes: IndexMap<String, ClassEntry>,
    relations: Vec<ContainmentRelation>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder populated from a parsed model record.
    ///
    /// All classes (with their attributes) are declared first, in record
    /// order, followed by all relations in record order.
    pub fn from_record(record: &ModelRecord) -> Self {
        let mut builder = Self::new();
        for (name, class) in record.classes() {
            builder.declare_class(name, class.is_root(), class.documentation());
            for attribute in class.attributes() {
                builder.add_attribute(name, attribute.name(), attribute.type_name());
            }
        }
        for relation in record.relations() {
            builder.add_relation(
                relation.source(),
                relation.target(),
                relation.source_multiplicity(),
                relation.target_multiplicity(),
            );
        }
        builder
    }

    /// Declares a class.
    ///
    /// The first declaration of a name wins; later declarations are no-ops
    /// and keep the existing flags, documentation and attributes.
    pub fn declare_class(&mut self, name: &str, is_root: bool, documentation: &str) -> &mut Self {
        if self.classes.contains_key(name) {
            debug!(class = name; "Ignoring duplicate class declaration");
        } else {
            self.classes
                .insert(name.to_string(), ClassEntry::new(name, is_root, documentation));
        }
        self
    }

    /// Appends an attribute to a declared class.
    ///
    /// Does nothing if `class_name` was never declared.
    pub fn add_attribute(&mut self, class_name: &str, attr_name: &str, attr_type: &str) -> &mut Self {
        match self.classes.get_mut(class_name) {
            Some(class) => class.push_attribute(Attribute::new(attr_name, attr_type)),
            None => {
                debug!(class = class_name, attribute = attr_name; "Dropping attribute of undeclared class")
            }
        }
        self
    }

    /// Appends a containment relation.
    ///
    /// The relation always lands in the master list. It is indexed as
    /// outgoing on `source` and as incoming on `target` only for endpoints
    /// that are already declared.
    pub fn add_relation(
        &mut self,
        source: &str,
        target: &str,
        source_multiplicity: &str,
        target_multiplicity: &str,
    ) -> &mut Self {
        self.relations.push(ContainmentRelation::new(
            source,
            target,
            source_multiplicity,
            target_multiplicity,
        ));
        let idx = RelationIndex::new(self.relations.len() - 1);

        match self.classes.get_mut(source) {
            Some(class) => class.push_outgoing(idx),
            None => debug!(source = source, target = target; "Relation source class is not declared"),
        }
        match self.classes.get_mut(target) {
            Some(class) => class.push_incoming(idx),
            None => debug!(source = source, target = target; "Relation target class is not declared"),
        }
        self
    }

    /// Finishes construction and returns the graph.
    pub fn build(self) -> Graph {
        info!(
            classes = self.classes.len(),
            relations = self.relations.len();
            "Model graph built"
        );
        Graph::new(self.classes, self.relations)
    }
}
