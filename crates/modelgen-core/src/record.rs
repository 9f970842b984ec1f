//! Plain parsed-record shape of a class model.
//!
//! Model readers produce a [`ModelRecord`]; [`GraphBuilder::from_record`]
//! turns it into an indexed [`Graph`]. The records are not indexed by class:
//! relations are a flat list referring to classes by name.
//!
//! The JSON model format deserializes directly into these types. Keys are
//! snake_case, with camelCase aliases for the fields that XML models spell
//! that way.
//!
//! [`GraphBuilder::from_record`]: crate::builder::GraphBuilder::from_record
//! [`Graph`]: crate::model::Graph

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed model: classes keyed by name plus the relation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(default)]
    classes: IndexMap<String, ClassRecord>,

    #[serde(default)]
    relations: Vec<RelationRecord>,
}

impl ModelRecord {
    /// Creates a record from classes and relations.
    pub fn new(classes: IndexMap<String, ClassRecord>, relations: Vec<RelationRecord>) -> Self {
        Self { classes, relations }
    }

    /// Returns the classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &ClassRecord)> {
        self.classes.iter().map(|(name, class)| (name.as_str(), class))
    }

    /// Returns the number of class records.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the relations in declaration order.
    pub fn relations(&self) -> &[RelationRecord] {
        &self.relations
    }

    /// Adds a class record, replacing any record with the same name.
    ///
    /// A replaced record keeps its position in declaration order, the same
    /// way a repeated key of a JSON model is folded. Returns the replaced
    /// record.
    pub fn insert_class(
        &mut self,
        name: impl Into<String>,
        class: ClassRecord,
    ) -> Option<ClassRecord> {
        self.classes.insert(name.into(), class)
    }

    /// Appends a relation record.
    pub fn push_relation(&mut self, relation: RelationRecord) {
        self.relations.push(relation);
    }
}

/// A parsed class declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(default, alias = "isRoot")]
    is_root: bool,

    #[serde(default)]
    documentation: String,

    #[serde(default)]
    attributes: Vec<AttributeRecord>,
}

impl ClassRecord {
    /// Creates a class record.
    pub fn new(
        is_root: bool,
        documentation: impl Into<String>,
        attributes: Vec<AttributeRecord>,
    ) -> Self {
        Self {
            is_root,
            documentation: documentation.into(),
            attributes,
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    pub fn attributes(&self) -> &[AttributeRecord] {
        &self.attributes
    }
}

/// A parsed attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    name: String,

    #[serde(rename = "type")]
    type_name: String,
}

impl AttributeRecord {
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

/// A parsed containment relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    source: String,
    target: String,

    #[serde(alias = "sourceMultiplicity")]
    source_multiplicity: String,

    #[serde(alias = "targetMultiplicity")]
    target_multiplicity: String,
}

impl RelationRecord {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        source_multiplicity: impl Into<String>,
        target_multiplicity: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_multiplicity: source_multiplicity.into(),
            target_multiplicity: target_multiplicity.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn source_multiplicity(&self) -> &str {
        &self.source_multiplicity
    }

    pub fn target_multiplicity(&self) -> &str {
        &self.target_multiplicity
    }
}
