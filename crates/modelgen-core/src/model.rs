//! Class model graph.
//!
//! This module provides the entities of a class diagram and the [`Graph`]
//! that owns them:
//! - [`ClassEntry`]: A modeled class with its attributes and relation indices
//! - [`Attribute`]: A named, typed member of a class
//! - [`ContainmentRelation`]: A "child is nested inside parent" edge
//! - [`RelationIndex`]: Handle to a relation stored in the graph
//!
//! # Containment direction
//!
//! A relation's *source* is the child class and its *target* is the parent
//! class. Each class therefore indexes two lists:
//! - `outgoing`: relations where the class is the child (source). The first
//!   one determines the class's own multiplicity.
//! - `incoming`: relations where the class is the parent (target). These
//!   are the children nested beneath the class.
//!
//! Relations live once in the graph's master list; the per-class lists only
//! hold [`RelationIndex`] handles into it.

use indexmap::IndexMap;

use crate::multiplicity::Multiplicity;

/// Handle to a [`ContainmentRelation`] in the master relation list of a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationIndex(usize);

impl RelationIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }
}

/// A named, typed member of a class.
///
/// The type is a free-form label. XML output uses it as the element text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    type_name: String,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Returns the attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute type label.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A containment edge: instances of `source` are nested inside instances of `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentRelation {
    source: String,
    target: String,
    source_multiplicity: String,
    target_multiplicity: String,
}

impl ContainmentRelation {
    /// Creates a new relation.
    ///
    /// # Arguments
    ///
    /// * `source` - Name of the child class
    /// * `target` - Name of the parent class
    /// * `source_multiplicity` - Cardinality of the child under the parent
    /// * `target_multiplicity` - Cardinality of the parent per child instance
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

    /// Returns the child class name.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parent class name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the raw cardinality of the child under the parent.
    pub fn source_multiplicity(&self) -> &str {
        &self.source_multiplicity
    }

    /// Returns the raw cardinality of the parent per child instance.
    pub fn target_multiplicity(&self) -> &str {
        &self.target_multiplicity
    }
}

/// A modeled class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    name: String,
    is_root: bool,
    documentation: String,
    attributes: Vec<Attribute>,
    outgoing: Vec<RelationIndex>,
    incoming: Vec<RelationIndex>,
}

impl ClassEntry {
    pub(crate) fn new(name: &str, is_root: bool, documentation: &str) -> Self {
        Self {
            name: name.to_string(),
            is_root,
            documentation: documentation.to_string(),
            attributes: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the class is flagged as the model root.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Returns the free-text documentation.
    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    /// Returns the attributes in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the relations where this class is the child, in recorded order.
    pub fn outgoing(&self) -> &[RelationIndex] {
        &self.outgoing
    }

    /// Returns the relations where this class is the parent, in recorded order.
    pub fn incoming(&self) -> &[RelationIndex] {
        &self.incoming
    }

    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub(crate) fn push_outgoing(&mut self, idx: RelationIndex) {
        self.outgoing.push(idx);
    }

    pub(crate) fn push_incoming(&mut self, idx: RelationIndex) {
        self.incoming.push(idx);
    }
}

/// The class table and the master relation list of a model.
///
/// Classes iterate in declaration order. A relation whose endpoint class was
/// never declared stays in [`Graph::relations`] but is absent from that
/// endpoint's index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    classes: IndexMap<String, ClassEntry>,
    relations: Vec<ContainmentRelation>,
}

impl Graph {
    pub(crate) fn new(
        classes: IndexMap<String, ClassEntry>,
        relations: Vec<ContainmentRelation>,
    ) -> Self {
        Self { classes, relations }
    }

    /// Returns the class with the given name, if declared.
    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name)
    }

    /// Returns an iterator over all classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    /// Returns the number of declared classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns all relations in declaration order.
    pub fn relations(&self) -> &[ContainmentRelation] {
        &self.relations
    }

    /// Returns the relation behind an index.
    ///
    /// # Panics
    ///
    /// Panics if the index was not produced by this graph.
    pub fn relation(&self, idx: RelationIndex) -> &ContainmentRelation {
        &self.relations[idx.0]
    }

    /// Returns the relations where `class` is the child.
    pub fn outgoing_relations<'g>(
        &'g self,
        class: &'g ClassEntry,
    ) -> impl Iterator<Item = &'g ContainmentRelation> {
        class.outgoing().iter().map(|idx| self.relation(*idx))
    }

    /// Returns the relations where `class` is the parent.
    pub fn incoming_relations<'g>(
        &'g self,
        class: &'g ClassEntry,
    ) -> impl Iterator<Item = &'g ContainmentRelation> {
        class.incoming().iter().map(|idx| self.relation(*idx))
    }

    /// Returns the first class flagged as root, in declaration order.
    pub fn root(&self) -> Option<&ClassEntry> {
        self.classes().find(|class| class.is_root())
    }

    /// Resolves the cardinality bounds of a class.
    ///
    /// Root classes are always `1..1`. Other classes take the source
    /// multiplicity of their first outgoing relation, and default to `1..1`
    /// when they are not contained anywhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::builder::GraphBuilder;
    ///
    /// let mut builder = GraphBuilder::new();
    /// builder
    ///     .declare_class("Program", true, "")
    ///     .declare_class("Course", false, "")
    ///     .add_relation("Course", "Program", "0..*", "1");
    /// let graph = builder.build();
    ///
    /// let course = graph.class("Course").unwrap();
    /// assert_eq!(graph.multiplicity(course).max(), "*");
    /// ```
    pub fn multiplicity(&self, class: &ClassEntry) -> Multiplicity {
        if class.is_root() {
            return Multiplicity::exactly_one();
        }
        self.outgoing_relations(class)
            .next()
            .map(|relation| Multiplicity::split(relation.source_multiplicity()))
            .unwrap_or_else(Multiplicity::exactly_one)
    }
}
