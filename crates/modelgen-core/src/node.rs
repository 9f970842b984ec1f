//! Node kinds visited by output producers.
//!
//! Producers walk a [`Graph`] as a stream of [`ModelNode`] values and
//! `match` on the kind. Both the XML and the metadata producer use the same
//! member order for a class: its attributes in declaration order, then its
//! incoming relations (the children nested beneath it) in recorded order.

use crate::model::{Attribute, ClassEntry, ContainmentRelation, Graph};

/// A borrowed element of the class model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelNode<'g> {
    /// A class declaration.
    Class(&'g ClassEntry),
    /// An attribute of the class currently being visited.
    Attribute(&'g Attribute),
    /// A relation in which the class currently being visited is the parent.
    Relation(&'g ContainmentRelation),
}

impl Graph {
    /// Returns the member nodes of a class: attributes first, then the
    /// incoming relations.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::{builder::GraphBuilder, node::ModelNode};
    ///
    /// let mut builder = GraphBuilder::new();
    /// builder
    ///     .declare_class("Program", true, "")
    ///     .declare_class("Course", false, "")
    ///     .add_attribute("Program", "name", "string")
    ///     .add_relation("Course", "Program", "1..*", "1");
    /// let graph = builder.build();
    ///
    /// let program = graph.class("Program").unwrap();
    /// let kinds: Vec<_> = graph
    ///     .members(program)
    ///     .map(|node| matches!(node, ModelNode::Attribute(_)))
    ///     .collect();
    /// assert_eq!(kinds, vec![true, false]);
    /// ```
    pub fn members<'g>(&'g self, class: &'g ClassEntry) -> impl Iterator<Item = ModelNode<'g>> {
        class
            .attributes()
            .iter()
            .map(ModelNode::Attribute)
            .chain(self.incoming_relations(class).map(ModelNode::Relation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    #[test]
    fn test_members_order() {
        let mut builder = GraphBuilder::new();
        builder
            .declare_class("Program", true, "")
            .declare_class("Course", false, "")
            .declare_class("Track", false, "")
            .add_relation("Course", "Program", "1..*", "1")
            .add_attribute("Program", "name", "string")
            .add_relation("Track", "Program", "0..1", "1")
            .add_attribute("Program", "year", "int");
        let graph = builder.build();

        let program = graph.class("Program").unwrap();
        let labels: Vec<String> = graph
            .members(program)
            .map(|node| match node {
                ModelNode::Class(class) => format!("class:{}", class.name()),
                ModelNode::Attribute(attr) => format!("attr:{}", attr.name()),
                ModelNode::Relation(rel) => format!("rel:{}", rel.source()),
            })
            .collect();

        assert_eq!(
            labels,
            vec!["attr:name", "attr:year", "rel:Course", "rel:Track"]
        );
    }

    #[test]
    fn test_members_of_leaf_class() {
        let mut builder = GraphBuilder::new();
        builder.declare_class("Leaf", false, "");
        let graph = builder.build();

        let leaf = graph.class("Leaf").unwrap();
        assert_eq!(graph.members(leaf).count(), 0);
    }
}
