//! Nested XML configuration producer.

use std::collections::HashSet;

use log::{debug, trace};

use modelgen_core::{model::Graph, node::ModelNode};

use crate::{element::XmlElement, traverse::TraversalError};

/// Produces the nested XML configuration tree of a graph.
///
/// The walk starts at [`Graph::root`], which becomes the document element.
/// Each class element holds one child per attribute (named after the
/// attribute, with the type as text), followed by the elements of the child
/// classes reached through its incoming relations.
///
/// A class reachable along several containment paths is rendered only at
/// the first position the walk reaches it.
///
/// # Examples
///
/// ```
/// use modelgen::traverse::XmlConfigProducer;
/// use modelgen_core::builder::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder
///     .declare_class("Program", true, "")
///     .declare_class("Course", false, "")
///     .add_attribute("Course", "title", "string")
///     .add_relation("Course", "Program", "1..*", "1");
/// let graph = builder.build();
///
/// let document = XmlConfigProducer::new().produce(&graph).unwrap();
/// assert_eq!(
///     document.to_xml_string(),
///     "<Program><Course><title>string</title></Course></Program>"
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlConfigProducer;

impl XmlConfigProducer {
    pub fn new() -> Self {
        Self
    }

    /// Walks the graph from its root class and returns the document element.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::NoRootClass`] if no class is flagged as
    /// root.
    pub fn produce(&self, graph: &Graph) -> Result<XmlElement, TraversalError> {
        let root = graph.root().ok_or(TraversalError::NoRootClass)?;
        debug!(root = root.name(); "Producing XML configuration");

        let mut walk = XmlWalk::new(graph);
        walk.visit(ModelNode::Class(root));
        walk.document.ok_or(TraversalError::NoRootClass)
    }
}

/// State of one walk. Dropped when the walk ends.
struct XmlWalk<'g> {
    graph: &'g Graph,
    visited: HashSet<&'g str>,
    /// Elements of the classes currently being visited, innermost last.
    open: Vec<XmlElement>,
    document: Option<XmlElement>,
}

impl<'g> XmlWalk<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
            open: Vec::new(),
            document: None,
        }
    }

    fn visit(&mut self, node: ModelNode<'g>) {
        let graph = self.graph;
        match node {
            ModelNode::Class(class) => {
                if !self.visited.insert(class.name()) {
                    trace!(class = class.name(); "Class already rendered");
                    return;
                }

                self.open.push(XmlElement::new(class.name()));
                for member in graph.members(class) {
                    self.visit(member);
                }

                let Some(element) = self.open.pop() else {
                    return;
                };
                match self.open.last_mut() {
                    Some(parent) => parent.push_child(element),
                    None => self.document = Some(element),
                }
            }
            ModelNode::Attribute(attribute) => {
                if let Some(current) = self.open.last_mut() {
                    current.push_child(
                        XmlElement::new(attribute.name()).with_text(attribute.type_name()),
                    );
                }
            }
            ModelNode::Relation(relation) => match graph.class(relation.source()) {
                Some(child) if !self.visited.contains(child.name()) => {
                    self.visit(ModelNode::Class(child));
                }
                Some(_) => {
                    debug!(
                        source = relation.source(),
                        target = relation.target();
                        "Child class already rendered on another path"
                    );
                }
                None => {
                    debug!(
                        source = relation.source(),
                        target = relation.target();
                        "Child class is not declared"
                    );
                }
            },
        }
    }
}
