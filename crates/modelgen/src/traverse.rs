//! Depth-first walks over a class model [`Graph`](modelgen_core::model::Graph).
//!
//! Two independent producers consume the same stream of
//! [`ModelNode`](modelgen_core::node::ModelNode) values and dispatch on the
//! node kind:
//!
//! - [`XmlConfigProducer`] nests each class under its parent, starting from
//!   the root class, and renders every class at most once.
//! - [`MetadataProducer`] emits one flat [`ClassMetadata`] record per
//!   declared class with its cardinality bounds and parameters.
//!
//! Neither producer keeps state between calls; every `produce` call walks
//! the graph from scratch.

mod metadata;
mod xml;

pub use metadata::{ClassMetadata, MetadataProducer, Parameter};
pub use xml::XmlConfigProducer;

use thiserror::Error;

/// Errors raised while walking a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// No class in the graph is flagged as root.
    #[error("no root class found in the model")]
    NoRootClass,
}
