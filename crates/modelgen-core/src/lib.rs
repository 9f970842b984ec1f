//! Modelgen Core Types and Definitions
//!
//! This crate provides the class model that every modelgen output is derived
//! from. It includes:
//!
//! - **Model**: Classes, attributes, containment relations and the [`model::Graph`]
//!   that owns them
//! - **Builder**: Tolerant, incremental construction of a graph ([`builder::GraphBuilder`])
//! - **Multiplicity**: Cardinality bounds of a containment relation ([`multiplicity::Multiplicity`])
//! - **Record**: The plain parsed-record shape produced by model readers ([`record`] module)
//! - **Node**: The closed set of node kinds visited by output producers ([`node::ModelNode`])

pub mod builder;
pub mod model;
pub mod multiplicity;
pub mod node;
pub mod record;
