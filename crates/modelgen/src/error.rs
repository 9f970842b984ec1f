//! Error types for modelgen operations.
//!
//! This module provides the main error type [`ModelgenError`] which wraps
//! the error conditions that can occur while reading a model, generating
//! outputs and processing configuration documents.

use std::{io, path::PathBuf};

use thiserror::Error;

use modelgen_parser::error::ParseError;

use crate::{export, traverse::TraversalError};

/// The main error type for modelgen operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans. This provides detailed error information that can be used for rich
/// error reporting.
#[derive(Debug, Error)]
pub enum ModelgenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Traversal error: {0}")]
    Traversal(#[from] TraversalError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid document `{path}`: {message}")]
    Document { path: PathBuf, message: String },

    #[error("Output path not defined for generator `{0}`")]
    MissingOutputPath(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<export::Error> for ModelgenError {
    fn from(error: export::Error) -> Self {
        match error {
            export::Error::Traversal(err) => Self::Traversal(err),
            export::Error::Serialize(err) => Self::Serialize(err),
        }
    }
}

impl ModelgenError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Document` error for the file at `path`.
    pub fn new_document_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Document {
            path: path.into(),
            message: message.into(),
        }
    }
}
