//! Error and diagnostic system for the modelgen readers.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! A [`Diagnostic`] represents a single error with an optional error code,
//! labeled source locations and help text. Multiple diagnostics are wrapped
//! in [`ParseError`] when a model cannot be read.
//!
//! # Example
//!
//! ```
//! # use modelgen_parser::error::{Diagnostic, ErrorCode};
//! # use modelgen_parser::Span;
//!
//! let diag = Diagnostic::error("closing tag `</Clas>` does not match `<Class>`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(40..47), "mismatched closing tag")
//!     .with_secondary_label(Span::new(10..17), "element opened here")
//!     .with_help("close `Class` before its parent");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
