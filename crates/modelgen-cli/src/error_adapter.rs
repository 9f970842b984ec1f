//! Rendering of [`ModelgenError`] through miette.
//!
//! A failed run becomes one or more [`Report`]s. A model that cannot be read
//! yields one report per reader diagnostic, each pointing into the model
//! source; every other failure yields a single report with a
//! `modelgen::<kind>` code and, where a fix is obvious, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use modelgen::ModelgenError;
use modelgen_parser::{Span, error::Diagnostic};

/// One report of a failed run.
pub enum Report<'a> {
    /// A reader diagnostic and the model source its labels point into.
    Model { diag: &'a Diagnostic, src: &'a str },
    /// A failure without a source location.
    Run(&'a ModelgenError),
}

impl fmt::Debug for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model { diag, .. } => f.debug_tuple("Model").field(diag).finish(),
            Self::Run(err) => f.debug_tuple("Run").field(err).finish(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model { diag, .. } => f.write_str(diag.message()),
            Self::Run(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model { .. } => None,
            Self::Run(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Self::Model { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Self::Run(err) => Some(Box::new(run_code(err))),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            Self::Model { diag, .. } => diag.help()?,
            Self::Run(err) => run_help(err)?,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Self::Model { src, .. } => Some(src as &dyn SourceCode),
            Self::Run(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Self::Model { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn run_code(err: &ModelgenError) -> &'static str {
    match err {
        ModelgenError::Io(_) => "modelgen::io",
        ModelgenError::Parse { .. } => "modelgen::parse",
        ModelgenError::Traversal(_) => "modelgen::traversal",
        ModelgenError::Serialize(_) => "modelgen::serialize",
        ModelgenError::Document { .. } => "modelgen::document",
        ModelgenError::MissingOutputPath(_) => "modelgen::missing_output_path",
        ModelgenError::Config(_) => "modelgen::config",
    }
}

fn run_help(err: &ModelgenError) -> Option<&'static str> {
    match err {
        ModelgenError::Traversal(_) => Some("mark one class with `isRoot=\"true\"`"),
        ModelgenError::MissingOutputPath(_) => {
            Some("add the generator key to the `[output.generators]` table")
        }
        ModelgenError::Document { .. } => Some("configuration documents must be JSON objects"),
        _ => None,
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits an error into the reports to render, in order.
pub fn reports(err: &ModelgenError) -> Vec<Report<'_>> {
    match err {
        ModelgenError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::Model { diag, src })
            .collect(),
        _ => vec![Report::Run(err)],
    }
}
