//! Element tree assembled from lexer tokens.
//!
//! [`build`] checks tag nesting and produces the single root [`Element`] of a
//! document. Character references in attribute values are decoded here;
//! character data is only checked, since models carry everything in
//! attributes. Comments and declarations are dropped.

use log::trace;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lexer::decode_references,
    span::Span,
    tokens::{PositionedToken, RawAttribute, Token},
};

/// A decoded attribute of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute<'a> {
    pub name: &'a str,
    pub value: String,
}

/// An XML element with its attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    name: &'a str,
    attributes: Vec<Attribute<'a>>,
    children: Vec<Element<'a>>,
    /// Span of the start tag.
    span: Span,
}

impl<'a> Element<'a> {
    fn new(name: &'a str, attributes: Vec<Attribute<'a>>, span: Span) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            span,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[Element<'a>] {
        &self.children
    }

    /// Returns the decoded value of the first attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Returns the direct children with the given name, in document order.
    pub fn children_named<'e>(&'e self, name: &'e str) -> impl Iterator<Item = &'e Element<'a>> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns every descendant (excluding `self`) with the given name, in
    /// document order.
    pub fn descendants_named<'e>(&'e self, name: &str) -> Vec<&'e Element<'a>> {
        let mut found = Vec::new();
        let mut pending: Vec<&Element<'a>> = self.children.iter().rev().collect();
        while let Some(element) = pending.pop() {
            if element.name == name {
                found.push(element);
            }
            pending.extend(element.children.iter().rev());
        }
        found
    }
}

/// Assembles the element tree while tracking open elements.
struct DocumentBuilder<'a> {
    open: Vec<Element<'a>>,
    root: Option<Element<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> DocumentBuilder<'a> {
    fn new() -> Self {
        Self {
            open: Vec::new(),
            root: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn push_token(&mut self, positioned: PositionedToken<'a>) {
        let span = positioned.span;
        match positioned.token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Element::new(name, self.decode_attributes(attributes), span);
                if self_closing {
                    self.close(element);
                } else {
                    self.open.push(element);
                }
            }
            Token::EndTag { name } => self.end_tag(name, span),
            Token::Text(raw) => match decode_references(raw, span) {
                Ok(text) => self.check_text(&text, span),
                Err(diag) => self.diagnostics.emit(diag),
            },
            Token::CData(raw) => self.check_text(raw, span),
            Token::Comment | Token::Declaration => {}
        }
    }

    fn decode_attributes(&mut self, raw: Vec<RawAttribute<'a>>) -> Vec<Attribute<'a>> {
        let mut attributes = Vec::with_capacity(raw.len());
        for attribute in raw {
            match decode_references(attribute.value, attribute.span) {
                Ok(value) => attributes.push(Attribute {
                    name: attribute.name,
                    value: value.into_owned(),
                }),
                Err(diag) => self.diagnostics.emit(diag),
            }
        }
        attributes
    }

    fn end_tag(&mut self, name: &'a str, span: Span) {
        match self.open.pop() {
            Some(element) if element.name == name => self.close(element),
            Some(element) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "closing tag `</{name}>` does not match `<{}>`",
                        element.name
                    ))
                    .with_code(ErrorCode::E100)
                    .with_label(span, ErrorCode::E100.description())
                    .with_secondary_label(element.span, "element opened here")
                    .with_help(format!("close `{}` before closing its parent", element.name)),
                );
                self.close(element);
            }
            None => self.diagnostics.emit(
                Diagnostic::error(format!("closing tag `</{name}>` has no open element"))
                    .with_code(ErrorCode::E102)
                    .with_label(span, ErrorCode::E102.description()),
            ),
        }
    }

    /// Character data is allowed anywhere inside the root, and only as
    /// whitespace outside it.
    fn check_text(&mut self, text: &str, span: Span) {
        if !self.open.is_empty() || text.trim().is_empty() {
            return;
        }
        self.diagnostics.emit(
            Diagnostic::error("text outside the root element")
                .with_code(ErrorCode::E105)
                .with_label(span, ErrorCode::E105.description())
                .with_help("move the text inside an element or remove it"),
        );
    }

    /// Attaches a finished element to its parent, or makes it the root.
    fn close(&mut self, element: Element<'a>) {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(element);
        } else if let Some(root) = &self.root {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "element `<{}>` follows the root element `<{}>`",
                    element.name, root.name
                ))
                .with_code(ErrorCode::E103)
                .with_label(element.span, ErrorCode::E103.description())
                .with_secondary_label(root.span, "root element"),
            );
        } else {
            self.root = Some(element);
        }
    }

    fn finish(mut self, source_len: usize) -> Result<Element<'a>, ParseError> {
        while let Some(element) = self.open.pop() {
            self.diagnostics.emit(
                Diagnostic::error(format!("element `<{}>` is never closed", element.name))
                    .with_code(ErrorCode::E101)
                    .with_label(element.span, ErrorCode::E101.description())
                    .with_help(format!("add `</{}>`", element.name)),
            );
        }

        let root = self.root.take();
        self.diagnostics.finish()?;

        root.ok_or_else(|| {
            Diagnostic::error("document has no root element")
                .with_code(ErrorCode::E104)
                .with_label(Span::new(0..source_len), ErrorCode::E104.description())
                .into()
        })
    }
}

/// Assembles tokens into the document's root element.
pub(crate) fn build<'a>(
    tokens: Vec<PositionedToken<'a>>,
    source_len: usize,
) -> Result<Element<'a>, ParseError> {
    let mut builder = DocumentBuilder::new();
    for token in tokens {
        builder.push_token(token);
    }
    let root = builder.finish(source_len)?;
    trace!(root = root.name(), children = root.children().len(); "XML document assembled");
    Ok(root)
}
