//! Markup tokens produced by the XML lexer.

use crate::span::Span;

/// An attribute as written in a start tag, before character references are
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawAttribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Span of the value between the quotes.
    pub span: Span,
}

/// A single markup construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    StartTag {
        name: &'a str,
        attributes: Vec<RawAttribute<'a>>,
        self_closing: bool,
    },
    EndTag {
        name: &'a str,
    },
    /// Character data with references still encoded.
    Text(&'a str),
    /// Contents of a `<![CDATA[...]]>` section, taken verbatim.
    CData(&'a str),
    Comment,
    /// `<?...?>` processing instructions and `<!DOCTYPE ...>`.
    Declaration,
}

/// A token paired with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
