//! Lexical analyzer for XML model files.
//!
//! The lexer converts source text into a stream of [`Token`]s: tags with
//! their attributes, character data, CDATA sections, comments and
//! declarations. It covers the subset of XML that model files use; DTD
//! internal subsets and namespaces get no special treatment.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use std::borrow::Cow;

use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, delimited, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_till, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, RawAttribute, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` to provide detailed error
/// messages with codes, help text, and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type LexResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

/// Parse an element or attribute name.
fn name<'a>(input: &mut Input<'a>) -> LexResult<&'a str> {
    (one_of(is_name_start), take_while(0.., is_name_char))
        .take()
        .parse_next(input)
}

/// Parse `<!-- ... -->`.
fn comment<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    let start = input.current_token_start();
    preceded(
        "<!--",
        cut_err(terminated(take_until(0.., "-->"), "-->")).context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "unterminated comment",
            help: Some("close the comment with `-->`"),
            start,
        }),
    )
    .value(Token::Comment)
    .parse_next(input)
}

/// Parse `<![CDATA[ ... ]]>`.
fn cdata<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    let start = input.current_token_start();
    preceded(
        "<![CDATA[",
        cut_err(terminated(take_until(0.., "]]>"), "]]>")).context(LexerDiagnostic {
            code: ErrorCode::E003,
            message: "unterminated CDATA section",
            help: Some("close the section with `]]>`"),
            start,
        }),
    )
    .map(Token::CData)
    .parse_next(input)
}

/// Parse `<!DOCTYPE ...>`. Internal subsets are not supported.
fn doctype<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    let start = input.current_token_start();
    preceded(
        "<!DOCTYPE",
        cut_err(terminated(take_till(0.., '>'), '>')).context(LexerDiagnostic {
            code: ErrorCode::E004,
            message: "unterminated DOCTYPE declaration",
            help: Some("close the declaration with `>`"),
            start,
        }),
    )
    .value(Token::Declaration)
    .parse_next(input)
}

/// Parse `<? ... ?>`, including the XML declaration.
fn processing_instruction<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    let start = input.current_token_start();
    preceded(
        "<?",
        cut_err(terminated(take_until(0.., "?>"), "?>")).context(LexerDiagnostic {
            code: ErrorCode::E004,
            message: "unterminated processing instruction",
            help: Some("close the instruction with `?>`"),
            start,
        }),
    )
    .value(Token::Declaration)
    .parse_next(input)
}

/// Parse a quoted attribute value, returning the raw value and its span.
fn quoted_value<'a>(input: &mut Input<'a>) -> LexResult<(&'a str, Span)> {
    alt((
        delimited('"', take_till(0.., ['"', '<']).with_span(), '"'),
        delimited('\'', take_till(0.., ['\'', '<']).with_span(), '\''),
    ))
    .map(|(value, range)| (value, Span::new(range)))
    .parse_next(input)
}

/// Parse ` name="value"` inside a start tag.
fn attribute<'a>(input: &mut Input<'a>) -> LexResult<RawAttribute<'a>> {
    (multispace1, name, multispace0, '=', multispace0, quoted_value)
        .map(|(_, name, _, _, _, (value, span))| RawAttribute { name, value, span })
        .parse_next(input)
}

fn attributes<'a>(input: &mut Input<'a>) -> LexResult<Vec<RawAttribute<'a>>> {
    repeat(0.., attribute).parse_next(input)
}

/// Parse `</name>`.
fn end_tag<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    let start = input.current_token_start();
    preceded(
        "</",
        cut_err(terminated(name, (multispace0, '>'))).context(LexerDiagnostic {
            code: ErrorCode::E005,
            message: "malformed closing tag",
            help: Some("closing tags look like `</Name>`"),
            start,
        }),
    )
    .map(|name| Token::EndTag { name })
    .parse_next(input)
}

/// Parse `<name attr="value" ...>` or the self-closing `<name .../>`.
fn start_tag<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    let start = input.current_token_start();
    preceded(
        '<',
        cut_err((
            name,
            attributes,
            multispace0,
            alt(("/>".value(true), ">".value(false))),
        ))
        .context(LexerDiagnostic {
            code: ErrorCode::E005,
            message: "malformed tag",
            help: Some("tags look like `<Name attr=\"value\">` or `<Name/>`"),
            start,
        }),
    )
    .map(|(name, attributes, _, self_closing)| Token::StartTag {
        name,
        attributes,
        self_closing,
    })
    .parse_next(input)
}

/// Parse character data up to the next `<`.
fn text<'a>(input: &mut Input<'a>) -> LexResult<Token<'a>> {
    take_till(1.., '<').map(Token::Text).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> LexResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,                // Must come before doctype and cdata
        cdata,                  // Must come before doctype
        doctype,                // Must come before start tags
        processing_instruction, // Must come before start tags
        end_tag,                // Must come before start tags
        start_tag,
        text,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    let source_end = error_pos + input.eof_offset();
                    let diagnostic = Self::convert_err_mode(e, error_pos, source_end);

                    // An unterminated construct swallows the rest of the input
                    let unterminated = matches!(
                        diagnostic.code(),
                        Some(ErrorCode::E002 | ErrorCode::E003 | ErrorCode::E004)
                    );
                    self.diagnostics.emit(diagnostic);
                    if unterminated {
                        break;
                    }

                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E001 (unexpected character) if no diagnostic context is
    /// attached. Spans are widened to at least one byte but never extend past
    /// `source_end`.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
        source_end: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos.max(*start + 1).min(source_end));

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..(error_pos + 1).min(source_end));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E001)
            .with_label(span, ErrorCode::E001.description())
    }
}

/// Tokenize XML source text, collecting multiple errors.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens successfully parsed
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub(crate) fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}

/// Decode predefined entities (`&lt;`, `&gt;`, `&amp;`, `&quot;`, `&apos;`)
/// and numeric character references in character data.
///
/// `span` locates `raw` in the source and is used for error labels.
pub(crate) fn decode_references(raw: &str, span: Span) -> Result<Cow<'_, str>, Diagnostic> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let reference_start = span.start() + (raw.len() - rest.len()) + amp;
        let after = &rest[amp + 1..];

        let Some(semi) = after.find(';') else {
            return Err(invalid_reference(reference_start, after.len() + 1));
        };
        let reference = &after[..semi];
        let ch = match reference {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => reference
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| reference.strip_prefix('#').map(str::parse::<u32>))
                .and_then(Result::ok)
                .and_then(char::from_u32),
        };
        match ch {
            Some(ch) => decoded.push(ch),
            None => return Err(invalid_reference(reference_start, semi + 2)),
        }
        rest = &after[semi + 1..];
    }
    decoded.push_str(rest);

    Ok(Cow::Owned(decoded))
}

fn invalid_reference(start: usize, len: usize) -> Diagnostic {
    Diagnostic::error("invalid character reference")
        .with_code(ErrorCode::E006)
        .with_label(Span::new(start..start + len), ErrorCode::E006.description())
        .with_help("use `&lt;`, `&gt;`, `&amp;`, `&quot;`, `&apos;` or `&#NN;`")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .expect("input should tokenize")
            .into_iter()
            .map(|positioned| positioned.token)
            .collect()
    }

    fn first_code(input: &str) -> Option<ErrorCode> {
        tokenize(input).unwrap_err().diagnostics()[0].code()
    }

    #[test]
    fn test_start_and_end_tags() {
        assert_eq!(
            tokens("<Model></Model>"),
            vec![
                Token::StartTag {
                    name: "Model",
                    attributes: vec![],
                    self_closing: false
                },
                Token::EndTag { name: "Model" },
            ]
        );
    }

    #[test]
    fn test_self_closing_tag_with_attributes() {
        let input = r#"<Attribute name="title" type='string' />"#;
        let toks = tokens(input);

        assert_eq!(toks.len(), 1);
        let Token::StartTag {
            name,
            attributes,
            self_closing,
        } = &toks[0]
        else {
            panic!("Expected start tag, got {:?}", toks[0]);
        };
        assert_eq!(*name, "Attribute");
        assert!(*self_closing);
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name, "name");
        assert_eq!(attributes[0].value, "title");
        assert_eq!(attributes[1].name, "type");
        assert_eq!(attributes[1].value, "string");

        // Value span excludes the quotes
        let span = attributes[0].span;
        assert_eq!(&input[span.start()..span.end()], "title");
    }

    #[test]
    fn test_attribute_spacing_around_equals() {
        let toks = tokens("<Class name = \"A\"\n       isRoot=\"true\">");
        let Token::StartTag { attributes, .. } = &toks[0] else {
            panic!("Expected start tag");
        };
        assert_eq!(attributes[0].value, "A");
        assert_eq!(attributes[1].name, "isRoot");
    }

    #[test]
    fn test_declaration_comment_doctype() {
        let toks = tokens(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE model>\n<!-- a <comment> -->\n<M/>",
        );
        assert_eq!(
            toks,
            vec![
                Token::Declaration,
                Token::Text("\n"),
                Token::Declaration,
                Token::Text("\n"),
                Token::Comment,
                Token::Text("\n"),
                Token::StartTag {
                    name: "M",
                    attributes: vec![],
                    self_closing: true
                },
            ]
        );
    }

    #[test]
    fn test_cdata() {
        let toks = tokens("<a><![CDATA[x < y]]></a>");
        assert_eq!(toks[1], Token::CData("x < y"));
    }

    #[test]
    fn test_token_spans() {
        let input = "<a>text</a>";
        let positioned = tokenize(input).unwrap();

        assert_eq!(positioned[0].span, Span::new(0..3));
        assert_eq!(positioned[1].span, Span::new(3..7));
        assert_eq!(positioned[2].span, Span::new(7..11));
    }

    #[test]
    fn test_unterminated_comment() {
        assert_eq!(first_code("<a><!-- never closed"), Some(ErrorCode::E002));
        // Nothing after the unterminated comment is reported
        assert_eq!(
            tokenize("<a><!-- never closed <b").unwrap_err().diagnostics().len(),
            1
        );
    }

    #[test]
    fn test_unterminated_cdata_and_declaration() {
        assert_eq!(first_code("<![CDATA[ open"), Some(ErrorCode::E003));
        assert_eq!(first_code("<?xml version=\"1.0\""), Some(ErrorCode::E004));
    }

    #[test]
    fn test_malformed_tags() {
        assert_eq!(first_code("<Class name=unquoted>"), Some(ErrorCode::E005));
        assert_eq!(first_code("< Class>"), Some(ErrorCode::E005));
        assert_eq!(first_code("</Class"), Some(ErrorCode::E005));
    }

    #[test]
    fn test_error_recovery_collects_multiple() {
        let err = tokenize("<1a/><ok/><2b/>").unwrap_err();
        assert!(err.diagnostics().len() >= 2);
        assert!(
            err.diagnostics()
                .iter()
                .all(|d| d.code() == Some(ErrorCode::E005) || d.code() == Some(ErrorCode::E001))
        );
    }

    #[test]
    fn test_decode_references() {
        let span = Span::new(0..0);
        assert_eq!(decode_references("plain", span).unwrap(), "plain");
        assert_eq!(
            decode_references("a &lt; b &amp;&amp; c &gt; d", span).unwrap(),
            "a < b && c > d"
        );
        assert_eq!(
            decode_references("&quot;&apos;&#65;&#x42;", span).unwrap(),
            "\"'AB"
        );
    }

    #[test]
    fn test_decode_invalid_references() {
        let err = decode_references("x &bogus; y", Span::new(10..21)).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E006));
        assert_eq!(err.labels()[0].span(), Span::new(12..19));

        let err = decode_references("dangling &amp", Span::new(0..13)).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E006));

        assert!(decode_references("&#xD800;", Span::new(0..8)).is_err());
    }
}
