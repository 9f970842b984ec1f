//! Error codes for the modelgen diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - XML lexer errors
//! - `E1xx` - XML document structure errors
//! - `E2xx` - Model extraction errors
//! - `E3xx` - JSON model errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was encountered that cannot start any markup construct.
    E001,

    /// Unterminated comment.
    ///
    /// A `<!--` comment was never closed with `-->`.
    E002,

    /// Unterminated CDATA section.
    ///
    /// A `<![CDATA[` section was never closed with `]]>`.
    E003,

    /// Unterminated declaration.
    ///
    /// A processing instruction or `<!DOCTYPE` declaration was never closed.
    E004,

    /// Malformed tag.
    ///
    /// A start or end tag does not follow `<name attr="value">` syntax.
    E005,

    /// Invalid character reference.
    ///
    /// An `&...;` reference is not one of the predefined entities or a valid
    /// numeric character reference.
    E006,

    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Mismatched closing tag.
    ///
    /// A closing tag names a different element than the innermost open one.
    E100,

    /// Unclosed element.
    ///
    /// The document ended while an element was still open.
    E101,

    /// Unexpected closing tag.
    ///
    /// A closing tag appeared with no element open.
    E102,

    /// Multiple root elements.
    ///
    /// A document must contain exactly one top-level element.
    E103,

    /// Missing root element.
    ///
    /// The document contains no element at all.
    E104,

    /// Text outside the root element.
    ///
    /// Only whitespace, comments and declarations may surround the root.
    E105,

    // =========================================================================
    // Model Errors (E2xx)
    // =========================================================================
    /// Missing required attribute.
    ///
    /// A model element lacks an attribute it cannot be read without.
    E200,

    // =========================================================================
    // JSON Errors (E3xx)
    // =========================================================================
    /// Invalid JSON model.
    ///
    /// The JSON text is malformed or does not have the model record shape.
    E300,
}

impl ErrorCode {
    /// Short description used as the default label text.
    pub fn description(&self) -> &'static str {
        match self {
            Self::E001 => "unexpected character",
            Self::E002 => "unterminated comment",
            Self::E003 => "unterminated CDATA section",
            Self::E004 => "unterminated declaration",
            Self::E005 => "malformed tag",
            Self::E006 => "invalid character reference",
            Self::E100 => "mismatched closing tag",
            Self::E101 => "unclosed element",
            Self::E102 => "unexpected closing tag",
            Self::E103 => "multiple root elements",
            Self::E104 => "missing root element",
            Self::E105 => "text outside root element",
            Self::E200 => "missing required attribute",
            Self::E300 => "invalid JSON model",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_code_name() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E300.to_string(), "E300");
    }

    #[test]
    fn test_description() {
        assert_eq!(ErrorCode::E100.description(), "mismatched closing tag");
    }
}
