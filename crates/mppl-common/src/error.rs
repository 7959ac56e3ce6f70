use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A lexical error with location information.
///
/// Errors are collected alongside the token stream rather than aborting
/// immediately; the offending input still lexes as a bad token of fitting
/// length so the stream remains a complete partition of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    /// Create a new lexical error.
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The specific kind of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LexErrorKind {
    /// A character that matches no lexical rule.
    StrayChar,
    /// A number literal whose value exceeds 32767.
    TooBigNumber,
    /// A string literal not closed before a newline or end of input.
    UnterminatedString,
    /// A non-graphic byte inside a string literal.
    NongraphicChar,
    /// A comment not closed before end of input.
    UnterminatedComment,
    /// A string literal longer than 1023 bytes.
    TooLongString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::StrayChar => "stray character in program",
            Self::TooBigNumber => "number is too big",
            Self::UnterminatedString => "string is unterminated",
            Self::NongraphicChar => "string contains non-graphic character",
            Self::UnterminatedComment => "comment is unterminated",
            Self::TooLongString => "string is too long",
        };
        f.write_str(message)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}
