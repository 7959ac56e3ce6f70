use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A token produced by the MPPL lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Create a new token from a kind and byte offsets.
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

/// Every kind of token in the MPPL language.
///
/// This enum is the complete vocabulary for the lexer: symbols, keywords,
/// literals, identifiers, trivia (whitespace and comments), the EOF token,
/// and the bad-token stand-in produced for lexical errors. `repr(u16)`
/// discriminants double as bit indices for the parser's expected-token set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum TokenKind {
    /// Stand-in for input that failed to lex. Always paired with a
    /// lexical error.
    Bad = 0,

    // ── Literals and identifiers ───────────────────────────────────────
    Ident,
    /// Unsigned decimal number literal.
    Number,
    /// Single-quoted string literal, `''` escapes a quote.
    String,

    // ── Symbols (18) ───────────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `=`
    Equal,
    /// `<>`
    NotEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:=`
    Assign,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semi,

    // ── Keywords (28) ──────────────────────────────────────────────────
    ProgramKw,
    VarKw,
    ArrayKw,
    OfKw,
    BeginKw,
    EndKw,
    IfKw,
    ThenKw,
    ElseKw,
    ProcedureKw,
    ReturnKw,
    CallKw,
    WhileKw,
    DoKw,
    NotKw,
    OrKw,
    DivKw,
    AndKw,
    CharKw,
    IntegerKw,
    BooleanKw,
    ReadKw,
    WriteKw,
    ReadlnKw,
    WritelnKw,
    TrueKw,
    FalseKw,
    BreakKw,

    // ── Special ────────────────────────────────────────────────────────
    /// End of file. Zero-length, carries the trailing trivia.
    Eof,

    // ── Trivia ─────────────────────────────────────────────────────────
    /// A run of spaces, tabs, and newlines.
    Whitespace,
    /// `{ ... }` comment.
    BracesComment,
    /// `/* ... */` comment.
    CComment,
}

impl TokenKind {
    /// Whether this kind is trivia (whitespace or a comment).
    ///
    /// Trivia never reaches the grammar; it is attached to the following
    /// token as leading trivia in the syntax tree.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::BracesComment | TokenKind::CComment
        )
    }
}

impl fmt::Display for TokenKind {
    /// The user-facing name used in "expected ..." diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Bad => "invalid token",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Equal => "`=`",
            TokenKind::NotEq => "`<>`",
            TokenKind::Less => "`<`",
            TokenKind::LessEq => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEq => "`>=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Assign => "`:=`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semi => "`;`",
            TokenKind::ProgramKw => "`program`",
            TokenKind::VarKw => "`var`",
            TokenKind::ArrayKw => "`array`",
            TokenKind::OfKw => "`of`",
            TokenKind::BeginKw => "`begin`",
            TokenKind::EndKw => "`end`",
            TokenKind::IfKw => "`if`",
            TokenKind::ThenKw => "`then`",
            TokenKind::ElseKw => "`else`",
            TokenKind::ProcedureKw => "`procedure`",
            TokenKind::ReturnKw => "`return`",
            TokenKind::CallKw => "`call`",
            TokenKind::WhileKw => "`while`",
            TokenKind::DoKw => "`do`",
            TokenKind::NotKw => "`not`",
            TokenKind::OrKw => "`or`",
            TokenKind::DivKw => "`div`",
            TokenKind::AndKw => "`and`",
            TokenKind::CharKw => "`char`",
            TokenKind::IntegerKw => "`integer`",
            TokenKind::BooleanKw => "`boolean`",
            TokenKind::ReadKw => "`read`",
            TokenKind::WriteKw => "`write`",
            TokenKind::ReadlnKw => "`readln`",
            TokenKind::WritelnKw => "`writeln`",
            TokenKind::TrueKw => "`true`",
            TokenKind::FalseKw => "`false`",
            TokenKind::BreakKw => "`break`",
            TokenKind::Eof => "end of file",
            TokenKind::Whitespace => "whitespace",
            TokenKind::BracesComment => "comment",
            TokenKind::CComment => "comment",
        };
        f.write_str(name)
    }
}

/// Look up a keyword from its text.
///
/// Returns `Some(TokenKind)` if the string is an MPPL keyword, `None`
/// otherwise. The lexer calls this after scanning an identifier-shaped
/// token. Matching is exact and case-sensitive.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "and" => Some(TokenKind::AndKw),
        "array" => Some(TokenKind::ArrayKw),
        "begin" => Some(TokenKind::BeginKw),
        "boolean" => Some(TokenKind::BooleanKw),
        "break" => Some(TokenKind::BreakKw),
        "call" => Some(TokenKind::CallKw),
        "char" => Some(TokenKind::CharKw),
        "div" => Some(TokenKind::DivKw),
        "do" => Some(TokenKind::DoKw),
        "else" => Some(TokenKind::ElseKw),
        "end" => Some(TokenKind::EndKw),
        "false" => Some(TokenKind::FalseKw),
        "if" => Some(TokenKind::IfKw),
        "integer" => Some(TokenKind::IntegerKw),
        "not" => Some(TokenKind::NotKw),
        "of" => Some(TokenKind::OfKw),
        "or" => Some(TokenKind::OrKw),
        "procedure" => Some(TokenKind::ProcedureKw),
        "program" => Some(TokenKind::ProgramKw),
        "read" => Some(TokenKind::ReadKw),
        "readln" => Some(TokenKind::ReadlnKw),
        "return" => Some(TokenKind::ReturnKw),
        "then" => Some(TokenKind::ThenKw),
        "true" => Some(TokenKind::TrueKw),
        "var" => Some(TokenKind::VarKw),
        "while" => Some(TokenKind::WhileKw),
        "write" => Some(TokenKind::WriteKw),
        "writeln" => Some(TokenKind::WritelnKw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_recognizes_all_keywords() {
        let keywords = [
            ("and", TokenKind::AndKw),
            ("array", TokenKind::ArrayKw),
            ("begin", TokenKind::BeginKw),
            ("boolean", TokenKind::BooleanKw),
            ("break", TokenKind::BreakKw),
            ("call", TokenKind::CallKw),
            ("char", TokenKind::CharKw),
            ("div", TokenKind::DivKw),
            ("do", TokenKind::DoKw),
            ("else", TokenKind::ElseKw),
            ("end", TokenKind::EndKw),
            ("false", TokenKind::FalseKw),
            ("if", TokenKind::IfKw),
            ("integer", TokenKind::IntegerKw),
            ("not", TokenKind::NotKw),
            ("of", TokenKind::OfKw),
            ("or", TokenKind::OrKw),
            ("procedure", TokenKind::ProcedureKw),
            ("program", TokenKind::ProgramKw),
            ("read", TokenKind::ReadKw),
            ("readln", TokenKind::ReadlnKw),
            ("return", TokenKind::ReturnKw),
            ("then", TokenKind::ThenKw),
            ("true", TokenKind::TrueKw),
            ("var", TokenKind::VarKw),
            ("while", TokenKind::WhileKw),
            ("write", TokenKind::WriteKw),
            ("writeln", TokenKind::WritelnKw),
        ];

        for (s, expected) in &keywords {
            assert_eq!(
                keyword_from_str(s),
                Some(*expected),
                "keyword_from_str({s:?}) should return Some({expected:?})"
            );
        }

        assert_eq!(keywords.len(), 28, "must test all 28 keywords");
    }

    #[test]
    fn keyword_from_str_rejects_non_keywords() {
        assert_eq!(keyword_from_str("foo"), None);
        assert_eq!(keyword_from_str(""), None);
        assert_eq!(keyword_from_str("PROGRAM"), None); // case-sensitive
        assert_eq!(keyword_from_str("Begin"), None); // case-sensitive
        assert_eq!(keyword_from_str("writelns"), None);
    }

    #[test]
    fn trivia_kinds_identified() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::BracesComment.is_trivia());
        assert!(TokenKind::CComment.is_trivia());

        assert!(!TokenKind::Ident.is_trivia());
        assert!(!TokenKind::Bad.is_trivia());
        assert!(!TokenKind::Eof.is_trivia());
    }

    #[test]
    fn display_names_for_diagnostics() {
        assert_eq!(TokenKind::Ident.to_string(), "identifier");
        assert_eq!(TokenKind::Semi.to_string(), "`;`");
        assert_eq!(TokenKind::ProgramKw.to_string(), "`program`");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
    }

    #[test]
    fn discriminants_fit_in_expected_bitset() {
        // The parser's expected-token set is a u64 indexed by discriminant.
        assert!((TokenKind::CComment as u16) < 64);
    }

    #[test]
    fn token_new_constructor() {
        let tok = Token::new(TokenKind::ProgramKw, 0, 7);
        assert_eq!(tok.kind, TokenKind::ProgramKw);
        assert_eq!(tok.span, Span::new(0, 7));
    }
}
