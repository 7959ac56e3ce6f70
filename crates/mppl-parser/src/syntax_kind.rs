//! SyntaxKind enum for the MPPL CST.
//!
//! This is a superset of `TokenKind` (mapped to SCREAMING_SNAKE_CASE) plus
//! the `EMPTY` marker and the composite node kinds produced by the parser.

use mppl_common::token::TokenKind;

/// Every kind of syntax element in the MPPL CST.
///
/// Token kinds (leaves) are mapped 1:1 from [`TokenKind`]. Composite node
/// kinds represent parser-produced tree nodes. `TOMBSTONE` is a sentinel
/// used by the event-based parser for not-yet-closed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    /// Placeholder kind for unfinished parser events.
    TOMBSTONE = 0,

    // ── Token kinds ────────────────────────────────────────────────────
    BAD_TOKEN,
    IDENT,
    NUMBER_LIT,
    STRING_LIT,
    PLUS,
    MINUS,
    STAR,
    EQUAL,
    NOTEQ,
    LESS,
    LESSEQ,
    GREATER,
    GREATEREQ,
    LPAREN,
    RPAREN,
    LBRACKET,
    RBRACKET,
    ASSIGN,
    DOT,
    COMMA,
    COLON,
    SEMI,
    PROGRAM_KW,
    VAR_KW,
    ARRAY_KW,
    OF_KW,
    BEGIN_KW,
    END_KW,
    IF_KW,
    THEN_KW,
    ELSE_KW,
    PROCEDURE_KW,
    RETURN_KW,
    CALL_KW,
    WHILE_KW,
    DO_KW,
    NOT_KW,
    OR_KW,
    DIV_KW,
    AND_KW,
    CHAR_KW,
    INTEGER_KW,
    BOOLEAN_KW,
    READ_KW,
    WRITE_KW,
    READLN_KW,
    WRITELN_KW,
    TRUE_KW,
    FALSE_KW,
    BREAK_KW,
    EOF,

    // ── Trivia ─────────────────────────────────────────────────────────
    SPACE_TRIVIA,
    BRACES_COMMENT_TRIVIA,
    C_COMMENT_TRIVIA,

    /// Zero-width placeholder for a missing optional child.
    EMPTY,

    // ── Composite node kinds ───────────────────────────────────────────
    /// Root: `program NAME ; decls compound .`
    PROGRAM,
    /// `var` followed by one or more variable declarations.
    VAR_DECL_PART,
    /// `a, b : integer`
    VAR_DECL,
    /// `array [ 10 ] of integer`
    ARRAY_TYPE,
    /// `procedure NAME (params); var ...; begin ... end ;`
    PROC_DECL,
    /// `( sec ; sec )`
    FML_PARAM_LIST,
    /// `a, b : integer` inside a formal parameter list.
    FML_PARAM_SEC,
    /// `var := expr`
    ASSIGN_STMT,
    /// `if cond then stmt else stmt`
    IF_STMT,
    /// `while cond do stmt`
    WHILE_STMT,
    /// `break`
    BREAK_STMT,
    /// `call NAME (args)`
    CALL_STMT,
    /// `( expr , expr )` after `call NAME`.
    ACT_PARAM_LIST,
    /// `return`
    RETURN_STMT,
    /// `read ( var , var )` or `readln`.
    INPUT_STMT,
    /// Parenthesised variable list of an input statement.
    INPUT_LIST,
    /// `write ( value , value )` or `writeln`.
    OUTPUT_STMT,
    /// Parenthesised value list of an output statement.
    OUTPUT_LIST,
    /// `expr : width` inside an output list.
    OUTPUT_VALUE,
    /// `begin stmt ; stmt end`
    COMP_STMT,
    /// A plain variable reference.
    ENTIRE_VAR,
    /// `NAME [ expr ]`
    INDEXED_VAR,
    /// `lhs op rhs`
    BINARY_EXPR,
    /// Unary `+` or `-` applied to a term.
    UNARY_EXPR,
    /// `not factor`
    NOT_EXPR,
    /// `( expr )`
    PAREN_EXPR,
    /// `integer ( expr )` and friends.
    CAST_EXPR,
}

impl SyntaxKind {
    /// Whether this kind is a leaf token (including trivia and EOF), as
    /// opposed to a composite tree or the `EMPTY` marker.
    pub fn is_token(self) -> bool {
        SyntaxKind::BAD_TOKEN <= self && self <= SyntaxKind::C_COMMENT_TRIVIA
    }

    /// Whether this kind is trivia (whitespace or a comment).
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::SPACE_TRIVIA
                | SyntaxKind::BRACES_COMMENT_TRIVIA
                | SyntaxKind::C_COMMENT_TRIVIA
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Bad => SyntaxKind::BAD_TOKEN,
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Number => SyntaxKind::NUMBER_LIT,
            TokenKind::String => SyntaxKind::STRING_LIT,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Equal => SyntaxKind::EQUAL,
            TokenKind::NotEq => SyntaxKind::NOTEQ,
            TokenKind::Less => SyntaxKind::LESS,
            TokenKind::LessEq => SyntaxKind::LESSEQ,
            TokenKind::Greater => SyntaxKind::GREATER,
            TokenKind::GreaterEq => SyntaxKind::GREATEREQ,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::Assign => SyntaxKind::ASSIGN,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Semi => SyntaxKind::SEMI,
            TokenKind::ProgramKw => SyntaxKind::PROGRAM_KW,
            TokenKind::VarKw => SyntaxKind::VAR_KW,
            TokenKind::ArrayKw => SyntaxKind::ARRAY_KW,
            TokenKind::OfKw => SyntaxKind::OF_KW,
            TokenKind::BeginKw => SyntaxKind::BEGIN_KW,
            TokenKind::EndKw => SyntaxKind::END_KW,
            TokenKind::IfKw => SyntaxKind::IF_KW,
            TokenKind::ThenKw => SyntaxKind::THEN_KW,
            TokenKind::ElseKw => SyntaxKind::ELSE_KW,
            TokenKind::ProcedureKw => SyntaxKind::PROCEDURE_KW,
            TokenKind::ReturnKw => SyntaxKind::RETURN_KW,
            TokenKind::CallKw => SyntaxKind::CALL_KW,
            TokenKind::WhileKw => SyntaxKind::WHILE_KW,
            TokenKind::DoKw => SyntaxKind::DO_KW,
            TokenKind::NotKw => SyntaxKind::NOT_KW,
            TokenKind::OrKw => SyntaxKind::OR_KW,
            TokenKind::DivKw => SyntaxKind::DIV_KW,
            TokenKind::AndKw => SyntaxKind::AND_KW,
            TokenKind::CharKw => SyntaxKind::CHAR_KW,
            TokenKind::IntegerKw => SyntaxKind::INTEGER_KW,
            TokenKind::BooleanKw => SyntaxKind::BOOLEAN_KW,
            TokenKind::ReadKw => SyntaxKind::READ_KW,
            TokenKind::WriteKw => SyntaxKind::WRITE_KW,
            TokenKind::ReadlnKw => SyntaxKind::READLN_KW,
            TokenKind::WritelnKw => SyntaxKind::WRITELN_KW,
            TokenKind::TrueKw => SyntaxKind::TRUE_KW,
            TokenKind::FalseKw => SyntaxKind::FALSE_KW,
            TokenKind::BreakKw => SyntaxKind::BREAK_KW,
            TokenKind::Eof => SyntaxKind::EOF,
            TokenKind::Whitespace => SyntaxKind::SPACE_TRIVIA,
            TokenKind::BracesComment => SyntaxKind::BRACES_COMMENT_TRIVIA,
            TokenKind::CComment => SyntaxKind::C_COMMENT_TRIVIA,
        }
    }
}
