//! MPPL parser: recursive descent over the lexer, producing a rowan-based
//! lossless CST.
//!
//! The tree preserves every byte of the source -- whitespace, comments, and
//! bad tokens included -- so `Parse::syntax().text()` reproduces the input
//! exactly. Missing optional children are explicit `EMPTY` nodes, which
//! keeps child layouts stable for the analysis phases.

pub mod ast;
pub mod cst;
mod parser;
pub mod syntax_kind;

pub use cst::{SyntaxElement, SyntaxNode, SyntaxToken};
pub use syntax_kind::SyntaxKind;

use mppl_lexer::Lexer;
use mppl_report::Report;

/// Result of parsing an MPPL source file.
///
/// Holds the green tree (immutable, cheap to clone) and the reports
/// collected while lexing and parsing. The parser stops at the first
/// syntax error, so there is at most one syntax report, preceded by any
/// lexical reports in source order.
pub struct Parse {
    green: rowan::GreenNode,
    errors: Vec<Report>,
}

impl Parse {
    /// Build the syntax tree root from the green node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Reports collected during lexing and parsing.
    pub fn errors(&self) -> &[Report] {
        &self.errors
    }

    /// Whether parsing completed without errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse an MPPL source file into a CST.
pub fn parse(source: &str) -> Parse {
    let tokens = Lexer::tokenize(source);
    let mut parser = parser::Parser::new(tokens, source);
    parser::parse_program(&mut parser);
    let (green, errors) = parser.finish();
    Parse { green, errors }
}
