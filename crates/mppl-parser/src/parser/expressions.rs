//! Expression rules: the usual MPPL precedence ladder.
//!
//! `expr` (relational) → `simple_expr` (additive, `or`, leading sign) →
//! `term` (multiplicative, `div`, `and`) → `factor`. Left-associative
//! chains are built by taking a checkpoint before the first operand and
//! wrapping with `close_at` after each operator, so `a + b + c` nests as
//! `((a + b) + c)`.

use mppl_common::token::TokenKind;

use crate::syntax_kind::SyntaxKind;

use super::{Parser, STD_TYPE_FIRST};

const REL_OPS: [TokenKind; 6] = [
    TokenKind::Equal,
    TokenKind::NotEq,
    TokenKind::Less,
    TokenKind::LessEq,
    TokenKind::Greater,
    TokenKind::GreaterEq,
];

const ADD_OPS: [TokenKind; 3] = [TokenKind::Plus, TokenKind::Minus, TokenKind::OrKw];

const MUL_OPS: [TokenKind; 3] = [TokenKind::Star, TokenKind::DivKw, TokenKind::AndKw];

/// First set of a factor, recorded for diagnostics before dispatch.
const FACTOR_FIRST: [TokenKind; 10] = [
    TokenKind::Ident,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::TrueKw,
    TokenKind::FalseKw,
    TokenKind::LParen,
    TokenKind::NotKw,
    TokenKind::IntegerKw,
    TokenKind::BooleanKw,
    TokenKind::CharKw,
];

/// `simple-expr { rel-op simple-expr }`
pub(crate) fn parse_expr(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    parse_simple_expr(p);
    while !p.failed() && p.at_any(&REL_OPS) {
        p.advance();
        parse_simple_expr(p);
        p.close_at(checkpoint, SyntaxKind::BINARY_EXPR);
    }
}

/// `[ + | - ] term { add-op term }`
fn parse_simple_expr(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    if p.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
        let m = p.open();
        p.advance();
        parse_term(p);
        p.close(m, SyntaxKind::UNARY_EXPR);
    } else {
        parse_term(p);
    }
    while !p.failed() && p.at_any(&ADD_OPS) {
        p.advance();
        parse_term(p);
        p.close_at(checkpoint, SyntaxKind::BINARY_EXPR);
    }
}

/// `factor { mul-op factor }`
fn parse_term(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    parse_factor(p);
    while !p.failed() && p.at_any(&MUL_OPS) {
        p.advance();
        parse_factor(p);
        p.close_at(checkpoint, SyntaxKind::BINARY_EXPR);
    }
}

/// Literal, variable, parenthesised expression, `not`, or cast.
///
/// Literals stay bare tokens in the tree; everything else gets a node.
fn parse_factor(p: &mut Parser) {
    p.note_expected(&FACTOR_FIRST);
    match p.current() {
        TokenKind::Ident => parse_var(p),

        TokenKind::Number | TokenKind::String | TokenKind::TrueKw | TokenKind::FalseKw => {
            p.advance();
        }

        TokenKind::LParen => {
            let m = p.open();
            p.advance();
            parse_expr(p);
            if !p.failed() {
                p.expect(TokenKind::RParen);
            }
            p.close(m, SyntaxKind::PAREN_EXPR);
        }

        TokenKind::NotKw => {
            let m = p.open();
            p.advance();
            parse_factor(p);
            p.close(m, SyntaxKind::NOT_EXPR);
        }

        TokenKind::IntegerKw | TokenKind::BooleanKw | TokenKind::CharKw => {
            let m = p.open();
            debug_assert!(STD_TYPE_FIRST.contains(&p.current()));
            p.advance();
            p.expect(TokenKind::LParen);
            if !p.failed() {
                parse_expr(p);
            }
            if !p.failed() {
                p.expect(TokenKind::RParen);
            }
            p.close(m, SyntaxKind::CAST_EXPR);
        }

        _ => p.error(),
    }
}

/// `NAME` or `NAME [ expr ]`.
pub(crate) fn parse_var(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::Ident);
    if !p.failed() && p.at(TokenKind::LBracket) {
        p.advance();
        parse_expr(p);
        if !p.failed() {
            p.expect(TokenKind::RBracket);
        }
        p.close(m, SyntaxKind::INDEXED_VAR);
    } else {
        p.close(m, SyntaxKind::ENTIRE_VAR);
    }
}
