//! Statement rules.
//!
//! The empty statement is legal wherever a statement is, so `parse_stmt`
//! never fails on its own: when no statement starter is present it emits an
//! `EMPTY` marker and leaves the offending token (if any) to the caller's
//! separator checks.

use mppl_common::token::TokenKind;

use crate::syntax_kind::SyntaxKind;

use super::{expressions, Parser};

/// First set of a (non-empty) statement, recorded for diagnostics before
/// dispatch.
const STMT_FIRST: [TokenKind; 10] = [
    TokenKind::Ident,
    TokenKind::IfKw,
    TokenKind::WhileKw,
    TokenKind::BreakKw,
    TokenKind::CallKw,
    TokenKind::ReturnKw,
    TokenKind::ReadKw,
    TokenKind::ReadlnKw,
    TokenKind::WriteKw,
    TokenKind::WritelnKw,
];

pub(crate) fn parse_stmt(p: &mut Parser) {
    p.note_expected(&STMT_FIRST);
    p.note_expected(&[TokenKind::BeginKw]);
    match p.current() {
        TokenKind::Ident => parse_assign_stmt(p),
        TokenKind::IfKw => parse_if_stmt(p),
        TokenKind::WhileKw => parse_while_stmt(p),
        TokenKind::BreakKw => parse_token_stmt(p, SyntaxKind::BREAK_STMT),
        TokenKind::CallKw => parse_call_stmt(p),
        TokenKind::ReturnKw => parse_token_stmt(p, SyntaxKind::RETURN_STMT),
        TokenKind::ReadKw | TokenKind::ReadlnKw => parse_input_stmt(p),
        TokenKind::WriteKw | TokenKind::WritelnKw => parse_output_stmt(p),
        TokenKind::BeginKw => parse_comp_stmt(p),
        _ => p.empty(),
    }
}

/// `break` and `return`: a single keyword.
fn parse_token_stmt(p: &mut Parser, kind: SyntaxKind) {
    let m = p.open();
    p.advance();
    p.close(m, kind);
}

/// `var := expr`
fn parse_assign_stmt(p: &mut Parser) {
    let m = p.open();
    expressions::parse_var(p);
    if !p.failed() {
        p.expect(TokenKind::Assign);
    }
    if !p.failed() {
        expressions::parse_expr(p);
    }
    p.close(m, SyntaxKind::ASSIGN_STMT);
}

/// `if expr then stmt [ else stmt ]`
fn parse_if_stmt(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::IfKw);
    expressions::parse_expr(p);
    if !p.failed() {
        p.expect(TokenKind::ThenKw);
    }
    if !p.failed() {
        parse_stmt(p);
    }
    if !p.failed() {
        if p.at(TokenKind::ElseKw) {
            p.advance();
            parse_stmt(p);
        } else {
            p.empty();
        }
    }
    p.close(m, SyntaxKind::IF_STMT);
}

/// `while expr do stmt`
fn parse_while_stmt(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::WhileKw);
    expressions::parse_expr(p);
    if !p.failed() {
        p.expect(TokenKind::DoKw);
    }
    if !p.failed() {
        parse_stmt(p);
    }
    p.close(m, SyntaxKind::WHILE_STMT);
}

/// `call NAME [ ( expr { , expr } ) ]`
fn parse_call_stmt(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::CallKw);
    if !p.failed() {
        p.expect(TokenKind::Ident);
    }
    if !p.failed() {
        if p.at(TokenKind::LParen) {
            let args = p.open();
            p.advance();
            expressions::parse_expr(p);
            while !p.failed() && p.eat(TokenKind::Comma) {
                expressions::parse_expr(p);
            }
            if !p.failed() {
                p.expect(TokenKind::RParen);
            }
            p.close(args, SyntaxKind::ACT_PARAM_LIST);
        } else {
            p.empty();
        }
    }
    p.close(m, SyntaxKind::CALL_STMT);
}

/// `read | readln [ ( var { , var } ) ]`
fn parse_input_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // read or readln
    if p.at(TokenKind::LParen) {
        let list = p.open();
        p.advance();
        expressions::parse_var(p);
        while !p.failed() && p.eat(TokenKind::Comma) {
            expressions::parse_var(p);
        }
        if !p.failed() {
            p.expect(TokenKind::RParen);
        }
        p.close(list, SyntaxKind::INPUT_LIST);
    } else {
        p.empty();
    }
    p.close(m, SyntaxKind::INPUT_STMT);
}

/// `write | writeln [ ( value { , value } ) ]`
fn parse_output_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // write or writeln
    if p.at(TokenKind::LParen) {
        let list = p.open();
        p.advance();
        parse_output_value(p);
        while !p.failed() && p.eat(TokenKind::Comma) {
            parse_output_value(p);
        }
        if !p.failed() {
            p.expect(TokenKind::RParen);
        }
        p.close(list, SyntaxKind::OUTPUT_LIST);
    } else {
        p.empty();
    }
    p.close(m, SyntaxKind::OUTPUT_STMT);
}

/// `expr [ : NUMBER ]` -- the optional field width.
fn parse_output_value(p: &mut Parser) {
    let m = p.open();
    expressions::parse_expr(p);
    if !p.failed() {
        if p.at(TokenKind::Colon) {
            p.advance();
            p.expect(TokenKind::Number);
        } else {
            p.empty();
        }
    }
    p.close(m, SyntaxKind::OUTPUT_VALUE);
}

/// `begin stmt { ; stmt } end`
pub(crate) fn parse_comp_stmt(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::BeginKw);
    if !p.failed() {
        parse_stmt(p);
        while !p.failed() && p.eat(TokenKind::Semi) {
            parse_stmt(p);
        }
    }
    if !p.failed() {
        p.expect(TokenKind::EndKw);
    }
    p.close(m, SyntaxKind::COMP_STMT);
}
