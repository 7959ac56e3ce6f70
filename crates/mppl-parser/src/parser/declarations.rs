//! Declaration rules: variable declaration parts, procedure declarations,
//! formal parameter lists, and type syntax.

use mppl_common::token::TokenKind;

use crate::syntax_kind::SyntaxKind;

use super::{statements, Parser, STD_TYPE_FIRST};

/// `var var-decl ; { var-decl ; }`
pub(crate) fn parse_var_decl_part(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::VarKw);
    loop {
        parse_var_decl(p);
        if !p.failed() {
            p.expect(TokenKind::Semi);
        }
        if p.failed() || !p.at(TokenKind::Ident) {
            break;
        }
    }
    p.close(m, SyntaxKind::VAR_DECL_PART);
}

/// `NAME { , NAME } : type`
fn parse_var_decl(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::Ident);
    while !p.failed() && p.eat(TokenKind::Comma) {
        p.expect(TokenKind::Ident);
    }
    if !p.failed() {
        p.expect(TokenKind::Colon);
    }
    if !p.failed() {
        parse_type(p);
    }
    p.close(m, SyntaxKind::VAR_DECL);
}

/// A standard type keyword (kept as a bare token) or an array type.
pub(crate) fn parse_type(p: &mut Parser) {
    if p.at_any(&STD_TYPE_FIRST) {
        p.advance();
    } else if p.at(TokenKind::ArrayKw) {
        parse_array_type(p);
    } else {
        p.error();
    }
}

/// `array [ NUMBER ] of std-type`
fn parse_array_type(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::ArrayKw);
    p.expect(TokenKind::LBracket);
    if !p.failed() {
        p.expect(TokenKind::Number);
    }
    if !p.failed() {
        p.expect(TokenKind::RBracket);
    }
    if !p.failed() {
        p.expect(TokenKind::OfKw);
    }
    if !p.failed() {
        if p.at_any(&STD_TYPE_FIRST) {
            p.advance();
        } else {
            p.error();
        }
    }
    p.close(m, SyntaxKind::ARRAY_TYPE);
}

/// `procedure NAME [ formal-params ] ; [ var-part ] compound ;`
///
/// Missing optional parts leave `EMPTY` markers so the child layout is
/// stable.
pub(crate) fn parse_proc_decl(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::ProcedureKw);
    if !p.failed() {
        p.expect(TokenKind::Ident);
    }
    if !p.failed() {
        if p.at(TokenKind::LParen) {
            parse_fml_param_list(p);
        } else {
            p.empty();
        }
    }
    if !p.failed() {
        p.expect(TokenKind::Semi);
    }
    if !p.failed() {
        if p.at(TokenKind::VarKw) {
            parse_var_decl_part(p);
        } else {
            p.empty();
        }
    }
    if !p.failed() {
        statements::parse_comp_stmt(p);
    }
    if !p.failed() {
        p.expect(TokenKind::Semi);
    }
    p.close(m, SyntaxKind::PROC_DECL);
}

/// `( sec { ; sec } )`
fn parse_fml_param_list(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::LParen);
    parse_fml_param_sec(p);
    while !p.failed() && p.eat(TokenKind::Semi) {
        parse_fml_param_sec(p);
    }
    if !p.failed() {
        p.expect(TokenKind::RParen);
    }
    p.close(m, SyntaxKind::FML_PARAM_LIST);
}

/// `NAME { , NAME } : type`
fn parse_fml_param_sec(p: &mut Parser) {
    let m = p.open();
    p.expect(TokenKind::Ident);
    while !p.failed() && p.eat(TokenKind::Comma) {
        p.expect(TokenKind::Ident);
    }
    if !p.failed() {
        p.expect(TokenKind::Colon);
    }
    if !p.failed() {
        parse_type(p);
    }
    p.close(m, SyntaxKind::FML_PARAM_SEC);
}
