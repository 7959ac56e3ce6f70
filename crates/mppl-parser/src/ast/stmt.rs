//! Typed wrappers for the statements the analysis phases navigate.

use crate::cst::{SyntaxElement, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

use super::{ast_node, child_token, expr_element};

ast_node!(AssignStmt, ASSIGN_STMT);
ast_node!(CallStmt, CALL_STMT);

impl AssignStmt {
    /// The assigned variable.
    pub fn lhs(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }

    /// The assigned value.
    pub fn rhs(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 1)
    }
}

impl CallStmt {
    /// The called procedure's name token.
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }
}
