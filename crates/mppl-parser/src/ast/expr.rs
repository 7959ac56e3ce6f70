//! Typed wrappers for expressions.
//!
//! Expression positions hold either an expression node or a bare literal
//! token; accessors therefore hand back [`SyntaxElement`]s.

use crate::cst::{SyntaxElement, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

use super::{ast_node, child_token, expr_element};

ast_node!(EntireVar, ENTIRE_VAR);
ast_node!(IndexedVar, INDEXED_VAR);
ast_node!(BinaryExpr, BINARY_EXPR);
ast_node!(UnaryExpr, UNARY_EXPR);
ast_node!(NotExpr, NOT_EXPR);
ast_node!(ParenExpr, PAREN_EXPR);
ast_node!(CastExpr, CAST_EXPR);

const OP_KINDS: [SyntaxKind; 12] = [
    SyntaxKind::EQUAL,
    SyntaxKind::NOTEQ,
    SyntaxKind::LESS,
    SyntaxKind::LESSEQ,
    SyntaxKind::GREATER,
    SyntaxKind::GREATEREQ,
    SyntaxKind::PLUS,
    SyntaxKind::MINUS,
    SyntaxKind::STAR,
    SyntaxKind::DIV_KW,
    SyntaxKind::AND_KW,
    SyntaxKind::OR_KW,
];

impl EntireVar {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }
}

impl IndexedVar {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    /// The index expression between the brackets.
    pub fn index(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }

    pub fn rhs(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 1)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| OP_KINDS.contains(&it.kind()))
    }
}

impl UnaryExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| matches!(it.kind(), SyntaxKind::PLUS | SyntaxKind::MINUS))
    }

    pub fn operand(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }
}

impl NotExpr {
    pub fn not_token(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::NOT_KW)
    }

    pub fn operand(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }
}

impl CastExpr {
    /// The target standard type keyword.
    pub fn ty(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| {
                matches!(
                    it.kind(),
                    SyntaxKind::INTEGER_KW | SyntaxKind::BOOLEAN_KW | SyntaxKind::CHAR_KW
                )
            })
    }

    pub fn operand(&self) -> Option<SyntaxElement> {
        expr_element(&self.syntax, 0)
    }
}
