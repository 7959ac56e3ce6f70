//! Typed wrappers for the program root and declarations.

use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

use super::{ast_node, child_node, child_nodes, child_token, child_tokens};

ast_node!(Program, PROGRAM);
ast_node!(VarDeclPart, VAR_DECL_PART);
ast_node!(VarDecl, VAR_DECL);
ast_node!(ArrayType, ARRAY_TYPE);
ast_node!(ProcDecl, PROC_DECL);
ast_node!(FmlParamList, FML_PARAM_LIST);
ast_node!(FmlParamSec, FML_PARAM_SEC);

/// The declared type of a variable or parameter: a bare standard type
/// keyword or an array type node.
#[derive(Debug, Clone)]
pub enum TypeSyntax {
    Std(SyntaxToken),
    Array(ArrayType),
}

fn std_type_token(parent: &SyntaxNode) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|it| {
            matches!(
                it.kind(),
                SyntaxKind::INTEGER_KW | SyntaxKind::BOOLEAN_KW | SyntaxKind::CHAR_KW
            )
        })
}

fn type_syntax(parent: &SyntaxNode) -> Option<TypeSyntax> {
    if let Some(array) = child_node::<ArrayType>(parent) {
        return Some(TypeSyntax::Array(array));
    }
    std_type_token(parent).map(TypeSyntax::Std)
}

impl Program {
    /// The program name token.
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }
}

impl VarDecl {
    /// Declared names, in source order.
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        child_tokens(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn ty(&self) -> Option<TypeSyntax> {
        type_syntax(&self.syntax)
    }
}

impl ArrayType {
    /// The declared element count token.
    pub fn size(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::NUMBER_LIT)
    }

    /// The element standard type keyword.
    pub fn elem(&self) -> Option<SyntaxToken> {
        std_type_token(&self.syntax)
    }
}

impl ProcDecl {
    /// The procedure name token.
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn param_list(&self) -> Option<FmlParamList> {
        child_node(&self.syntax)
    }
}

impl FmlParamList {
    pub fn secs(&self) -> impl Iterator<Item = FmlParamSec> + '_ {
        child_nodes(&self.syntax)
    }
}

impl FmlParamSec {
    /// Declared parameter names, in source order.
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        child_tokens(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn ty(&self) -> Option<TypeSyntax> {
        type_syntax(&self.syntax)
    }
}
