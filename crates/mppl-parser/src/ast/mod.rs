//! Typed AST layer on top of the rowan CST.
//!
//! Zero-cost wrappers around `SyntaxNode` with typed accessor methods,
//! following the rust-analyzer pattern: [`AstNode::cast`] is a single kind
//! check and accessors walk the tree directly. The resolver and the type
//! checker navigate through these instead of raw children lists.

pub mod decl;
pub mod expr;
pub mod stmt;

use mppl_common::span::Span;

use crate::cst::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

/// Trait for typed AST nodes that wrap a rowan `SyntaxNode`.
pub trait AstNode: Sized {
    /// Try to cast a generic `SyntaxNode` into this typed AST node.
    fn cast(node: SyntaxNode) -> Option<Self>;

    /// Access the underlying `SyntaxNode`.
    fn syntax(&self) -> &SyntaxNode;
}

/// Generate boilerplate for a typed AST node wrapper.
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            pub(crate) syntax: $crate::cst::SyntaxNode,
        }

        impl $crate::ast::AstNode for $name {
            fn cast(node: $crate::cst::SyntaxNode) -> Option<Self> {
                if node.kind() == $crate::syntax_kind::SyntaxKind::$kind {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &$crate::cst::SyntaxNode {
                &self.syntax
            }
        }
    };
}

pub(crate) use ast_node;

/// Find the first child node that can be cast to type `N`.
pub fn child_node<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

/// Find all child nodes that can be cast to type `N`.
pub fn child_nodes<'a, N: AstNode + 'a>(parent: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    parent.children().filter_map(N::cast)
}

/// Find the first child token with the given kind.
pub fn child_token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|it| it.kind() == kind)
}

/// Find all child tokens with the given kind.
pub fn child_tokens(
    parent: &SyntaxNode,
    kind: SyntaxKind,
) -> impl Iterator<Item = SyntaxToken> + '_ {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(move |it| it.kind() == kind)
}

/// Whether this kind can appear where an expression is expected.
///
/// Literals stay bare tokens in the CST, so an "expression" position holds
/// either an expression node or a literal token.
pub fn is_expr_element(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ENTIRE_VAR
            | SyntaxKind::INDEXED_VAR
            | SyntaxKind::BINARY_EXPR
            | SyntaxKind::UNARY_EXPR
            | SyntaxKind::NOT_EXPR
            | SyntaxKind::PAREN_EXPR
            | SyntaxKind::CAST_EXPR
            | SyntaxKind::NUMBER_LIT
            | SyntaxKind::STRING_LIT
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
    )
}

/// Children of `parent` sitting in expression positions, in order.
pub fn expr_elements(parent: &SyntaxNode) -> impl Iterator<Item = SyntaxElement> + '_ {
    parent
        .children_with_tokens()
        .filter(|element| is_expr_element(element.kind()))
}

/// The nth expression child of `parent`.
pub fn expr_element(parent: &SyntaxNode, index: usize) -> Option<SyntaxElement> {
    expr_elements(parent).nth(index)
}

/// Byte span of a token.
pub fn token_span(token: &SyntaxToken) -> Span {
    let range = token.text_range();
    Span::new(range.start().into(), range.end().into())
}

/// Byte span of a node, with leading trivia trimmed off.
///
/// Node ranges include the leading trivia of their first token; diagnostics
/// and identity maps want the span of the meaningful text.
pub fn trimmed_span(node: &SyntaxNode) -> Span {
    let range = node.text_range();
    let mut start: u32 = range.start().into();
    let mut token = node.first_token();
    while let Some(current) = token {
        if !current.kind().is_trivia() {
            start = current.text_range().start().into();
            break;
        }
        token = current.next_token();
    }
    let end: u32 = range.end().into();
    Span::new(start.min(end), end)
}

/// Byte span of an expression element (trimmed for nodes, exact for
/// tokens).
pub fn element_span(element: &SyntaxElement) -> Span {
    match element {
        rowan::NodeOrToken::Node(node) => trimmed_span(node),
        rowan::NodeOrToken::Token(token) => token_span(token),
    }
}
