use mppl_common::span::Span;

/// Index of a [`Def`] in the resolver's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefId(pub(crate) u32);

/// What kind of name a definition binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    Program,
    Procedure,
    Variable,
    Parameter,
}

/// A definition created at a binding occurrence.
///
/// Definitions live in an arena for the rest of the compilation and are
/// compared by [`DefId`]; the spans tie them back to the syntax tree
/// without back-pointers.
#[derive(Debug, Clone)]
pub struct Def {
    pub kind: DefKind,
    pub name: String,
    /// Span of the binding name token.
    pub name_span: Span,
    /// Span of the declaring syntax (the whole declaration node).
    pub decl_span: Span,
}
