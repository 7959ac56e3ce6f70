//! Integration tests for the MPPL name resolver.

use mppl_parser::ast::expr::EntireVar;
use mppl_parser::ast::{token_span, AstNode};
use mppl_parser::{parse, SyntaxKind};
use mppl_resolver::{resolve, DefKind, ResolveResult};

fn resolve_source(source: &str) -> (mppl_parser::Parse, ResolveResult) {
    let parse = parse(source);
    assert!(
        parse.ok(),
        "test sources must parse: {:?}",
        parse.errors().iter().map(|e| &e.message).collect::<Vec<_>>()
    );
    let result = resolve(&parse);
    (parse, result)
}

#[test]
fn clean_program_resolves() {
    let (_parse, result) = resolve_source(
        "program p; var x: integer; procedure q(a: integer); begin x := a end; \
         begin x := 1; call q(x) end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);

    let kinds: Vec<DefKind> = result.resolution.defs().map(|(_, def)| def.kind).collect();
    assert_eq!(
        kinds,
        [
            DefKind::Program,
            DefKind::Variable,
            DefKind::Procedure,
            DefKind::Parameter,
        ]
    );
}

#[test]
fn duplicate_variable_in_scope() {
    let (_parse, result) =
        resolve_source("program p; var x: integer; var x: char; begin end.");
    assert_eq!(result.errors.len(), 1);
    let report = &result.errors[0];
    assert_eq!(report.message, "conflicting definition of `x`");
    assert_eq!(report.annotations.len(), 2);
    assert_eq!(report.annotations[0].message, "previous definition of `x`");
    assert_eq!(report.annotations[1].message, "redefinition of `x`");
    // The two annotations point at the two `x` tokens.
    assert!(report.annotations[0].start < report.annotations[1].start);
}

#[test]
fn procedure_conflicts_with_variable_in_same_scope() {
    let (_parse, result) =
        resolve_source("program p; var q: integer; procedure q; begin end; begin end.");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].message, "conflicting definition of `q`");
}

#[test]
fn unresolved_variable_and_procedure() {
    let (_parse, result) = resolve_source("program p; begin x := 1; call q end.");
    let messages: Vec<&str> = result.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["failed to resolve `x`", "failed to resolve `q`"]);
    assert_eq!(
        result.errors[0].annotations[0].message,
        "use of undeclared variable or parameter `x`"
    );
    assert_eq!(
        result.errors[1].annotations[0].message,
        "use of undeclared procedure `q`"
    );
}

#[test]
fn parameter_shadows_outer_variable() {
    let (parse, result) = resolve_source(
        "program p; var x: integer; procedure q(x: char); begin x := 'a' end; \
         begin x := 1 end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);

    // Collect the `x` uses in source order: first inside q, then in main.
    let uses: Vec<_> = parse
        .syntax()
        .descendants()
        .filter_map(EntireVar::cast)
        .filter(|var| var.name().is_some_and(|t| t.text() == "x"))
        .collect();
    assert_eq!(uses.len(), 2);

    let inner = result
        .resolution
        .ref_at(token_span(&uses[0].name().unwrap()))
        .expect("inner use resolves");
    assert_eq!(result.resolution.def(inner).kind, DefKind::Parameter);

    let outer = result
        .resolution
        .ref_at(token_span(&uses[1].name().unwrap()))
        .expect("outer use resolves");
    assert_eq!(result.resolution.def(outer).kind, DefKind::Variable);
}

#[test]
fn program_name_is_not_referenceable() {
    let (_parse, result) = resolve_source("program p; begin p := 1 end.");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].message, "failed to resolve `p`");
}

#[test]
fn direct_recursion_is_reported() {
    let (_parse, result) = resolve_source(
        "program p; procedure q; begin call q end; begin call q end.",
    );
    assert_eq!(result.errors.len(), 1);
    let report = &result.errors[0];
    assert_eq!(report.message, "recursion is prohibited");
    assert_eq!(report.annotations[0].message, "recursive call to `q`");
}

#[test]
fn sibling_calls_are_not_recursion() {
    let (_parse, result) = resolve_source(
        "program p; procedure q; begin end; procedure r; begin call q end; \
         begin call r end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);
}

#[test]
fn references_inside_index_and_arguments_resolve() {
    let (_parse, result) = resolve_source(
        "program p; var a: array [10] of integer; var i: integer; \
         procedure q(v: integer); begin end; \
         begin a[i] := 0; call q(a[i]) end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);
}

#[test]
fn one_run_reports_every_error() {
    let (_parse, result) = resolve_source(
        "program p; var x: integer; var x: integer; begin y := 1; call r end.",
    );
    let messages: Vec<&str> = result.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "conflicting definition of `x`",
            "failed to resolve `y`",
            "failed to resolve `r`",
        ]
    );
}

#[test]
fn binding_scope_is_an_ancestor_of_every_use() {
    // Scope-aware resolution: each recorded reference points at a def whose
    // declaration encloses the use, or sits in the program scope.
    let (parse, result) = resolve_source(
        "program p; var x: integer; procedure q(y: integer); var z: char; \
         begin z := 'c'; x := y end; begin x := 2 end.",
    );
    assert!(result.ok());

    for node in parse.syntax().descendants() {
        if node.kind() != SyntaxKind::ENTIRE_VAR {
            continue;
        }
        let var = EntireVar::cast(node.clone()).unwrap();
        let name = var.name().unwrap();
        let id = result
            .resolution
            .ref_at(token_span(&name))
            .expect("every use resolves");
        let def = result.resolution.def(id);

        // The declaring node's span must cover the use, or the def must
        // live at program level (the outermost scope).
        let use_span = token_span(&name);
        let declared_in_ancestor = node
            .ancestors()
            .any(|ancestor| {
                let range = ancestor.text_range();
                u32::from(range.start()) <= def.decl_span.start
                    && def.decl_span.end <= u32::from(range.end())
            });
        assert!(
            declared_in_ancestor,
            "def for {:?} at {:?} not in an enclosing scope",
            def.name, use_span
        );
    }
}
