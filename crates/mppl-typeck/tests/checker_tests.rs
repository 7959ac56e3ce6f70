//! Integration tests for the MPPL type checker.
//!
//! Each test runs the full front half of the pipeline (parse, resolve,
//! check) and asserts on inferred types or on the produced reports.

use insta::assert_snapshot;
use mppl_parser::ast::stmt::AssignStmt;
use mppl_parser::ast::{element_span, token_span, AstNode};
use mppl_parser::parse;
use mppl_resolver::{resolve, DefKind};
use mppl_typeck::{check, CheckResult, Ty};

fn check_source(source: &str) -> (mppl_parser::Parse, CheckResult) {
    let parse = parse(source);
    assert!(
        parse.ok(),
        "test sources must parse: {:?}",
        parse.errors().iter().map(|e| &e.message).collect::<Vec<_>>()
    );
    let resolved = resolve(&parse);
    assert!(
        resolved.ok(),
        "test sources must resolve: {:?}",
        resolved.errors.iter().map(|e| &e.message).collect::<Vec<_>>()
    );
    let result = check(&parse, &resolved.resolution);
    (parse, result)
}

fn messages(result: &CheckResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.message.as_str()).collect()
}

/// Type of the right-hand side of the first assignment in the program.
fn first_assign_rhs_type(parse: &mppl_parser::Parse, result: &CheckResult) -> Ty {
    let assign = parse
        .syntax()
        .descendants()
        .find_map(AssignStmt::cast)
        .expect("an assignment");
    let rhs = assign.rhs().expect("a right-hand side");
    result
        .inference
        .expr_type(element_span(&rhs))
        .expect("rhs is typed")
        .clone()
}

// ── Definition typing ──────────────────────────────────────────────────

#[test]
fn variable_and_procedure_types() {
    let (parse, result) = check_source(
        "program p; var a: array [10] of integer; \
         procedure q(x: integer; c: char); begin end; \
         begin call q(1, 'c') end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);

    let resolved = resolve(&parse);
    let types: Vec<String> = resolved
        .resolution
        .defs()
        .filter(|(_, def)| def.kind != DefKind::Program)
        .map(|(id, _)| result.inference.def_type(id).unwrap().to_string())
        .collect();
    assert_eq!(types.len(), 4);
    assert_snapshot!(types[0], @"array[10] of integer");
    assert_snapshot!(types[1], @"procedure(integer, char)");
    assert_snapshot!(types[2], @"integer");
    assert_snapshot!(types[3], @"char");
}

// ── Literals ───────────────────────────────────────────────────────────

#[test]
fn literal_types() {
    let (parse, result) =
        check_source("program p; var x: integer; begin x := 42 end.");
    assert!(result.ok());
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Integer);

    let (parse, result) = check_source("program p; var c: char; begin c := 'a' end.");
    assert!(result.ok());
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Char);

    // A doubled quote is one character.
    let (parse, result) = check_source("program p; var c: char; begin c := '''' end.");
    assert!(result.ok());
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Char);

    let (parse, result) = check_source("program p; var b: boolean; begin b := true end.");
    assert!(result.ok());
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Boolean);
}

#[test]
fn multi_character_strings_are_not_assignable_to_char() {
    let (_parse, result) = check_source("program p; var c: char; begin c := 'ab' end.");
    assert_eq!(messages(&result), ["mismatched types"]);
    let report = &result.errors[0];
    assert_eq!(report.annotations[0].message, "`char`");
    assert_eq!(
        report.annotations[1].message,
        "expected type `char`, but found type `string`"
    );
}

// ── Operators ──────────────────────────────────────────────────────────

#[test]
fn arithmetic_and_relational_results() {
    let (parse, result) = check_source(
        "program p; var x: integer; var b: boolean; \
         begin x := (1 + 2) * 3 div 4 - 5; b := x <= 10 end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Integer);
}

#[test]
fn boolean_operators() {
    let (_parse, result) = check_source(
        "program p; var b: boolean; begin b := not b and (1 < 2) or false end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);
}

#[test]
fn unary_sign_requires_integer() {
    let (_parse, result) =
        check_source("program p; var x: integer; begin x := -'a' end.");
    assert_eq!(
        messages(&result),
        ["unary operation `-` cannot be applied to `char`"]
    );
    let report = &result.errors[0];
    assert_eq!(
        report.annotations[0].message,
        "unary operation `-` can be applied to `integer`"
    );
    assert_eq!(report.annotations[1].message, "`char`");
}

#[test]
fn arithmetic_rejects_non_integers() {
    let (_parse, result) =
        check_source("program p; var x: integer; begin x := 1 + 'a' end.");
    assert_eq!(
        messages(&result),
        ["binary operation `+` cannot be applied to `char`"]
    );
    let report = &result.errors[0];
    assert_eq!(report.annotations[0].message, "`integer`");
    assert_eq!(
        report.annotations[1].message,
        "binary operation `+` can be applied to `integer`"
    );
    assert_eq!(report.annotations[2].message, "`char`");
}

#[test]
fn relational_operands_must_match() {
    let (_parse, result) =
        check_source("program p; var b: boolean; begin b := 1 < 'a' end.");
    assert_eq!(messages(&result), ["mismatched types"]);
}

#[test]
fn and_requires_booleans() {
    let (_parse, result) =
        check_source("program p; var b: boolean; begin b := 1 and true end.");
    assert_eq!(
        messages(&result),
        ["binary operation `and` cannot be applied to `integer`"]
    );
}

#[test]
fn not_requires_boolean() {
    let (_parse, result) =
        check_source("program p; var b: boolean; begin b := not 1 end.");
    assert_eq!(messages(&result), ["`not` operation cannot be applied to `integer`"]);
    assert_eq!(
        result.errors[0].annotations[0].message,
        "`not` operation can be applied to `boolean`"
    );
}

// ── Casts ──────────────────────────────────────────────────────────────

#[test]
fn casts_between_standard_types() {
    let (parse, result) = check_source(
        "program p; var x: integer; begin x := integer('a') + integer(true) end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Integer);
}

#[test]
fn cast_of_non_standard_operand() {
    let (_parse, result) = check_source(
        "program p; var a: array [5] of integer; var x: integer; \
         begin x := integer(a) end.",
    );
    assert_eq!(messages(&result), ["non-standard type cast"]);
    assert_eq!(
        result.errors[0].annotations[0].message,
        "expression to be cast should be `integer`, `boolean` or `char`"
    );
}

// ── Assignment ─────────────────────────────────────────────────────────

#[test]
fn assignment_type_mismatch() {
    let (parse, result) =
        check_source("program p; var x: integer; begin x := 'a' end.");
    assert_eq!(messages(&result), ["mismatched types"]);

    let report = &result.errors[0];
    assert_eq!(report.annotations.len(), 2);
    assert_eq!(report.annotations[0].message, "`integer`");
    assert_eq!(
        report.annotations[1].message,
        "expected type `integer`, but found type `char`"
    );

    // The annotations sit under `x` and under `'a'`.
    let assign = parse.syntax().descendants().find_map(AssignStmt::cast).unwrap();
    let lhs_span = element_span(&assign.lhs().unwrap());
    assert_eq!(report.annotations[0].start, lhs_span.start);
    assert_eq!(report.annotations[0].end, lhs_span.end);
}

#[test]
fn assignment_to_non_standard_type() {
    let (_parse, result) = check_source(
        "program p; var a: array [5] of integer; begin a := 1 end.",
    );
    assert_eq!(
        messages(&result),
        ["assignment operation cannot be applied to `array[5] of integer`"]
    );
}

// ── Indexing ───────────────────────────────────────────────────────────

#[test]
fn array_indexing() {
    // `a[i]` has the element type.
    let (parse, result) = check_source(
        "program p; var a: array [10] of integer; var i, x: integer; \
         begin x := a[i] end.",
    );
    assert!(result.ok(), "unexpected errors: {:?}", result.errors);
    assert_eq!(first_assign_rhs_type(&parse, &result), Ty::Integer);
}

#[test]
fn array_index_must_be_integer() {
    let (_parse, result) = check_source(
        "program p; var a: array [10] of integer; var x: integer; \
         begin x := a['c'] end.",
    );
    assert_eq!(messages(&result), ["array index should be an `integer`"]);
    assert_eq!(result.errors[0].annotations[0].message, "`char`");
}

#[test]
fn non_array_cannot_be_indexed() {
    let (parse, result) = check_source(
        "program p; var i, x: integer; begin x := i[0] end.",
    );
    assert_eq!(
        messages(&result),
        ["variable of type `integer` cannot be indexed"]
    );
    let report = &result.errors[0];
    assert_eq!(
        report.annotations[0].message,
        "variable to be indexed should be an `array`"
    );

    // Anchored at the `i` token.
    let indexed = parse
        .syntax()
        .descendants()
        .find(|n| n.kind() == mppl_parser::SyntaxKind::INDEXED_VAR)
        .unwrap();
    let name = mppl_parser::ast::expr::IndexedVar::cast(indexed)
        .unwrap()
        .name()
        .unwrap();
    assert_eq!(report.offset, token_span(&name).start);
}

// ── Error accumulation ─────────────────────────────────────────────────

#[test]
fn one_run_reports_every_error() {
    let (_parse, result) = check_source(
        "program p; var x: integer; var b: boolean; \
         begin x := 'a'; b := 1 and true; x := -'z' end.",
    );
    assert_eq!(
        messages(&result),
        [
            "mismatched types",
            "binary operation `and` cannot be applied to `integer`",
            "unary operation `-` cannot be applied to `char`",
        ]
    );
}
