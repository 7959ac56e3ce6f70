//! Rendering tests for the diagnostic emitter.
//!
//! Each test builds a report against a small source, renders it with
//! styling off, and compares the whole block byte for byte.

use mppl_common::source::Source;
use mppl_report::{Emitter, Report};

fn render(report: Report, source: &Source) -> String {
    let mut buf = Vec::new();
    Emitter::new(false)
        .emit(&report, source, &mut buf)
        .expect("rendering cannot fail on a Vec");
    String::from_utf8(buf).expect("renderer output is valid UTF-8")
}

#[test]
fn assignment_mismatch_two_annotations_on_one_line() {
    let source = Source::new(
        "sample.mpl",
        "program sample;\nvar x: integer;\nbegin\n  x := 'a'\nend.\n",
    );
    let report = Report::error(40, "mismatched types")
        .with_annotation(40, 41, "`integer`")
        .with_annotation(45, 48, "expected type `integer`, but found type `char`");

    let expected = concat!(
        "[ERROR] mismatched types\n",
        "   ╭─[sample.mpl:4:3]\n",
        "   │\n",
        " 4 │   x := 'a'\n",
        "   │   ┬    ┬──\n",
        "   │   ╰── `integer`\n",
        "   │        │\n",
        "   │        ╰ expected type `integer`, but found type `char`\n",
        "   │\n",
        "───╯\n",
    );
    assert_eq!(render(report, &source), expected);
}

#[test]
fn annotations_on_distant_lines_use_skip_gutter() {
    let source = Source::new(
        "dup.mpl",
        "program p;\nvar x: integer;\nvar y: char;\nvar x: char;\nbegin end.\n",
    );
    let report = Report::error(44, "conflicting definition of `x`")
        .with_annotation(15, 16, "previous definition of `x`")
        .with_annotation(44, 45, "redefinition of `x`");

    let expected = concat!(
        "[ERROR] conflicting definition of `x`\n",
        "   ╭─[dup.mpl:4:5]\n",
        "   │\n",
        " 2 │ var x: integer;\n",
        "   │     ┬\n",
        "   │     ╰── previous definition of `x`\n",
        "   ┆\n",
        " 4 │ var x: char;\n",
        "   │     ┬\n",
        "   │     ╰── redefinition of `x`\n",
        "   │\n",
        "───╯\n",
    );
    assert_eq!(render(report, &source), expected);
}

#[test]
fn multiline_annotation_draws_margin_and_arrows() {
    let source = Source::new("multi.mpl", "begin\n  x\nend");
    let report = Report::note(0, "block note").with_annotation(0, 13, "whole block");

    let expected = concat!(
        "[NOTE] block note\n",
        "   ╭─[multi.mpl:1:1]\n",
        "   │\n",
        " 1 │ │ begin\n",
        "   │ │ ▲\n",
        "   │ │ ╯\n",
        "   ┆\n",
        " 3 │ │ end\n",
        "   │ │   ▲\n",
        "   │ │ ──┴── whole block\n",
        "   │\n",
        "───╯\n",
    );
    assert_eq!(render(report, &source), expected);
}

#[test]
fn tabs_expand_to_the_next_stop() {
    let source = Source::new("tab.mpl", "\tx := 1\n");
    let report = Report::error(1, "tab column check").with_annotation(1, 2, "here");

    let expected = concat!(
        "[ERROR] tab column check\n",
        "   ╭─[tab.mpl:1:2]\n",
        "   │\n",
        " 1 │     x := 1\n",
        "   │     ┬\n",
        "   │     ╰── here\n",
        "   │\n",
        "───╯\n",
    );
    assert_eq!(render(report, &source), expected);
}

#[test]
fn indicator_column_matches_source_column_without_tabs() {
    // Diagnostic-column stability: on a tab-free line the indicator sits at
    // the annotation's source column.
    let source = Source::new("plain.mpl", "abcdef\n");
    let report = Report::error(3, "anchor").with_annotation(3, 4, "fourth column");
    let rendered = render(report, &source);

    let indicator_line = rendered.lines().nth(4).expect("indicator line exists");
    // Gutter is " 1 │ " (5 columns); the marker lands 3 columns later.
    let marker_col = indicator_line.chars().position(|c| c == '┬').unwrap();
    assert_eq!(marker_col, 5 + 3);
}

#[test]
fn styled_output_wraps_cells_in_sgr() {
    let source = Source::new("s.mpl", "x\n");
    let report = Report::error(0, "boom").with_annotation(0, 1, "here");

    let mut buf = Vec::new();
    Emitter::new(true).emit(&report, &source, &mut buf).unwrap();
    let rendered = String::from_utf8(buf).unwrap();

    // The head tag is bold bright-red, one cell at a time.
    assert!(rendered.starts_with("\x1b[1m\x1b[91m[\x1b[0m"));
    // Styling off renders the same text without any escapes.
    let mut plain = Vec::new();
    Emitter::new(false).emit(&report, &source, &mut plain).unwrap();
    let stripped: String = rendered
        .replace("\x1b[1m", "")
        .replace("\x1b[91m", "")
        .replace("\x1b[97m", "")
        .replace("\x1b[2m", "")
        .replace("\x1b[0m", "");
    assert_eq!(stripped, String::from_utf8(plain).unwrap());
}

#[test]
fn warn_and_note_tags() {
    let source = Source::new("w.mpl", "x\n");
    let warn = render(
        Report::warn(0, "careful").with_annotation(0, 1, "w"),
        &source,
    );
    assert!(warn.starts_with("[WARN] careful\n"));

    let note = render(Report::note(0, "fyi").with_annotation(0, 1, "n"), &source);
    assert!(note.starts_with("[NOTE] fyi\n"));
}
