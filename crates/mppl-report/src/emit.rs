//! The diagnostic renderer.
//!
//! Takes one [`Report`] plus the [`Source`] it points into and draws a
//! multi-line annotated excerpt onto a [`Canvas`]:
//!
//! ```text
//! [ERROR] mismatched types
//!    ╭─[sample.mpl:4:3]
//!    │
//!  4 │   x := 'a'
//!    │   ┬    ┬──
//!    │   ╰── `integer`
//!    │        │
//!    │        ╰ expected type `integer`, but found type `char`
//!    │
//! ───╯
//! ```
//!
//! Columns are display columns: tabs advance to the next multiple of the
//! tab width and every other character counts as one column, so multi-byte
//! characters never skew indicator placement.

use std::io::{self, Write};

use mppl_common::source::Source;

use crate::canvas::Canvas;
use crate::report::{Report, Severity};
use crate::term::{AnsiColor, TermColor, TermStyle};

/// Tab stops every four columns unless overridden.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Renders reports onto a writer.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    tab_width: usize,
    styled: bool,
}

/// A display position: 0-based line and tab-expanded column.
#[derive(Debug, Clone, Copy)]
struct DisplayPos {
    line: u32,
    column: usize,
}

/// An annotation with its display positions resolved. `end` points at the
/// last covered column, inclusive.
struct Resolved<'a> {
    message: &'a str,
    start: DisplayPos,
    end: DisplayPos,
}

impl Resolved<'_> {
    fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

/// Portion of a source line covered by an annotation, in display columns,
/// both ends inclusive.
struct LineSegment {
    start: usize,
    end: usize,
}

/// Marker drawn directly under a source line. Inline markers sort before
/// the end and begin arrows of multi-line annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum IndicatorKind {
    Inline,
    End,
    Begin,
}

struct Indicator {
    kind: IndicatorKind,
    column: usize,
    length: usize,
}

/// Stem rising from an indicator toward its label (`End`) or toward the
/// left margin (`Begin` of a multi-line annotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ConnectorKind {
    End,
    Begin,
}

struct Connector {
    annotation: usize,
    kind: ConnectorKind,
    multiline: bool,
    column: usize,
}

fn severity_style(severity: Severity) -> TermStyle {
    match severity {
        Severity::Error => TermStyle::new().strong().fg(TermColor::Bright(AnsiColor::Red)),
        Severity::Warn => TermStyle::new().fg(TermColor::Bright(AnsiColor::Yellow)),
        Severity::Note => TermStyle::new().fg(TermColor::Bright(AnsiColor::Cyan)),
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[ERROR] ",
        Severity::Warn => "[WARN] ",
        Severity::Note => "[NOTE] ",
    }
}

fn faint() -> TermStyle {
    TermStyle::new().faint()
}

fn white() -> TermStyle {
    TermStyle::new().fg(TermColor::Bright(AnsiColor::White))
}

fn red() -> TermStyle {
    TermStyle::new().fg(TermColor::Bright(AnsiColor::Red))
}

fn digits(mut number: usize) -> usize {
    let mut result = 1;
    while number > 9 {
        result += 1;
        number /= 10;
    }
    result
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Emitter {
    pub fn new(styled: bool) -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            styled,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Render one report and write it out.
    pub fn emit(&self, report: &Report, source: &Source, writer: &mut impl Write) -> io::Result<()> {
        let mut annotations: Vec<_> = report.annotations.iter().collect();
        annotations.sort_by_key(|a| (a.start, a.end));

        let resolved: Vec<Resolved<'_>> = annotations
            .iter()
            .map(|a| {
                // The end position points at the last covered byte; a
                // zero-length span is treated as covering one column.
                let last = a.end.max(a.start + 1) - 1;
                Resolved {
                    message: &a.message,
                    start: self.display_location(source, a.start),
                    end: self.display_location(source, last),
                }
            })
            .collect();

        let number_margin = resolved
            .iter()
            .flat_map(|a| [a.start.line, a.end.line])
            .map(|line| digits(line as usize + 1))
            .max()
            .unwrap_or(0);

        let writer_state = WriterState {
            report,
            source,
            annotations: resolved,
            number_margin,
            tab_width: self.tab_width,
        };

        let mut canvas = Canvas::new();
        writer_state.write_head_line(&mut canvas);
        canvas.next_line();
        writer_state.write_location_line(&mut canvas);
        canvas.next_line();
        writer_state.write_interest_lines(&mut canvas);
        canvas.next_line();
        writer_state.write_tail_lines(&mut canvas);
        canvas.next_line();

        canvas.flush(writer, self.styled)
    }

    /// Resolve a byte offset to its display position, expanding tabs.
    fn display_location(&self, source: &Source, offset: u32) -> DisplayPos {
        let location = source.location(offset);
        let line_text = source.line_text(location.line);
        let mut column = 0usize;
        let mut byte = 0usize;
        for ch in line_text.chars() {
            if byte >= location.column as usize {
                break;
            }
            if ch == '\t' {
                column += self.tab_width - column % self.tab_width;
            } else {
                column += 1;
            }
            byte += ch.len_utf8();
        }
        DisplayPos {
            line: location.line,
            column,
        }
    }
}

struct WriterState<'a> {
    report: &'a Report,
    source: &'a Source,
    annotations: Vec<Resolved<'a>>,
    number_margin: usize,
    tab_width: usize,
}

impl WriterState<'_> {
    fn write_head_line(&self, canvas: &mut Canvas) {
        canvas.write(severity_style(self.report.severity), severity_tag(self.report.severity));
        canvas.write(white(), &self.report.message);
    }

    fn write_location_line(&self, canvas: &mut Canvas) {
        let location = self.source.location(self.report.offset);
        canvas.write(faint(), &format!(" {:margin$} ╭─[", "", margin = self.number_margin));
        canvas.write(
            white(),
            &format!(
                "{}:{}:{}",
                self.source.file_name(),
                location.line + 1,
                location.column + 1
            ),
        );
        canvas.write(faint(), "]");
    }

    /// The two-column left margin drawn for each multi-line annotation.
    ///
    /// Shows `│ ` while the annotation is still open on this display row,
    /// `╰─`/`──` when a connect row strikes out toward its label, and
    /// blanks elsewhere.
    fn write_annotation_left(
        &self,
        canvas: &mut Canvas,
        line_number: u32,
        line_column: usize,
        connect: bool,
        style: TermStyle,
    ) {
        let mut strike = false;
        for annotation in self.annotations.iter().filter(|a| a.is_multiline()) {
            if strike {
                canvas.write(style, "──");
            } else if line_number < annotation.start.line || line_number > annotation.end.line {
                canvas.write(style, "  ");
            } else if line_number < annotation.end.line || line_column < annotation.end.column {
                canvas.write(style, "│ ");
            } else if line_column > annotation.end.column {
                canvas.write(style, "  ");
            } else if connect {
                canvas.write(style, "╰─");
                strike = true;
            } else {
                canvas.write(style, "│ ");
            }
        }
    }

    /// Tab-expand one source line into display columns.
    fn expand_line(&self, line_number: u32) -> String {
        let mut expanded = String::new();
        let mut column = 0usize;
        for ch in self.source.line_text(line_number).chars() {
            if ch == '\t' {
                let width = self.tab_width - column % self.tab_width;
                for _ in 0..width {
                    expanded.push(' ');
                }
                column += width;
            } else {
                expanded.push(ch);
                column += 1;
            }
        }
        expanded
    }

    fn write_source_line(&self, canvas: &mut Canvas, line_number: u32) {
        let line = self.expand_line(line_number);
        let line_width = line.chars().count();

        let mut segments = Vec::new();
        for annotation in &self.annotations {
            if annotation.start.line == line_number && annotation.end.line == line_number {
                segments.push(LineSegment {
                    start: annotation.start.column,
                    end: annotation.end.column,
                });
            } else if annotation.start.line == line_number {
                segments.push(LineSegment {
                    start: annotation.start.column,
                    end: line_width,
                });
            } else if annotation.end.line == line_number {
                segments.push(LineSegment {
                    start: 0,
                    end: annotation.end.column,
                });
            }
        }
        segments.sort_by_key(|s| (s.start, std::cmp::Reverse(s.end)));

        canvas.write(
            faint(),
            &format!(" {:>margin$} │ ", line_number + 1, margin = self.number_margin),
        );
        self.write_annotation_left(canvas, line_number, 0, false, TermStyle::default());
        let (line_offset, column_offset) = canvas.position();
        canvas.write(white(), &line);

        for segment in &segments {
            canvas.seek(line_offset, column_offset + segment.start);
            let tinted: String = line
                .chars()
                .skip(segment.start)
                .take(segment.end - segment.start + 1)
                .collect();
            canvas.write(red(), &tinted);
        }
    }

    fn write_indicator_line(&self, canvas: &mut Canvas, line_number: u32) {
        let mut indicators = Vec::new();
        for annotation in &self.annotations {
            if annotation.start.line == line_number && annotation.end.line == line_number {
                indicators.push(Indicator {
                    kind: IndicatorKind::Inline,
                    column: annotation.start.column,
                    length: annotation.end.column - annotation.start.column + 1,
                });
            } else if annotation.start.line == line_number {
                indicators.push(Indicator {
                    kind: IndicatorKind::Begin,
                    column: annotation.start.column,
                    length: 1,
                });
            } else if annotation.end.line == line_number {
                indicators.push(Indicator {
                    kind: IndicatorKind::End,
                    column: annotation.end.column,
                    length: 1,
                });
            }
        }
        indicators.sort_by_key(|i| (i.kind, i.column, std::cmp::Reverse(i.length)));

        canvas.write(
            faint(),
            &format!(" {:margin$} │ ", "", margin = self.number_margin),
        );
        self.write_annotation_left(canvas, line_number, 0, false, TermStyle::default());
        let (line_offset, column_offset) = canvas.position();
        for indicator in &indicators {
            canvas.seek(line_offset, column_offset + indicator.column);
            match indicator.kind {
                IndicatorKind::Inline => {
                    canvas.write(red(), "┬");
                    for _ in 1..indicator.length {
                        canvas.write(red(), "─");
                    }
                }
                IndicatorKind::End | IndicatorKind::Begin => {
                    canvas.write(red(), "▲");
                }
            }
        }
    }

    fn write_annotation_lines(&self, canvas: &mut Canvas, line_number: u32) {
        let mut connectors = Vec::new();
        let mut label_offset: Option<usize> = None;
        for (index, annotation) in self.annotations.iter().enumerate() {
            if annotation.start.line == line_number && annotation.end.line == line_number {
                connectors.push(Connector {
                    annotation: index,
                    kind: ConnectorKind::End,
                    multiline: false,
                    column: annotation.start.column,
                });
            } else if annotation.start.line == line_number {
                connectors.push(Connector {
                    annotation: index,
                    kind: ConnectorKind::Begin,
                    multiline: true,
                    column: annotation.start.column,
                });
            } else if annotation.end.line == line_number {
                connectors.push(Connector {
                    annotation: index,
                    kind: ConnectorKind::End,
                    multiline: true,
                    column: annotation.end.column,
                });
            }

            if annotation.end.line == line_number {
                let column = annotation.end.column;
                label_offset = Some(label_offset.map_or(column, |current| current.min(column)));
            }
        }
        connectors.sort_by_key(|c| (c.kind, c.column));

        let blank_gutter = format!(" {:margin$} │ ", "", margin = self.number_margin);
        canvas.write(faint(), &blank_gutter);
        self.write_annotation_left(canvas, line_number, 0, false, faint());
        let (line_offset, column_offset) = canvas.position();
        for row in 1..(2 * connectors.len()).saturating_sub(1) {
            canvas.next_line();
            canvas.write(faint(), &blank_gutter);
            self.write_annotation_left(canvas, line_number, 0, row % 2 == 1, faint());
        }

        // Rightmost connector first: its stems pass every label row above
        // its own, and labels drawn later may overwrite them.
        for index in (1..=connectors.len()).rev() {
            let connector = &connectors[index - 1];
            let label_row = 2 * index - 2;

            for row in 0..label_row {
                canvas.seek(line_offset + row, column_offset + connector.column);
                canvas.write(red(), "│");
            }
            match connector.kind {
                ConnectorKind::End => {
                    if connector.multiline {
                        canvas.seek(line_offset + label_row, column_offset);
                        for _ in 0..connector.column {
                            canvas.write(red(), "─");
                        }
                        canvas.write(red(), "┴");
                    } else {
                        canvas.seek(line_offset + label_row, column_offset + connector.column);
                        canvas.write(red(), "╰");
                    }
                    let label = label_offset.expect("an end connector implies a label column");
                    for _ in (connector.column + 1)..(label + 3) {
                        canvas.write(red(), "─");
                    }
                    let message = self.annotations[connector.annotation].message;
                    canvas.write(white(), &format!(" {message}"));
                }
                ConnectorKind::Begin => {
                    canvas.seek(line_offset + label_row, column_offset);
                    for _ in 0..connector.column {
                        canvas.write(red(), "─");
                    }
                    canvas.write(red(), "╯");
                }
            }
        }

        // Drawing is seek-based and finishes on the top label row; park the
        // cursor on the block's bottom row so the caller's next_line lands
        // below the block instead of inside it.
        let bottom = line_offset + (2 * connectors.len()).saturating_sub(2);
        canvas.seek(bottom, 0);
    }

    fn write_interest_lines(&self, canvas: &mut Canvas) {
        let Some(start_line) = self.annotations.iter().map(|a| a.start.line).min() else {
            return;
        };
        let end_line = self.annotations.iter().map(|a| a.end.line).max().unwrap_or(start_line);

        let mut previous_line: Option<u32> = None;
        for line in start_line..=end_line {
            let interesting = self
                .annotations
                .iter()
                .any(|a| a.start.line == line || a.end.line == line);
            if !interesting {
                continue;
            }

            if line != start_line {
                canvas.next_line();
            }
            let gutter = if previous_line.is_some_and(|previous| previous + 1 != line) {
                "┆"
            } else {
                "│"
            };
            canvas.write(
                faint(),
                &format!(" {:margin$} {gutter}", "", margin = self.number_margin),
            );
            canvas.next_line();

            self.write_source_line(canvas, line);
            canvas.next_line();
            self.write_indicator_line(canvas, line);
            canvas.next_line();
            self.write_annotation_lines(canvas, line);

            previous_line = Some(line);
        }
    }

    fn write_tail_lines(&self, canvas: &mut Canvas) {
        canvas.write(
            faint(),
            &format!(" {:margin$} │", "", margin = self.number_margin),
        );
        canvas.next_line();
        for _ in 0..self.number_margin + 2 {
            canvas.write(faint(), "─");
        }
        canvas.write(faint(), "╯");
    }
}
