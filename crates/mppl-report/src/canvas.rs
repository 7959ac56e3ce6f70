//! A grid of styled character cells.
//!
//! The renderer draws a diagnostic in several passes (source text first,
//! then tinted segments, indicators, and connectors on top), so it needs
//! random access: [`Canvas::seek`] moves the cursor anywhere and writes
//! overwrite existing cells. One cell is one display column.

use std::io::{self, Write};

use crate::term::{self, TermStyle};

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    style: TermStyle,
}

/// A styled text buffer addressed by (line, column).
#[derive(Debug)]
pub struct Canvas {
    lines: Vec<Vec<Cell>>,
    current_line: usize,
    current_column: usize,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            current_line: 0,
            current_column: 0,
        }
    }

    /// Draw `text` at the cursor with the given style, overwriting any
    /// cells already present and appending past the end of the line.
    ///
    /// `text` must not contain line terminators; use [`Canvas::next_line`].
    pub fn write(&mut self, style: TermStyle, text: &str) {
        for ch in text.chars() {
            debug_assert!(ch != '\n' && ch != '\r', "use next_line() to break lines");
            let line = &mut self.lines[self.current_line];
            let cell = Cell { ch, style };
            if self.current_column < line.len() {
                line[self.current_column] = cell;
            } else {
                line.push(cell);
            }
            self.current_column += 1;
        }
    }

    /// Move the cursor to the start of the next line, growing the grid if
    /// needed.
    pub fn next_line(&mut self) {
        self.current_line += 1;
        self.current_column = 0;
        if self.current_line >= self.lines.len() {
            self.lines.push(Vec::new());
        }
    }

    /// Cursor position as (line, column).
    pub fn position(&self) -> (usize, usize) {
        (self.current_line, self.current_column)
    }

    /// Move the cursor to an absolute position, padding the grid with
    /// default-style spaces up to that cell.
    pub fn seek(&mut self, line: usize, column: usize) {
        self.current_line = line;
        self.current_column = column;

        while self.current_line >= self.lines.len() {
            self.lines.push(Vec::new());
        }
        let line = &mut self.lines[self.current_line];
        while self.current_column > line.len() {
            line.push(Cell {
                ch: ' ',
                style: TermStyle::default(),
            });
        }
    }

    /// Print the whole grid. With `styled` set, every cell is wrapped in
    /// its own style/reset pair; otherwise only the characters are written.
    pub fn flush(&self, writer: &mut impl Write, styled: bool) -> io::Result<()> {
        let mut scratch = [0u8; 4];
        for (index, line) in self.lines.iter().enumerate() {
            for cell in line {
                if styled {
                    term::write_style(writer, &cell.style)?;
                    writer.write_all(cell.ch.encode_utf8(&mut scratch).as_bytes())?;
                    term::write_reset(writer)?;
                } else {
                    writer.write_all(cell.ch.encode_utf8(&mut scratch).as_bytes())?;
                }
            }
            if index + 1 < self.lines.len() {
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()
    }
}
