//! Terminal style model and SGR emission.
//!
//! Styles are value types attached to canvas cells; nothing here writes
//! until [`write_style`]/[`write_reset`] serialize a style as SGR escape
//! sequences. Whether styling is emitted at all is decided once per stream
//! from a tri-state [`ColorChoice`].

use std::io::{self, IsTerminal, Write};

/// One of the eight base ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

/// A foreground or background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermColor {
    /// Inherit the terminal default.
    #[default]
    None,
    Ansi(AnsiColor),
    Bright(AnsiColor),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intensity {
    #[default]
    Normal,
    Strong,
    Faint,
}

/// A complete cell style: weight, italic, underline, and both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TermStyle {
    pub intensity: Intensity,
    pub italic: bool,
    pub underline: bool,
    pub foreground: TermColor,
    pub background: TermColor,
}

impl TermStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: TermColor) -> Self {
        self.foreground = color;
        self
    }

    pub fn bg(mut self, color: TermColor) -> Self {
        self.background = color;
        self
    }

    pub fn strong(mut self) -> Self {
        self.intensity = Intensity::Strong;
        self
    }

    pub fn faint(mut self) -> Self {
        self.intensity = Intensity::Faint;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// Tri-state styling switch for diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Style only when the target stream is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve the tri-state against a concrete stream.
    pub fn styled_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stream.is_terminal(),
        }
    }
}

/// Serialize a style as SGR escape sequences.
///
/// Attributes at their default value emit nothing, so the default style
/// writes no bytes at all.
pub fn write_style(writer: &mut impl Write, style: &TermStyle) -> io::Result<()> {
    match style.intensity {
        Intensity::Normal => {}
        Intensity::Strong => write!(writer, "\x1b[1m")?,
        Intensity::Faint => write!(writer, "\x1b[2m")?,
    }
    if style.italic {
        write!(writer, "\x1b[3m")?;
    }
    if style.underline {
        write!(writer, "\x1b[4m")?;
    }
    match style.foreground {
        TermColor::None => {}
        TermColor::Ansi(color) => write!(writer, "\x1b[{}m", 30 + color as u8)?,
        TermColor::Bright(color) => write!(writer, "\x1b[{}m", 90 + color as u8)?,
        TermColor::Rgb(r, g, b) => write!(writer, "\x1b[38;2;{r};{g};{b}m")?,
    }
    match style.background {
        TermColor::None => {}
        TermColor::Ansi(color) => write!(writer, "\x1b[{}m", 40 + color as u8)?,
        TermColor::Bright(color) => write!(writer, "\x1b[{}m", 100 + color as u8)?,
        TermColor::Rgb(r, g, b) => write!(writer, "\x1b[48;2;{r};{g};{b}m")?,
    }
    Ok(())
}

/// Reset every attribute.
pub fn write_reset(writer: &mut impl Write) -> io::Result<()> {
    write!(writer, "\x1b[0m")
}
