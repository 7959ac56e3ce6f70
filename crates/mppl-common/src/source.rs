use crate::span::LineIndex;

/// An in-memory source file: name, full text, and a line index.
///
/// Immutable after construction. Every phase of the compiler holds a shared
/// borrow of the same `Source` for the duration of one compilation.
#[derive(Debug)]
pub struct Source {
    file_name: String,
    text: String,
    line_index: LineIndex,
}

/// A 0-based line/column pair. Presentation layers add 1 when printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl Source {
    /// Wrap already-loaded text. Reading the file from disk is the caller's
    /// concern.
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self {
            file_name: file_name.into(),
            text,
            line_index,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a byte offset to its 0-based line and byte column.
    pub fn location(&self, offset: u32) -> SourceLocation {
        let (line, column) = self.line_index.line_col(offset);
        SourceLocation { line, column }
    }

    /// Byte offset of the start of the given 0-based line.
    pub fn line_offset(&self, line: u32) -> u32 {
        self.line_index.line_start(line)
    }

    /// Length in bytes of the given 0-based line, without its terminator.
    pub fn line_len(&self, line: u32) -> u32 {
        self.line_index.line_len(line, &self.text)
    }

    /// The text of the given 0-based line, without its terminator.
    pub fn line_text(&self, line: u32) -> &str {
        let start = self.line_offset(line) as usize;
        let len = self.line_len(line) as usize;
        &self.text[start..start + len]
    }

    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_maps_offsets() {
        let source = Source::new("test.mpl", "program p;\nbegin end.\n");
        assert_eq!(source.location(0), SourceLocation { line: 0, column: 0 });
        assert_eq!(source.location(11), SourceLocation { line: 1, column: 0 });
        assert_eq!(source.location(17), SourceLocation { line: 1, column: 6 });
    }

    #[test]
    fn line_text_strips_terminator() {
        let source = Source::new("test.mpl", "program p;\nbegin end.\n");
        assert_eq!(source.line_text(0), "program p;");
        assert_eq!(source.line_text(1), "begin end.");
    }

    #[test]
    fn file_name_is_kept() {
        let source = Source::new("sample.mpl", "");
        assert_eq!(source.file_name(), "sample.mpl");
        assert_eq!(source.line_count(), 1);
    }
}
