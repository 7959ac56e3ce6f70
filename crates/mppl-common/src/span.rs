use serde::Serialize;

/// Byte-offset span into source text. Start is inclusive, end is exclusive.
///
/// All positions in the MPPL compiler are tracked as byte offsets into the
/// original source text. Line/column information is computed on demand via
/// [`LineIndex`] when needed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Pre-computed index of line start positions for on-demand line/column lookup.
///
/// Constructed once per source file. LF, CRLF, and bare CR each terminate a
/// line, so line numbering is stable across platforms.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<u32>,
    text_len: u32,
}

impl LineIndex {
    /// Build a line index by scanning the source text for line terminators.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' => line_starts.push((i + 1) as u32),
                // Bare CR counts as a terminator; CRLF is handled by the LF arm.
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push((i + 1) as u32),
                _ => {}
            }
        }
        Self {
            line_starts,
            text_len: source.len() as u32,
        }
    }

    /// Convert a byte offset to a 0-based (line, column) pair.
    ///
    /// Uses binary search on the pre-computed line start positions.
    /// Column is measured in bytes from the start of the line.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        // partition_point returns the index of the first line_start > offset,
        // so the containing line is one before that.
        let line_idx = self.line_starts.partition_point(|&start| start <= offset);
        let line_idx = line_idx.saturating_sub(1);
        let line = line_idx as u32;
        let col = offset - self.line_starts[line_idx];
        (line, col)
    }

    /// Byte offset of the start of the given 0-based line.
    pub fn line_start(&self, line: u32) -> u32 {
        self.line_starts[line as usize]
    }

    /// Length in bytes of the given 0-based line, excluding its terminator.
    pub fn line_len(&self, line: u32, source: &str) -> u32 {
        let start = self.line_starts[line as usize];
        let end = self
            .line_starts
            .get(line as usize + 1)
            .copied()
            .unwrap_or(self.text_len);
        let bytes = &source.as_bytes()[start as usize..end as usize];
        let mut len = bytes.len();
        while len > 0 && (bytes[len - 1] == b'\n' || bytes[len - 1] == b'\r') {
            len -= 1;
        }
        len as u32
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
