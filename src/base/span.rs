//! Byte-offset spans and line/column conversion.

pub use text_size::{TextRange, TextSize};

/// A zero-based line/column pair.
///
/// Columns are measured in bytes from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line; always starts with 0
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte != b'\n' {
                continue;
            }
            // Text past u32::MAX is rejected by the tokenizer
            match TextSize::try_from(offset + 1) {
                Ok(start) => line_starts.push(start),
                Err(_) => break,
            }
        }
        Self {
            line_starts,
            len: TextSize::try_from(text.len()).unwrap_or(TextSize::new(u32::MAX)),
        }
    }

    /// Length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a zero-based line/column pair.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        LineCol {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            col: u32::from(offset - self.line_starts[line]),
        }
    }
}
