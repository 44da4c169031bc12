use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextIndexError {
    #[error("offset {offset} is out of range for a buffer of {len} bytes")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("line {line} is out of range for a buffer of {lines} lines")]
    LineOutOfRange { line: usize, lines: usize },
}

/// Cursor location resolved against a buffer. Offsets are byte offsets into
/// the buffer; `line` is zero-based; `column` is the byte distance from the
/// line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub offset: usize,
    pub line: usize,
    pub line_start: usize,
    pub line_end: usize,
    pub column: usize,
}

/// Line/offset conversion over a borrowed text buffer.
///
/// Line spans exclude the terminator (`\n` or `\r\n`). The buffer is never
/// mutated; all lookups are pure and deterministic.
pub struct TextIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (pos, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(pos + 1);
            }
        }
        Self { text, line_starts }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`. An offset equal to the buffer
    /// length maps to the final line.
    pub fn line_for_offset(&self, offset: usize) -> Result<usize, TextIndexError> {
        if offset > self.text.len() {
            return Err(TextIndexError::OffsetOutOfRange {
                offset,
                len: self.text.len(),
            });
        }
        Ok(self.line_starts.partition_point(|&start| start <= offset) - 1)
    }

    /// Start and end byte offsets of `line`, excluding the line terminator.
    pub fn line_span(&self, line: usize) -> Result<(usize, usize), TextIndexError> {
        if line >= self.line_count() {
            return Err(TextIndexError::LineOutOfRange {
                line,
                lines: self.line_count(),
            });
        }
        let start = self.line_starts[line];
        let mut end = match self.line_starts.get(line + 1) {
            Some(&next_start) => next_start - 1,
            None => self.text.len(),
        };
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Ok((start, end))
    }

    pub fn line_text(&self, line: usize) -> Result<&'a str, TextIndexError> {
        let (start, end) = self.line_span(line)?;
        Ok(&self.text[start..end])
    }

    /// Resolve an offset into its full cursor position.
    pub fn position_of(&self, offset: usize) -> Result<CursorPosition, TextIndexError> {
        let line = self.line_for_offset(offset)?;
        let (line_start, line_end) = self.line_span(line)?;
        Ok(CursorPosition {
            offset,
            line,
            line_start,
            line_end,
            column: offset - line_start,
        })
    }
}
