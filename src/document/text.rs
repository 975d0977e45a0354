//! Text utilities: line access and position conversion.
//!
//! Provides line records over a document snapshot and efficient byte offset
//! -> LSP position conversion with proper UTF-16 handling.

use std::ops::Range;

use tower_lsp::lsp_types::Position;

/// One line of a document snapshot.
///
/// `text` excludes the trailing line break; `start` is the absolute byte
/// offset of the line's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub start: usize,
    pub text: &'a str,
}

/// Pre-computed line index for a document snapshot.
///
/// LSP positions use line/column where column is in UTF-16 code units.
/// This struct pre-computes line start offsets for O(log n) lookup and
/// hands out per-line views for the tokenizer and outline builder.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    /// Source text.
    source: String,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];

        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            source,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of lines in the snapshot. An empty document has one line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get one line. `number` must be less than [`Self::line_count`].
    pub fn line(&self, number: usize) -> Line<'_> {
        let start = self.line_starts[number];
        let end = self
            .line_starts
            .get(number + 1)
            .copied()
            .unwrap_or(self.source.len());

        let mut text = &self.source[start..end];
        if let Some(stripped) = text.strip_suffix('\n') {
            text = stripped;
        }
        if let Some(stripped) = text.strip_suffix('\r') {
            text = stripped;
        }

        Line {
            number,
            start,
            text,
        }
    }

    /// Iterate over all lines in order.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> + '_ {
        (0..self.line_count()).map(move |number| self.line(number))
    }

    /// Byte span of a line's content, excluding the line break.
    pub fn line_span(&self, number: usize) -> Range<usize> {
        let line = self.line(number);
        line.start..line.start + line.text.len()
    }

    /// Convert a byte offset to an LSP position.
    ///
    /// Uses binary search for O(log n) line lookup, then scans the line for
    /// the UTF-16 column.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,                    // Exact match (start of line)
            Err(line) => line.saturating_sub(1), // In the middle of a line
        };

        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.source.len());

        let mut col = 0u32;
        let line_slice = &self.source[line_start..line_end];

        for (i, c) in line_slice.char_indices() {
            if line_start + i >= offset {
                break;
            }
            col += c.len_utf16() as u32;
        }

        Position::new(line as u32, col)
    }
}
