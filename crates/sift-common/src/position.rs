//! Offset to line/column mapping for diagnostics.
//!
//! Tokens and nodes carry flat byte offsets. Humans want line and column
//! numbers, so [`LineIndex`] records where every line starts and answers
//! lookups with a binary search.

use core::fmt;

/// A 1-based line/column pair.
///
/// The column counts characters, not bytes, from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, in characters.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Table of line-start offsets for one source text.
///
/// The table is monotonically increasing: entry 0 is always offset 0 and each
/// further entry is one past a `\n`.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Split `source` on newlines and record where each line begins.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let line_starts = core::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines in the source. An empty source has one (empty) line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset to its line and column.
    ///
    /// Offsets past the end of the source clamp to the end. Offsets that land
    /// inside a multi-byte character count that character as already started.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        // Last line start that is <= offset.
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = self
            .source
            .get(line_start..)
            .map_or(0, |rest| {
                rest.char_indices()
                    .take_while(|&(i, _)| line_start + i < offset)
                    .count()
            });
        Position {
            line,
            column: column + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("hello");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0), Position { line: 1, column: 1 });
        assert_eq!(index.position(4), Position { line: 1, column: 5 });
    }

    #[test]
    fn test_offsets_after_newlines() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_count(), 4);
        // The newline itself belongs to the line it terminates.
        assert_eq!(index.position(2), Position { line: 1, column: 3 });
        assert_eq!(index.position(3), Position { line: 2, column: 1 });
        assert_eq!(index.position(6), Position { line: 3, column: 1 });
        assert_eq!(index.position(8), Position { line: 4, column: 2 });
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("ab\nc");
        assert_eq!(index.position(100), Position { line: 2, column: 2 });
    }

    #[test]
    fn test_columns_count_characters() {
        // "é" is two bytes; the '<' after it is the third character.
        let index = LineIndex::new("aé<");
        assert_eq!(index.position(3), Position { line: 1, column: 3 });
    }

    #[test]
    fn test_display() {
        let pos = Position { line: 3, column: 7 };
        assert_eq!(pos.to_string(), "3:7");
    }
}
