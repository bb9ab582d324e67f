//! Source text views and range types for location tracking.
//!
//! Ranges are byte offsets into the original UTF-8 text so that slicing is
//! exact, while line/column positions count Unicode scalar values so that
//! multi-byte characters occupy a single column.

use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A half-open byte range `[lo, hi)` in source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub lo: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub hi: TextPos,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(lo: TextPos, hi: TextPos) -> Self {
        debug_assert!(hi >= lo);
        Self { lo, hi }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { lo: pos, hi: pos }
    }

    /// The length of this range in bytes.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.hi - self.lo
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// Whether this range contains a position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.lo && pos < self.hi
    }

    /// Whether `other` lies entirely within this range.
    #[inline]
    pub fn contains_range(&self, other: TextRange) -> bool {
        other.lo >= self.lo && other.hi <= self.hi
    }

    /// Return a new range covering both this range and the other.
    pub fn cover(&self, other: TextRange) -> TextRange {
        TextRange::new(self.lo.min(other.lo), self.hi.max(other.hi))
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.lo as usize..self.hi as usize
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lo, self.hi)
    }
}

impl From<TextRange> for Range<usize> {
    fn from(range: TextRange) -> Self {
        range.to_range()
    }
}

/// A line and column position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LineCol {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column, counted in Unicode scalar values.
    pub column: u32,
}

impl LineCol {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Begin and end positions of a range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Loc {
    pub begin: LineCol,
    pub end: LineCol,
}

/// A map from byte offsets to line numbers, built from source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map from source text.
    ///
    /// `\r\n` counts as a single terminator; lone `\r`, U+2028 and U+2029
    /// also end a line.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = text.as_bytes();
        let mut iter = text.char_indices().peekable();
        while let Some((i, ch)) = iter.next() {
            match ch {
                '\n' => line_starts.push((i + 1) as u32),
                '\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        iter.next();
                        line_starts.push((i + 2) as u32);
                    } else {
                        line_starts.push((i + 1) as u32);
                    }
                }
                '\u{2028}' | '\u{2029}' => line_starts.push((i + ch.len_utf8()) as u32),
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// Get the line index (0-based) for a byte offset.
    pub fn line_index(&self, pos: TextPos) -> usize {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Get the byte offset of the start of a 0-based line index.
    pub fn line_start(&self, index: usize) -> TextPos {
        self.line_starts[index]
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get all line starts.
    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }
}

/// An immutable view over one input text.
///
/// Built once per parse and shared read-only by the lexer, the parser and
/// error reporting.
#[derive(Debug, Clone)]
pub struct Source<'a> {
    text: &'a str,
    line_map: LineMap,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            line_map: LineMap::new(text),
        }
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length of the source in bytes.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.text.len() as TextPos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// The exact substring covered by `range`, or `None` when the range is
    /// out of bounds or does not fall on character boundaries.
    pub fn slice(&self, range: TextRange) -> Option<&'a str> {
        self.text.get(range.to_range())
    }

    /// Line and column of a byte offset. Offsets past the end are clamped.
    pub fn line_col(&self, pos: TextPos) -> LineCol {
        let pos = pos.min(self.len());
        let index = self.line_map.line_index(pos);
        let start = self.line_map.line_start(index) as usize;
        let mut end = pos as usize;
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        let column = self.text[start..end].chars().count() as u32;
        LineCol::new(index as u32 + 1, column)
    }

    /// Begin and end line/column of a range.
    pub fn loc(&self, range: TextRange) -> Loc {
        Loc {
            begin: self.line_col(range.lo),
            end: self.line_col(range.hi),
        }
    }
}
