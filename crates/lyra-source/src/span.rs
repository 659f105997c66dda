//! Positions and spans over a single source string.
//!
//! A [`Position`] is self-describing: it carries the byte offset of the start
//! of its own line, so a diagnostic can recover the surrounding source line
//! without consulting any external line table.

use std::fmt;

/// A location within a source file.
///
/// `line` and `column` are 1-indexed, following editor convention. `offset` and
/// `line_start` are 0-indexed byte offsets into the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the source (0-indexed).
    pub offset: usize,
    /// Byte offset of the first character of this position's line.
    pub line_start: usize,
}

impl Position {
    /// Creates a new position.
    ///
    /// ## Panics
    ///
    /// Panics if `line` or `column` is zero, or if `line_start` is greater than
    /// `offset`.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize, line_start: usize) -> Self {
        assert!(line >= 1, "line numbers are 1-indexed");
        assert!(column >= 1, "column numbers are 1-indexed");
        assert!(line_start <= offset, "a line cannot start after the position on it");

        Self { line, column, offset, line_start }
    }

    /// The position at the very start of a source file.
    #[must_use]
    pub const fn start_of_file() -> Self { Self { line: 1, column: 1, offset: 0, line_start: 0 } }

    /// Returns true if this position occurs strictly before `other`.
    #[must_use]
    pub const fn precedes(&self, other: &Self) -> bool { self.offset < other.offset }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range within a source file, covering every byte from `start` through `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start of the span, inclusive.
    pub start: Position,
    /// End of the span, exclusive (one past the last consumed byte).
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    ///
    /// ## Panics
    ///
    /// Panics if `start` occurs after `end`.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        assert!(start.offset <= end.offset, "span start must not be after its end");
        Self { start, end }
    }

    /// Creates a zero-width span at a single position, e.g. for the EOF token.
    #[must_use]
    pub const fn empty(at: Position) -> Self { Self { start: at, end: at } }

    /// Returns true if `offset` falls within this span.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Slices the covered text out of `source`.
    ///
    /// ## Panics
    ///
    /// Panics if the span's offsets do not land on UTF-8 character boundaries
    /// in `source`.
    #[must_use]
    pub fn slice<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start.offset..self.end.offset]
    }

    /// Returns a span covering both `self` and `other`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let start = if self.start.precedes(&other.start) { self.start } else { other.start };
        let end = if self.end.precedes(&other.end) { other.end } else { self.end };
        Self { start, end }
    }

    /// Returns the source line containing `self.start`, not including the
    /// trailing newline.
    #[must_use]
    pub fn start_line<'src>(&self, source: &'src str) -> &'src str {
        let rest = &source[self.start.line_start..];
        let len = rest.find('\n').unwrap_or(rest.len());
        &rest[..len]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
