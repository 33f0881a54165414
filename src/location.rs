use std::ops::Range;

use derive_more::Display;

/// A point in the source text.
///
/// `line` and `column` are 1-based and refer to the next character to be read.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[display("{line}:{column}")]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// A half-open byte range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "end offset precedes start offset");

        Self { start, end }
    }

    pub fn empty_at(pos: Position) -> Self {
        Self::new(pos.offset, pos.offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Range<Position>> for Span {
    fn from(range: Range<Position>) -> Self {
        Self::new(range.start.offset, range.end.offset)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
