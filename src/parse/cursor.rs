use crate::location::{Position, Span};

use super::error::{SyntaxError, SyntaxErrorKind};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    iter: std::str::Chars<'a>,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            iter: source.chars(),
            pos: Position::default(),
        }
    }

    /// Returns the position of the immediately following character.
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.iter.clone().next()
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_none()
    }

    pub fn remaining(&self) -> &'a str {
        self.iter.as_str()
    }

    /// Consumes the next character, failing if the input is exhausted.
    pub fn next(&mut self) -> Result<char, SyntaxError> {
        let c = self
            .iter
            .next()
            .ok_or_else(|| self.report_error(SyntaxErrorKind::EndOfInput))?;
        self.pos.advance(c);

        Ok(c)
    }

    pub fn consume_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let remaining = self.remaining();
        let start = self.pos.offset;

        while let Some(c) = self.peek().filter(|&c| predicate(c)) {
            self.iter.next();
            self.pos.advance(c);
        }

        &remaining[..self.pos.offset - start]
    }

    pub fn consume_newline(&mut self) -> Option<&'a str> {
        let remaining = self.remaining();

        if self.peek() == Some('\n') {
            self.iter.next();
            self.pos.advance('\n');

            Some(&remaining[..1])
        } else {
            None
        }
    }

    /// Builds an error annotated with the current position.
    pub fn report_error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.pos, Span::empty_at(self.pos))
    }
}
