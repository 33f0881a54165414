use crate::location::{Position, Span};

use super::cursor::Cursor;
use super::error::{SyntaxError, SyntaxErrorKind};
use super::token::{Keyword, Punct, Token, TokenValue};

type ScanResult<'a> = Result<TokenValue<'a>, SyntaxError>;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    current: Option<Token<'a>>,
    failed: bool,
}

impl Lexer<'_> {
    fn is_whitespace(c: char) -> bool {
        " \t\n".contains(c)
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_ident_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_' || c == 'λ'
    }

    fn is_ident_cont(c: char) -> bool {
        "?!-<>=".contains(c) || Self::is_ident_start(c) || Self::is_digit(c)
    }

    fn is_op_char(c: char) -> bool {
        "+-*/%=&|<>!".contains(c)
    }
}

impl<'a> Lexer<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self {
            cursor,
            current: None,
            failed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Token<'a>>, SyntaxError> {
        if self.current.is_none() {
            self.current = self.read_next()?;
        }

        Ok(self.current.as_ref())
    }

    pub fn next(&mut self) -> Result<Option<Token<'a>>, SyntaxError> {
        match self.current.take() {
            Some(token) => Ok(Some(token)),
            None => self.read_next(),
        }
    }

    pub fn at_end(&mut self) -> Result<bool, SyntaxError> {
        Ok(self.peek()?.is_none())
    }

    pub fn report_error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        self.cursor.report_error(kind)
    }

    fn skip_whitespace(&mut self) {
        self.cursor.consume_while(Self::is_whitespace);
    }

    fn skip_comment(&mut self) {
        self.cursor.consume_while(|c| c != '\n');
        self.cursor.consume_newline();
    }

    fn scan_string(&mut self) -> ScanResult<'a> {
        self.cursor.next()?;
        let mut value = String::new();

        loop {
            match self.cursor.next()? {
                '"' => break,
                '\\' => value.push(self.cursor.next()?),
                c => value.push(c),
            }
        }

        Ok(TokenValue::String(value))
    }

    fn scan_number(&mut self) -> ScanResult<'a> {
        let start = self.cursor.position();
        let mut has_dot = false;
        let digits = self.cursor.consume_while(|c| match c {
            '.' if has_dot => false,

            '.' => {
                has_dot = true;

                true
            }

            c => Self::is_digit(c),
        });

        match digits.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(TokenValue::Number(value)),

            _ => Err(SyntaxError::new(
                SyntaxErrorKind::MalformedNumber(digits.to_owned()),
                start,
                (start..self.cursor.position()).into(),
            )),
        }
    }

    fn scan_ident_or_keyword(&mut self) -> ScanResult<'a> {
        let ident = self.cursor.consume_while(Self::is_ident_cont);

        Ok(Keyword::parse_exact(ident)
            .map(TokenValue::Keyword)
            .unwrap_or(TokenValue::Variable(ident)))
    }

    fn read_next(&mut self) -> Result<Option<Token<'a>>, SyntaxError> {
        let (start, value) = loop {
            self.skip_whitespace();
            let start = self.cursor.position();

            let value = match self.cursor.peek() {
                None => return Ok(None),

                Some('#') => {
                    self.skip_comment();

                    continue;
                }

                Some('"') => self.scan_string()?,
                Some(c) if Self::is_digit(c) => self.scan_number()?,
                Some(c) if Self::is_ident_start(c) => self.scan_ident_or_keyword()?,

                Some(c) => match Punct::from_char(c) {
                    Some(punct) => {
                        self.cursor.next()?;

                        TokenValue::Punct(punct)
                    }

                    None if Self::is_op_char(c) => {
                        TokenValue::Operator(self.cursor.consume_while(Self::is_op_char))
                    }

                    None => {
                        let mut err =
                            self.report_error(SyntaxErrorKind::UnrecognizedCharacter(c));
                        err.span = Span::new(start.offset, start.offset + c.len_utf8());

                        return Err(err);
                    }
                },
            };

            break (start, value);
        };

        let token = Token {
            pos: start,
            span: (start..self.cursor.position()).into(),
            value,
        };
        tracing::trace!(token = %token.value, pos = %token.pos, "scanned a token");

        Ok(Some(token))
    }
}

/// Yields tokens until the end of input or the first error.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = Lexer::next(self).transpose();
        self.failed = matches!(result, Some(Err(_)));

        result
    }
}
