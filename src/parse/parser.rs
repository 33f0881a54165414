use crate::ast::{BinOp, Node};
use crate::location::Span;

use super::error::{SyntaxError, SyntaxErrorKind};
use super::token::{Keyword, Punct, Token, TokenValue};
use super::Lexer;

type ParseResult<T = Node> = Result<T, SyntaxError>;

trait Matcher {
    fn matches(&self, token: &Token<'_>) -> bool;
}

trait Expected {
    fn expected(&self) -> SyntaxErrorKind;
}

impl Matcher for Punct {
    fn matches(&self, token: &Token<'_>) -> bool {
        token.value == TokenValue::Punct(*self)
    }
}

impl Expected for Punct {
    fn expected(&self) -> SyntaxErrorKind {
        SyntaxErrorKind::ExpectedPunctuation(*self)
    }
}

impl Matcher for Keyword {
    fn matches(&self, token: &Token<'_>) -> bool {
        token.value == TokenValue::Keyword(*self)
    }
}

impl Expected for Keyword {
    fn expected(&self) -> SyntaxErrorKind {
        SyntaxErrorKind::ExpectedKeyword(*self)
    }
}

impl<const N: usize, T: Matcher> Matcher for [T; N] {
    fn matches(&self, token: &Token<'_>) -> bool {
        self.iter().any(|matcher| matcher.matches(token))
    }
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self { lexer }
    }

    fn at(&mut self, matcher: impl Matcher) -> ParseResult<bool> {
        Ok(self
            .lexer
            .peek()?
            .is_some_and(|token| matcher.matches(token)))
    }

    fn at_end(&mut self) -> ParseResult<bool> {
        self.lexer.at_end()
    }

    /// Builds an error pointing at the next token, or at the end of input if there is none.
    fn error_at_next(&mut self, kind: SyntaxErrorKind) -> ParseResult<SyntaxError> {
        Ok(match self.lexer.peek()? {
            Some(token) => SyntaxError::new(kind, token.pos, token.span),
            None => self.lexer.report_error(kind),
        })
    }

    fn expect(&mut self, matcher: impl Matcher + Expected) -> ParseResult<Token<'src>> {
        match self.lexer.next()? {
            Some(token) if matcher.matches(&token) => Ok(token),
            Some(token) => Err(SyntaxError::new(matcher.expected(), token.pos, token.span)),
            None => Err(self.lexer.report_error(matcher.expected())),
        }
    }

    fn unexpected(token: &Token<'_>) -> SyntaxError {
        SyntaxError::new(
            SyntaxErrorKind::UnexpectedToken(token.kind()),
            token.pos,
            token.span,
        )
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(mut self) -> ParseResult {
        tracing::debug!("Parsing program");
        let result = self.parse_top_level();

        match &result {
            Ok(Node::Prog(statements)) => {
                tracing::debug!(statements = statements.len(), "Parsed program")
            }

            Err(e) => tracing::debug!(error = %e, "Parsing failed"),
            Ok(_) => {}
        }

        result
    }

    fn parse_top_level(&mut self) -> ParseResult {
        let mut statements = vec![];

        while !self.at_end()? {
            statements.push(self.parse_expression()?);

            if !self.at_end()? {
                self.expect(Punct::Semicolon)?;
            }
        }

        Ok(Node::Prog(statements))
    }

    /// Parses `open elem (sep elem)* sep? close`.
    fn delimited<T>(
        &mut self,
        open: Punct,
        close: Punct,
        separator: Punct,
        mut parse_elem: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut result = vec![];
        self.expect(open)?;

        while !self.at_end()? {
            if self.at(close)? {
                break;
            }

            if !result.is_empty() {
                self.expect(separator)?;

                if self.at(close)? {
                    break;
                }
            }

            result.push(parse_elem(self)?);
        }

        self.expect(close)?;

        Ok(result)
    }

    fn parse_expression(&mut self) -> ParseResult {
        let atom = self.parse_atom()?;
        let expr = self.maybe_binary(atom, 0)?;

        self.maybe_call(expr)
    }

    fn maybe_call(&mut self, expr: Node) -> ParseResult {
        if self.at(Punct::LParen)? {
            self.parse_call(expr)
        } else {
            Ok(expr)
        }
    }

    fn parse_call(&mut self, callee: Node) -> ParseResult {
        let args = self.delimited(
            Punct::LParen,
            Punct::RParen,
            Punct::Comma,
            Self::parse_expression,
        )?;

        Ok(Node::call(callee, args))
    }

    fn binary_op(&mut self) -> ParseResult<Option<BinOp>> {
        let op = match self.lexer.peek()? {
            Some(Token {
                value: TokenValue::Operator(op),
                ..
            }) => *op,

            _ => return Ok(None),
        };

        match op.parse::<BinOp>() {
            Ok(op) => Ok(Some(op)),
            Err(_) => Err(self.error_at_next(SyntaxErrorKind::UnknownOperator(op.to_owned()))?),
        }
    }

    fn maybe_binary(&mut self, lhs: Node, min_prec: u8) -> ParseResult {
        let Some(op) = self.binary_op()? else {
            return Ok(lhs);
        };

        if op.precedence() <= min_prec {
            return Ok(lhs);
        }

        self.lexer.next()?;
        let atom = self.parse_atom()?;
        let rhs = self.maybe_binary(atom, op.precedence())?;

        self.maybe_binary(Node::binary(op, lhs, rhs), min_prec)
    }

    fn parse_atom(&mut self) -> ParseResult {
        let atom = self.parse_atom_inner()?;

        self.maybe_call(atom)
    }

    fn parse_atom_inner(&mut self) -> ParseResult {
        if self.at(Punct::LParen)? {
            self.lexer.next()?;
            let expr = self.parse_expression()?;
            self.expect(Punct::RParen)?;

            return Ok(expr);
        }

        if self.at(Punct::LBrace)? {
            return self.parse_block();
        }

        if self.at(Keyword::If)? {
            return self.parse_if();
        }

        if self.at([Keyword::True, Keyword::False])? {
            return self.parse_bool();
        }

        if self.at([Keyword::Lambda, Keyword::LambdaSymbol])? {
            self.lexer.next()?;

            return self.parse_lambda();
        }

        let Some(token) = self.lexer.next()? else {
            return Err(self.lexer.report_error(SyntaxErrorKind::EndOfInput));
        };

        match token.value {
            TokenValue::Variable(name) => Ok(Node::Var(name.to_owned())),
            TokenValue::Number(value) => Ok(Node::Number(value)),
            TokenValue::String(value) => Ok(Node::String(value)),
            _ => Err(Self::unexpected(&token)),
        }
    }

    fn parse_block(&mut self) -> ParseResult {
        let statements = self.delimited(
            Punct::LBrace,
            Punct::RBrace,
            Punct::Semicolon,
            Self::parse_expression,
        )?;

        Ok(Node::block(statements))
    }

    fn parse_if(&mut self) -> ParseResult {
        self.expect(Keyword::If)?;
        let cond = self.parse_expression()?;

        if !self.at(Punct::LBrace)? {
            self.expect(Keyword::Then)?;
        }

        let then_branch = self.parse_expression()?;

        let else_branch = if self.at(Keyword::Else)? {
            self.lexer.next()?;

            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Node::if_(cond, then_branch, else_branch))
    }

    fn parse_bool(&mut self) -> ParseResult {
        let token = self.lexer.next()?;
        let value = token.is_some_and(|token| Keyword::True.matches(&token));

        Ok(Node::Bool(value))
    }

    fn parse_lambda(&mut self) -> ParseResult {
        let params = self.delimited(
            Punct::LParen,
            Punct::RParen,
            Punct::Comma,
            Self::parse_var_name,
        )?;
        let body = self.parse_expression()?;

        Ok(Node::lambda(params, body))
    }

    fn parse_var_name(&mut self) -> ParseResult<String> {
        match self.lexer.next()? {
            Some(Token {
                value: TokenValue::Variable(name),
                ..
            }) => Ok(name.to_owned()),

            Some(token) => Err(SyntaxError::new(
                SyntaxErrorKind::ExpectedVariableName,
                token.pos,
                token.span,
            )),

            None => {
                let pos = self.lexer.position();

                Err(SyntaxError::new(
                    SyntaxErrorKind::ExpectedVariableName,
                    pos,
                    Span::empty_at(pos),
                ))
            }
        }
    }
}
