use std::fmt::{self, Display};

use strum::VariantArray;
use thiserror::Error;

use crate::ast::BinOp;
use crate::diag::{Diagnostic, IntoDiagnostic, Label, code};
use crate::location::{Position, Span};
use crate::util::format_iter;

use super::token::{Keyword, Punct, TokenKind};

/// A fatal lexical or grammatical error.
///
/// `pos` is where the offending character or token starts.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} ({pos})")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub pos: Position,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, pos: Position, span: Span) -> Self {
        Self { kind, pos, span }
    }
}

fn format_char(c: char) -> impl Display {
    struct CharFormatter(char);

    impl Display for CharFormatter {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if self.0.is_control() {
                write!(f, "U+{:04x}", self.0 as u32)
            } else {
                write!(f, "{}", self.0)
            }
        }
    }

    CharFormatter(c)
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    #[error("Can't handle character: {}", format_char(*.0))]
    UnrecognizedCharacter(char),

    #[error("Unexpected end of input")]
    EndOfInput,

    #[error("Malformed number: {0}")]
    MalformedNumber(String),

    #[error("Unexpected token: {0}")]
    UnexpectedToken(TokenKind),

    #[error("Expecting punctuation: \"{0}\"")]
    ExpectedPunctuation(Punct),

    #[error("Expecting keyword: \"{0}\"")]
    ExpectedKeyword(Keyword),

    #[error("Expecting variable name")]
    ExpectedVariableName,

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}

impl IntoDiagnostic for SyntaxError {
    fn into_diagnostic(self) -> Diagnostic {
        let code = match self.kind {
            SyntaxErrorKind::UnrecognizedCharacter(_) => code!(lexer::unrecognized_character),
            SyntaxErrorKind::EndOfInput => code!(lexer::end_of_input),
            SyntaxErrorKind::MalformedNumber(_) => code!(lexer::malformed_number),
            SyntaxErrorKind::UnexpectedToken(_) => code!(parser::unexpected_token),
            SyntaxErrorKind::ExpectedPunctuation(_) => code!(parser::expected_punctuation),
            SyntaxErrorKind::ExpectedKeyword(_) => code!(parser::expected_keyword),
            SyntaxErrorKind::ExpectedVariableName => code!(parser::expected_variable_name),
            SyntaxErrorKind::UnknownOperator(_) => code!(parser::unknown_operator),
        };

        let diag = Diagnostic::error()
            .at(self.span)
            .with_msg(&self.kind)
            .with_code(code);

        match self.kind {
            SyntaxErrorKind::UnknownOperator(_) => diag
                .with_label(Label::primary(self.span).with_msg("not a binary operator"))
                .with_note(format!(
                    "supported operators are {}",
                    format_iter(BinOp::VARIANTS.iter().map(|op| format!("`{op}`")), "and", "none"),
                ))
                .make(),

            SyntaxErrorKind::EndOfInput => diag
                .with_label(Label::primary(self.span).with_msg("the input ends here"))
                .make(),

            _ => diag.with_label(Label::primary(self.span)).make(),
        }
    }
}
