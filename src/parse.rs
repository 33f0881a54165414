mod cursor;
mod error;
mod lexer;
mod parser;
mod token;

pub use cursor::Cursor;
pub use error::{SyntaxError, SyntaxErrorKind};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Keyword, Punct, Token, TokenKind, TokenValue};

use crate::ast::Node;

/// Parses a whole program, returning the top-level `Prog` node.
pub fn parse_str(source: &str) -> Result<Node, SyntaxError> {
    Parser::new(Lexer::new(Cursor::new(source))).parse()
}
