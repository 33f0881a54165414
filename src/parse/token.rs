use std::fmt::{self, Display};

use phf::phf_map;

use crate::location::{Position, Span};

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub pos: Position,
    pub span: Span,
    pub value: TokenValue<'a>,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        self.value.kind()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue<'a> {
    Number(f64),
    String(String),
    Keyword(Keyword),
    Punct(Punct),
    Operator(&'a str),
    Variable(&'a str),
}

impl TokenValue<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Number(_) => TokenKind::Number,
            Self::String(_) => TokenKind::String,
            Self::Keyword(_) => TokenKind::Keyword,
            Self::Punct(_) => TokenKind::Punctuation,
            Self::Operator(_) => TokenKind::Operator,
            Self::Variable(_) => TokenKind::Variable,
        }
    }

    /// The literal text of the token (for numbers, the shortest decimal form).
    pub fn text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
            Self::Keyword(kw) => kw.to_str().to_owned(),
            Self::Punct(p) => p.to_char().to_string(),
            Self::Operator(op) | Self::Variable(op) => (*op).to_owned(),
        }
    }
}

impl Display for TokenValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{} {s:?}", self.kind()),
            _ => write!(f, "{} `{}`", self.kind(), self.text()),
        }
    }
}

#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    Number,
    String,
    Keyword,
    Punctuation,
    Operator,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    Then,
    Else,
    Lambda,
    LambdaSymbol,
    True,
    False,
}

impl Keyword {
    const KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
        "if" => Keyword::If,
        "then" => Keyword::Then,
        "else" => Keyword::Else,
        "lambda" => Keyword::Lambda,
        "λ" => Keyword::LambdaSymbol,
        "true" => Keyword::True,
        "false" => Keyword::False,
    };

    pub fn parse_exact(input: &str) -> Option<Self> {
        Self::KEYWORDS.get(input).copied()
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::Lambda => "lambda",
            Self::LambdaSymbol => "λ",
            Self::True => "true",
            Self::False => "false",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

macro_rules! puncts {
    {$($lit:literal => $variant:ident),+ $(,)?} => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Punct {
            $($variant,)+
        }

        impl Punct {
            pub fn from_char(c: char) -> Option<Self> {
                match c {
                    $($lit => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn to_char(self) -> char {
                match self {
                    $(Self::$variant => $lit,)+
                }
            }
        }
    };
}

puncts! {
    ',' => Comma,
    ';' => Semicolon,
    '(' => LParen,
    ')' => RParen,
    '{' => LBrace,
    '}' => RBrace,
    '[' => LBracket,
    ']' => RBracket,
}

impl Display for Punct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
