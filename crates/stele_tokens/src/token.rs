//! A lexical token from source text, along with the fixed keyword and symbol tables

use crate::position::{Position, Positioned};
use std::fmt::{Debug, Display, Formatter};

/// Every keyword, spelled as it appears in source text.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("func", TokenKind::Func),
    ("import", TokenKind::Import),
    ("let", TokenKind::Let),
    ("type", TokenKind::Type),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("switch", TokenKind::Switch),
    ("as", TokenKind::As),
];

/// Every operator and punctuation mark, spelled as it appears in source text.
///
/// No symbol is longer than two characters, and every two character symbol is
/// matched before its one character prefix.
pub const SYMBOLS: &[(&str, TokenKind)] = &[
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (";", TokenKind::Semi),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Mult),
    ("/", TokenKind::Div),
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::MultAssign),
    ("/=", TokenKind::DivAssign),
    ("^", TokenKind::BitNot),
    ("|", TokenKind::BitOr),
    ("&", TokenKind::BitAnd),
    ("!", TokenKind::Not),
    ("||", TokenKind::Or),
    ("&&", TokenKind::And),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("<=", TokenKind::Lte),
    (">=", TokenKind::Gte),
    ("=", TokenKind::Assign),
    (".", TokenKind::Dot),
    ("|>", TokenKind::PipeForward),
    (",", TokenKind::Comma),
    ("<<", TokenKind::LShift),
    (">>", TokenKind::RShift),
];

/// Looks up the keyword spelled `text`
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(spelling, _)| *spelling == text)
        .map(|(_, kind)| *kind)
}

/// Looks up the operator or punctuation mark spelled `text`
pub fn symbol(text: &str) -> Option<TokenKind> {
    SYMBOLS
        .iter()
        .find(|(spelling, _)| *spelling == text)
        .map(|(_, kind)| *kind)
}

/// A lexical token from source text
#[derive(Clone, PartialEq)]
pub struct Token {
    position: Position,
    kind: TokenKind,
    value: TokenValue,
}

impl Token {
    /// Creates a new token
    pub fn new(position: Position, kind: TokenKind, value: impl Into<TokenValue>) -> Self {
        Self {
            position,
            kind,
            value: value.into(),
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Gets the decoded value of this token
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    /// Consumes the token, keeping only its decoded value
    pub fn into_value(self) -> TokenValue {
        self.value
    }

    pub fn line(&self) -> usize {
        self.position.line()
    }

    pub fn column(&self) -> usize {
        self.position.column()
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})@{}", self.kind, self.value, self.position)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Terminator, _) => write!(f, "end of statement"),
            (TokenKind::String, TokenValue::String(s)) => write!(f, "{s:?}"),
            (_, value) => write!(f, "{value}"),
        }
    }
}

impl Positioned for Token {
    fn position(&self) -> Position {
        self.position
    }
}

/// The kind for this token
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    // keywords
    Func,
    Import,
    Let,
    Type,
    If,
    Else,
    Switch,
    As,

    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// [
    LBracket,
    /// ]
    RBracket,
    /// ;
    Semi,
    Plus,
    Minus,
    Mult,
    Div,
    PlusAssign,
    MinusAssign,
    MultAssign,
    DivAssign,
    /// ^
    BitNot,
    /// |
    BitOr,
    /// &
    BitAnd,
    /// !
    Not,
    /// ||
    Or,
    /// &&
    And,
    /// ==
    Equal,
    /// !=
    NotEqual,
    Lt,
    Gt,
    Lte,
    Gte,
    /// =
    Assign,
    Dot,
    /// |>
    PipeForward,
    Comma,
    /// <<
    LShift,
    /// >>
    RShift,

    // literals
    Ident,
    String,
    Int,
    Float,

    /// End of a statement, synthesized from a new line
    Terminator,
}

impl TokenKind {
    /// The fixed spelling of this kind, if it is a keyword or symbol
    pub fn text(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .chain(SYMBOLS)
            .find(|(_, kind)| kind == self)
            .map(|(spelling, _)| *spelling)
    }

    /// Whether this kind is a keyword
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }

    /// Whether a statement necessarily continues after a token of this kind, in
    /// which case a new line does not end it.
    pub fn continues_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Terminator
                | TokenKind::Dot
                | TokenKind::PipeForward
                | TokenKind::Comma
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::LBracket
        )
    }
}

/// The decoded value carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// identifier text or the decoded contents of a string literal.
    ///
    /// A `\xHH` escape decodes to the char `U+00HH`, so escapes above `\x7f` take two
    /// bytes once encoded as UTF-8.
    String(String),
    /// an integer literal, or the code point of a char literal
    Int(i64),
    Float(f64),
    /// the fixed spelling of a keyword, symbol or terminator
    Symbol(&'static str),
}

impl TokenValue {
    /// Gets this value as text, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => Some(s),
            TokenValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TokenValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TokenValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::String(s) => write!(f, "{s}"),
            TokenValue::Int(i) => write!(f, "{i}"),
            TokenValue::Float(fl) => write!(f, "{fl}"),
            TokenValue::Symbol(s) => write!(f, "{}", s.escape_debug()),
        }
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::String(value)
    }
}

impl From<&'static str> for TokenValue {
    fn from(value: &'static str) -> Self {
        TokenValue::Symbol(value)
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Int(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn test_every_fixed_kind_has_one_spelling() {
        for kind in TokenKind::iter() {
            let spellings = KEYWORDS
                .iter()
                .chain(SYMBOLS)
                .filter(|(_, k)| *k == kind)
                .count();
            match kind {
                TokenKind::Ident
                | TokenKind::String
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Terminator => assert_eq!(spellings, 0, "{kind}"),
                _ => assert_eq!(spellings, 1, "{kind}"),
            }
        }
    }

    #[test]
    fn test_symbols_are_at_most_two_chars() {
        assert!(SYMBOLS.iter().all(|(s, _)| (1..=2).contains(&s.chars().count())));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(keyword("import"), Some(TokenKind::Import));
        assert_eq!(keyword("imports"), None);
        assert_eq!(symbol("|>"), Some(TokenKind::PipeForward));
        assert_eq!(symbol("<>"), None);
        assert_eq!(TokenKind::LShift.text(), Some("<<"));
        assert_eq!(TokenKind::Ident.text(), None);
    }

    #[test]
    fn test_display() {
        let token = Token::new(Position::new(1, 1), TokenKind::String, "a \"b\"".to_string());
        assert_eq!(token.to_string(), r#""a \"b\"""#);
        let token = Token::new(Position::new(1, 1), TokenKind::Ident, "x!".to_string());
        assert_eq!(token.to_string(), "x!");
        assert_eq!(TokenKind::PipeForward.to_string(), "pipe_forward");
    }
}
