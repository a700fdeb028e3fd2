use crate::scanner::LexingError;
use stele_tokens::token::{Token, TokenKind};
use stele_tokens::LocatedError;

/// Represents an error occurring during parsing
pub type ParseError = LocatedError<ParseErrorKind>;

pub type ParseResult<T = ()> = Result<T, ParseError>;

/// [ParseError] kind
#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, got {found}")]
    ExpectedToken { expected: TokenKind, found: Token },
    #[error("unexpected token: {0}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input{}", expecting(.expected))]
    UnexpectedEof { expected: Option<TokenKind> },
    #[error("imports must come before all other top-level declarations")]
    ImportAfterDeclaration,
    #[error("scan for next token: {}", .0.kind())]
    Lex(#[from] LexingError),
}

impl ParseErrorKind {
    pub fn expected_token(expected: TokenKind, found: Token) -> Self {
        Self::ExpectedToken { expected, found }
    }

    pub fn unexpected_eof(expected: impl Into<Option<TokenKind>>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }
}

fn expecting(expected: &Option<TokenKind>) -> String {
    expected
        .map(|kind| format!(", expected {kind}"))
        .unwrap_or_default()
}
