//! Recursive descent parsing of scripts

use crate::scanner::{CharReader, CharSource, Scanner};
use std::io::Read;
use stele_ast::decl::{Declaration, Import, Let};
use stele_ast::expr::{Expr, Literal};
use stele_ast::scope::Scope;
use stele_ast::script::Script;
use stele_tokens::position::{Position, Positioned};
use stele_tokens::token::{Token, TokenKind, TokenValue};
use stele_types::Type;
use tracing::{debug, instrument, trace};

mod error;

pub use error::*;

/// Parses a script from tokens produced by a [Scanner], looking at most one token ahead.
///
/// # Examples
/// ```
/// # use stele_parsing::parser::Parser;
/// let script = Parser::builder()
///     .build("import \"std/fmt\"\nlet v = 3\n".as_bytes())
///     .parse()
///     .unwrap();
/// assert!(script.get("fmt").is_some());
/// assert!(script.get("v").is_some());
/// ```
#[derive(Debug)]
pub struct Parser<S> {
    scanner: Scanner<S>,
    lookahead: Option<Token>,
    last_position: Option<Position>,
    enclosing: Scope,
    lenient_eof: bool,
}

impl Parser<()> {
    /// Creates a builder to configure a parser
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }
}

impl<S: CharSource> Parser<S> {
    /// Parses every top-level declaration and folds them into a child of the enclosing scope.
    ///
    /// All imports must come before any other declaration.
    #[instrument(skip_all)]
    pub fn parse(mut self) -> ParseResult<Script> {
        let mut declarations: Vec<Declaration> = vec![];
        let mut allow_import = true;
        while let Some(token) = self.next()? {
            match token.kind() {
                // empty statement
                TokenKind::Semi | TokenKind::Terminator => {}
                TokenKind::Import => {
                    if !allow_import {
                        return Err(ParseError::new(
                            ParseErrorKind::ImportAfterDeclaration,
                            token.position(),
                        ));
                    }
                    declarations.push(self.parse_import(token)?.into());
                }
                TokenKind::Let => {
                    allow_import = false;
                    declarations.push(self.parse_let(token)?.into());
                }
                _ => {
                    let position = token.position();
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken(token),
                        position,
                    ));
                }
            }
        }
        let scope = self.enclosing.add_all(declarations);
        debug!(
            declarations = scope.local_ids().count(),
            "parsed script"
        );
        Ok(Script::new(scope))
    }

    /// `import STRING (as IDENT)? TERMINATOR`
    fn parse_import(&mut self, keyword: Token) -> ParseResult<Import> {
        let path = text(self.expect(TokenKind::String)?);
        let name = match self.next_if(TokenKind::As)? {
            Some(_) => text(self.expect(TokenKind::Ident)?),
            None => basename(&path).to_string(),
        };
        self.expect_terminator()?;
        trace!(%name, %path, "parsed import");
        Ok(Import::new(keyword.position(), name, path))
    }

    /// `let IDENT IDENT? = expr TERMINATOR`
    fn parse_let(&mut self, keyword: Token) -> ParseResult<Let> {
        let name = text(self.expect(TokenKind::Ident)?);
        let annotation = self
            .next_if(TokenKind::Ident)?
            .map(|ty| Type::named(text(ty)));
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.expect_terminator()?;
        let ty = annotation.unwrap_or_else(|| value.ty());
        trace!(%name, %ty, "parsed let");
        Ok(Let::new(keyword.position(), name, ty, value))
    }

    /// A single primary
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let token = self.expect_any()?;
        let position = token.position();
        match (token.kind(), token.into_value()) {
            (TokenKind::Int, TokenValue::Int(i)) => Ok(Literal::Int(i).into()),
            (TokenKind::Float, TokenValue::Float(f)) => Ok(Literal::Float(f).into()),
            (TokenKind::String, TokenValue::String(s)) => Ok(Literal::String(s).into()),
            (TokenKind::Ident, TokenValue::String(s)) => Ok(Expr::Name(s)),
            (kind, value) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(Token::new(position, kind, value)),
                position,
            )),
        }
    }

    /// Takes the pushed back token if there is one, otherwise scans a new one
    fn next(&mut self) -> ParseResult<Option<Token>> {
        if let Some(token) = self.lookahead.take() {
            return Ok(Some(token));
        }
        match self.scanner.next() {
            Some(Ok(token)) => {
                self.last_position = Some(token.position());
                Ok(Some(token))
            }
            Some(Err(e)) => {
                let position = e.position();
                Err(ParseError::new(e, position))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, token: Token) {
        debug_assert!(self.lookahead.is_none(), "only one token can be pushed back");
        self.lookahead = Some(token);
    }

    /// Consumes the next token only if it's of the given kind
    fn next_if(&mut self, kind: TokenKind) -> ParseResult<Option<Token>> {
        match self.next()? {
            Some(token) if token.kind() == kind => Ok(Some(token)),
            Some(token) => {
                self.push_back(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.next()? {
            Some(token) if token.kind() == kind => Ok(token),
            Some(token) => {
                let position = token.position();
                Err(ParseError::new(
                    ParseErrorKind::expected_token(kind, token),
                    position,
                ))
            }
            None => Err(self.unexpected_eof(kind)),
        }
    }

    /// Expects some token to be present, whatever its kind
    fn expect_any(&mut self) -> ParseResult<Token> {
        self.next()?.ok_or_else(|| self.unexpected_eof(None))
    }

    /// Statements end with either `;` or a new line
    fn expect_terminator(&mut self) -> ParseResult {
        match self.next()? {
            Some(token) if matches!(token.kind(), TokenKind::Semi | TokenKind::Terminator) => {
                Ok(())
            }
            Some(token) => {
                let position = token.position();
                Err(ParseError::new(
                    ParseErrorKind::expected_token(TokenKind::Terminator, token),
                    position,
                ))
            }
            None if self.lenient_eof => Ok(()),
            None => Err(self.unexpected_eof(TokenKind::Terminator)),
        }
    }

    fn unexpected_eof(&self, expected: impl Into<Option<TokenKind>>) -> ParseError {
        ParseError::new(ParseErrorKind::unexpected_eof(expected), self.last_position)
    }
}

/// The text of an identifier or the contents of a string literal
fn text(token: Token) -> String {
    match token.into_value() {
        TokenValue::String(s) => s,
        other => other.to_string(),
    }
}

/// The last segment of a `/` separated path, ignoring trailing separators
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Configures and builds a [Parser]
#[derive(Debug, Default)]
pub struct ParserBuilder {
    enclosing: Option<Scope>,
    lenient_eof: bool,
}

impl ParserBuilder {
    /// Creates a new builder with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope the parsed declarations are added to. By default this is
    /// [Scope::default].
    pub fn enclosing_scope(mut self, scope: Scope) -> Self {
        self.enclosing = Some(scope);
        self
    }

    /// Whether the end of input may stand in for the terminator of the last statement
    pub fn lenient_eof(mut self, lenient_eof: bool) -> Self {
        self.lenient_eof = lenient_eof;
        self
    }

    /// Builds a parser reading from a [Read] obj
    pub fn build<R: Read>(self, reader: R) -> Parser<CharReader<R>> {
        self.build_with_source(CharReader::new(reader))
    }

    /// Builds a parser reading from a char source
    pub fn build_with_source<S: CharSource>(self, source: S) -> Parser<S> {
        Parser {
            scanner: Scanner::with_source(source),
            lookahead: None,
            last_position: None,
            enclosing: self.enclosing.unwrap_or_default(),
            lenient_eof: self.lenient_eof,
        }
    }
}
