//! Responsible with converting a stream of characters into a stream of tokens

use crate::scanner::literals::{decode_float, decode_int};
use stele_tokens::position::Position;
use stele_tokens::token::{keyword, symbol, Token, TokenKind};
use stele_tokens::LocatedError;
use std::io;
use std::io::Read;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

mod char_source;
mod literals;

pub use char_source::{CharReader, CharSource};

/// The text of a synthesized terminator
const TERMINATOR_TEXT: &str = "\n";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Scanning,
    Finished,
    Failed,
    /// the error was handed out by the iterator
    Reported,
}

/// Produces tokens from a [CharSource], one token per call to [advance](Scanner::advance).
///
/// A new line ends the current statement with a [TokenKind::Terminator], unless the last
/// token produced shows the statement has to continue.
///
/// # Examples
/// ```
/// # use stele_parsing::scanner::Scanner;
/// # use stele_tokens::token::TokenKind;
/// let mut scanner = Scanner::new("let v = 3\n".as_bytes());
/// let mut kinds = vec![];
/// while scanner.advance() {
///     kinds.push(scanner.current_token().unwrap().kind());
/// }
/// assert!(scanner.last_error().is_none());
/// assert_eq!(
///     kinds,
///     [TokenKind::Let, TokenKind::Ident, TokenKind::Assign, TokenKind::Int, TokenKind::Terminator]
/// );
/// ```
#[derive(Debug)]
pub struct Scanner<S> {
    source: S,
    line: usize,
    column: usize,
    /// position of the most recently read character
    last_read: Position,
    /// line, column and last read position from before the most recent read
    before_read: (usize, usize, Position),
    start: Position,
    buffer: String,
    last_kind: TokenKind,
    token: Option<Token>,
    error: Option<LexingError>,
    state: State,
}

impl<R: Read> Scanner<CharReader<R>> {
    /// Creates a new scanner reading from a [Read] obj
    pub fn new(reader: R) -> Self {
        Self::with_source(CharReader::new(reader))
    }
}

impl<S: CharSource> Scanner<S> {
    /// Creates a new scanner reading from a char source
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            line: 1,
            column: 0,
            last_read: Position::default(),
            before_read: (1, 0, Position::default()),
            start: Position::default(),
            buffer: String::new(),
            // nothing before the first line needs ending
            last_kind: TokenKind::Terminator,
            token: None,
            error: None,
            state: State::Scanning,
        }
    }

    /// Scans the next token.
    ///
    /// Returns `false` once the input is exhausted or an error occurred, after which
    /// [last_error](Self::last_error) tells the two apart.
    pub fn advance(&mut self) -> bool {
        if self.state != State::Scanning {
            return false;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                self.token = Some(token);
                true
            }
            Ok(None) => {
                self.token = None;
                self.state = State::Finished;
                false
            }
            Err(e) => {
                self.token = None;
                self.error = Some(e);
                self.state = State::Failed;
                false
            }
        }
    }

    /// The token produced by the last successful [advance](Self::advance)
    pub fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// The error that stopped scanning. Reaching the end of input is not an error.
    pub fn last_error(&self) -> Option<&LexingError> {
        self.error.as_ref()
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            let Some(c) = self.read()? else {
                return Ok(None);
            };
            self.start = self.last_read;
            let token = match c {
                '\n' => match self.terminator(self.start) {
                    Some(token) => token,
                    None => continue,
                },
                '#' => match self.skip_comment()? {
                    Some(newline) => match self.terminator(newline) {
                        Some(token) => token,
                        None => continue,
                    },
                    None => continue,
                },
                c if c.is_whitespace() => continue,
                c if c.is_alphabetic() || c == '_' => self.ident(c)?,
                '"' => self.string()?,
                '\'' => self.char_literal()?,
                c if c.is_ascii_digit() => self.number(c)?,
                c => self.symbol(c)?,
            };
            trace!(?token, "scanned");
            self.last_kind = token.kind();
            return Ok(Some(token));
        }
    }

    fn read(&mut self) -> LexResult<Option<char>> {
        let position = self.last_read;
        let c = self
            .source
            .read()
            .map_err(|e| LexingError::new(e, position))?;
        if let Some(c) = c {
            self.before_read = (self.line, self.column, self.last_read);
            self.column += 1;
            self.last_read = Position::new(self.line, self.column);
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            }
        }
        Ok(c)
    }

    /// Pushes back the character just read, along with the position change it caused.
    fn unread(&mut self, c: char) {
        self.source.unread(c);
        (self.line, self.column, self.last_read) = self.before_read;
    }

    fn error(&self, kind: LexingErrorKind) -> LexingError {
        LexingError::new(kind, self.last_read)
    }

    fn terminator(&self, position: Position) -> Option<Token> {
        if self.last_kind.continues_statement() {
            None
        } else {
            Some(Token::new(position, TokenKind::Terminator, TERMINATOR_TEXT))
        }
    }

    /// Skips a comment region, which extends over every directly following line that
    /// also starts with `#`. Returns the position of the new line ending the region.
    fn skip_comment(&mut self) -> LexResult<Option<Position>> {
        loop {
            loop {
                match self.read()? {
                    None => return Ok(None),
                    Some('\n') => break,
                    Some(_) => {}
                }
            }
            let newline = self.last_read;
            match self.read()? {
                Some('#') => continue,
                Some(c) => {
                    self.unread(c);
                    return Ok(Some(newline));
                }
                None => return Ok(Some(newline)),
            }
        }
    }

    fn ident(&mut self, first: char) -> LexResult<Token> {
        self.buffer.clear();
        self.buffer.push(first);
        loop {
            match self.read()? {
                Some(c) if c.is_alphanumeric() || c == '_' => self.buffer.push(c),
                Some('!') => {
                    self.buffer.push('!');
                    break;
                }
                Some(c) => {
                    self.unread(c);
                    break;
                }
                None => break,
            }
        }
        let text = std::mem::take(&mut self.buffer);
        let kind = keyword(&text).unwrap_or(TokenKind::Ident);
        Ok(Token::new(self.start, kind, text))
    }

    fn string(&mut self) -> LexResult<Token> {
        let mut value = String::new();
        loop {
            match self.read()? {
                None => return Err(self.error(LexingErrorKind::UnterminatedString)),
                Some('"') => break,
                Some('\\') => match self.escape()? {
                    Some(c) => value.push(c),
                    None => return Err(self.error(LexingErrorKind::UnterminatedString)),
                },
                Some(c) => value.push(c),
            }
        }
        Ok(Token::new(self.start, TokenKind::String, value))
    }

    /// Char literals hold exactly one, possibly escaped, character and produce int tokens.
    fn char_literal(&mut self) -> LexResult<Token> {
        let value = match self.read()? {
            None => return Err(self.error(LexingErrorKind::UnterminatedChar)),
            Some('\'') => return Err(self.error(LexingErrorKind::EmptyChar)),
            Some('\\') => match self.escape()? {
                Some(c) => c,
                None => return Err(self.error(LexingErrorKind::UnterminatedChar)),
            },
            Some(c) => c,
        };
        match self.read()? {
            Some('\'') => Ok(Token::new(
                self.start,
                TokenKind::Int,
                i64::from(u32::from(value)),
            )),
            Some(_) => Err(self.error(LexingErrorKind::CharTooLong)),
            None => Err(self.error(LexingErrorKind::UnterminatedChar)),
        }
    }

    /// Decodes the escape sequence following a `\`. Returns `None` if the input ends first.
    fn escape(&mut self) -> LexResult<Option<char>> {
        let Some(c) = self.read()? else {
            return Ok(None);
        };
        let decoded = match c {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            // the byte value becomes the code point, so `\xff` is `U+00FF`
            'x' => {
                let mut byte = 0_u8;
                for _ in 0..2 {
                    let Some(digit) = self.read()? else {
                        return Ok(None);
                    };
                    let value = digit.to_digit(16).ok_or_else(|| {
                        self.error(LexingErrorKind::InvalidEscape(format!("\\x{digit}")))
                    })?;
                    byte = byte * 16 + value as u8;
                }
                char::from(byte)
            }
            other => other,
        };
        Ok(Some(decoded))
    }

    fn number(&mut self, first: char) -> LexResult<Token> {
        self.buffer.clear();
        self.buffer.push(first);
        let mut float = false;
        loop {
            match self.read()? {
                Some(c) if float && (c.is_ascii_digit() || c == '_') => self.buffer.push(c),
                Some(c) if !float && (c.is_ascii_alphanumeric() || c == '_') => {
                    self.buffer.push(c)
                }
                Some('.') if !float => {
                    float = true;
                    self.buffer.push('.');
                }
                Some(c) => {
                    self.unread(c);
                    break;
                }
                None => break,
            }
        }
        let text = std::mem::take(&mut self.buffer);
        let token = if float {
            decode_float(&text).map(|value| Token::new(self.start, TokenKind::Float, value))
        } else {
            decode_int(&text).map(|value| Token::new(self.start, TokenKind::Int, value))
        };
        token.map_err(|reason| self.error(LexingErrorKind::MalformedNumber { text, reason }))
    }

    /// Matches the longest symbol starting with `first`
    fn symbol(&mut self, first: char) -> LexResult<Token> {
        if let Some(second) = self.read()? {
            let pair: String = [first, second].iter().collect();
            if let Some(kind) = symbol(&pair) {
                return Ok(self.fixed(kind));
            }
            self.unread(second);
        }
        match symbol(first.encode_utf8(&mut [0; 4])) {
            Some(kind) => Ok(self.fixed(kind)),
            None => Err(self.error(LexingErrorKind::UnexpectedChar(first))),
        }
    }

    fn fixed(&self, kind: TokenKind) -> Token {
        Token::new(self.start, kind, kind.text().unwrap_or_default())
    }
}

impl<S: CharSource> Iterator for Scanner<S> {
    type Item = Result<Token, LexingError>;

    /// Yields every token, then the error that stopped scanning if there was one.
    ///
    /// The error stays available from [last_error](Scanner::last_error).
    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            return self.token.clone().map(Ok);
        }
        match self.state {
            State::Failed => {
                self.state = State::Reported;
                self.error.clone().map(Err)
            }
            _ => None,
        }
    }
}

type LexResult<T> = Result<T, LexingError>;

/// A [LexingErrorKind] along with where it happened
pub type LexingError = LocatedError<LexingErrorKind>;

#[derive(Debug, Clone, Error)]
pub enum LexingErrorKind {
    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated char literal")]
    UnterminatedChar,
    #[error("empty char literal")]
    EmptyChar,
    #[error("char literal too long")]
    CharTooLong,
    #[error("invalid escape sequence: {0}")]
    InvalidEscape(String),
    #[error("malformed number {text:?}: {reason}")]
    MalformedNumber { text: String, reason: String },
    #[error(transparent)]
    Io(Arc<io::Error>),
}

impl From<io::Error> for LexingErrorKind {
    fn from(value: io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}
