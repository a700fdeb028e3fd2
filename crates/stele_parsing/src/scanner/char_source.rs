//! Character-at-a-time input for the scanner

use std::io;
use std::io::{BufReader, ErrorKind, Read};

/// A stream of characters that supports pushing back a single character.
pub trait CharSource {
    /// Reads the next character, returning `None` at the end of input
    fn read(&mut self) -> io::Result<Option<char>>;

    /// Pushes `c` back so the next [read](CharSource::read) returns it again.
    ///
    /// At most one character may be pushed back between reads.
    fn unread(&mut self, c: char);
}

/// Decodes UTF-8 characters from a [Read] obj
#[derive(Debug)]
pub struct CharReader<R> {
    reader: BufReader<R>,
    pushed_back: Option<char>,
}

impl<R: Read> CharReader<R> {
    /// Creates a new char reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pushed_back: None,
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0_u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Number of bytes in the UTF-8 sequence started by `first`
fn sequence_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(bytes: &[u8]) -> io::Error {
    io::Error::new(
        ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence {bytes:x?}"),
    )
}

impl<R: Read> CharSource for CharReader<R> {
    fn read(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.pushed_back.take() {
            return Ok(Some(c));
        }
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let len = sequence_len(first).ok_or_else(|| invalid_utf8(&[first]))?;
        let mut bytes = [first, 0, 0, 0];
        self.reader
            .read_exact(&mut bytes[1..len])
            .map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => invalid_utf8(&bytes[..1]),
                _ => e,
            })?;
        std::str::from_utf8(&bytes[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| invalid_utf8(&bytes[..len]))
    }

    fn unread(&mut self, c: char) {
        debug_assert!(
            self.pushed_back.is_none(),
            "only one character can be pushed back"
        );
        self.pushed_back = Some(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn read_all(src: &[u8]) -> io::Result<String> {
        let mut reader = CharReader::new(src);
        let mut out = String::new();
        while let Some(c) = reader.read()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn test_decodes_multibyte() {
        let text = "añ€𝄞";
        assert_eq!(read_all(text.as_bytes()).unwrap(), text);
    }

    #[test]
    fn test_unread() {
        let mut reader = CharReader::new("ab".as_bytes());
        assert_eq!(reader.read().unwrap(), Some('a'));
        reader.unread('a');
        assert_eq!(reader.read().unwrap(), Some('a'));
        assert_eq!(reader.read().unwrap(), Some('b'));
        assert_eq!(reader.read().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = read_all(&[b'a', 0xFF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        let err = read_all(&[0xE2, 0x82]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
