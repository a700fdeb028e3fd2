//! Locations within source text

use std::fmt::{Display, Formatter};

/// Something that knows where in the source text it came from.
pub trait Positioned {
    fn position(&self) -> Position;
}

/// A location in source text.
///
/// Lines are 1-based. Columns count the characters consumed on the line, so the
/// first character of a line is in column 1.
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Position {
    line: usize,
    column: usize,
}

impl Position {
    /// Creates a new position
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn line(&self) -> usize {
        self.line
    }

    pub const fn column(&self) -> usize {
        self.column
    }
}

impl Positioned for Position {
    fn position(&self) -> Position {
        *self
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_positions_order_by_line_first() {
        assert!(Position::new(1, 40) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 2));
    }
}
