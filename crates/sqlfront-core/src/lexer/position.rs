//! Source location tracking for tokens and errors.

use std::fmt;

/// A location in the source text.
///
/// `line` and `column` are 1-based and count code points; `offset` is the
/// byte offset into the decoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-based).
    pub line: usize,
    /// Column number in code points (1-based).
    pub column: usize,
    /// Byte offset from the start of the input.
    pub offset: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The position of the first code point of an input.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_start() {
        let pos = Position::start();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7, 42).to_string(), "line 3, column 7");
    }
}
