//! The in-memory source buffer scanned by the lexer.
//!
//! The whole input is materialised before scanning starts; scripts are
//! small and the multi-word keyword lookahead needs to rewind freely.

use std::io::{self, Read};

use super::Position;

const BOM: char = '\u{feff}';

/// A saved cursor state that can be restored later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: Position,
}

impl Checkpoint {
    /// The position captured by this checkpoint.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Decoded input text plus a code point cursor.
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
    position: Position,
}

impl Source {
    /// Creates a source over the given text, dropping a leading BOM.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with(BOM) {
            text.drain(..BOM.len_utf8());
        }
        Self {
            text,
            position: Position::start(),
        }
    }

    /// Reads the whole reader into memory.
    ///
    /// # Errors
    ///
    /// Returns the reader's error, or `InvalidData` if the bytes are not
    /// valid UTF-8.
    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text =
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self::new(text))
    }

    /// The full decoded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text between two byte offsets, clamped to the input.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.text.len());
        let start = start.min(end);
        self.text.get(start..end).unwrap_or_default()
    }

    /// The current cursor position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The code point under the cursor, or `None` once the input is done.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.text[self.position.offset..].chars().next()
    }

    /// The code point after the current one, without consuming anything.
    #[must_use]
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.text[self.position.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Returns true once every code point has been consumed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.position.offset >= self.text.len()
    }

    /// Consumes the current code point and returns it.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.position.offset += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// Consumes code points while `pred` holds.
    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Captures the cursor so it can be restored.
    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
        }
    }

    /// Moves the cursor back to a previously captured checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
    }
}
