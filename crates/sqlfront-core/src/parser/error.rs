//! Parser error types.

use crate::lexer::{Position, Token};

/// A syntax error in one statement.
///
/// Carries everything a caller needs to point at the problem: the grammar
/// rule that failed, the offending token with its position, and (when
/// captured) the full text of the statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{context}: {message} at {}", .token.position)]
pub struct ParseError {
    /// The grammar rule that failed, e.g. `"select"`, `"join"`.
    pub context: &'static str,
    /// The error message.
    pub message: String,
    /// The offending token.
    pub token: Token,
    /// Text of the statement being parsed.
    pub statement: Option<String>,
    /// Where that statement starts.
    pub statement_start: Position,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(context: &'static str, message: impl Into<String>, token: Token) -> Self {
        Self {
            context,
            message: message.into(),
            token,
            statement: None,
            statement_start: Position::start(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(context: &'static str, expected: &str, token: Token) -> Self {
        let message = format!("expected {expected}, found {token}");
        Self::new(context, message, token)
    }

    /// Attaches the text of the enclosing statement.
    #[must_use]
    pub fn with_statement(mut self, text: impl Into<String>, start: Position) -> Self {
        self.statement = Some(text.into());
        self.statement_start = start;
        self
    }

    /// The position of the offending token.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.token.position
    }

    /// Renders the offending line with a caret under the offending token.
    ///
    /// Returns `None` when no statement text was captured.
    #[must_use]
    pub fn snippet(&self) -> Option<String> {
        let text = self.statement.as_deref()?;
        let relative = self
            .token
            .offset()
            .saturating_sub(self.statement_start.offset)
            .min(text.len());
        let head = text.get(..relative)?;
        let line_start = head.rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[relative..]
            .find('\n')
            .map_or(text.len(), |i| relative + i);
        let line = &text[line_start..line_end];
        let column = text[line_start..relative].chars().count();

        let number = self.token.position.line.to_string();
        let gutter = " ".repeat(number.len());
        Some(format!(
            "{number} | {line}\n{gutter} | {}^",
            " ".repeat(column)
        ))
    }
}
