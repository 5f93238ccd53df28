//! Crate-level error type.

use std::path::PathBuf;

use crate::parser::ParseError;

/// Errors returned by [`Parser::parse`](crate::Parser::parse).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A statement failed to parse. The parser has already skipped past it.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// The root input could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An included file could not be read.
    #[error("Cannot include '{}': {source}", .path.display())]
    Include {
        /// The resolved path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A file includes itself, directly or through other files.
    #[error("Include cycle detected at '{}'", .path.display())]
    IncludeCycle {
        /// The path that closed the cycle.
        path: PathBuf,
    },

    /// Includes nest deeper than the configured limit.
    #[error("Include depth limit of {limit} exceeded at '{}'", .path.display())]
    IncludeDepth {
        /// The path that would exceed the limit.
        path: PathBuf,
        /// The configured limit.
        limit: usize,
    },
}

impl Error {
    /// Returns true if another `parse()` call can make progress.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// The syntax error, if this is one.
    #[must_use]
    pub const fn as_syntax(&self) -> Option<&ParseError> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, Error>;
