//! Token types for the SQL lexer.

use std::fmt;

use super::Position;

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    /// End of input.
    Eof,
    /// Statement terminator (`;`).
    EndOfStatement,
    /// A `--` line comment or `/* */` block comment.
    Comment,
    /// Anything the lexer could not classify, or an unterminated literal.
    Invalid,

    // Words and literals
    /// Bare identifier (e.g., `column_name`).
    Identifier,
    /// Double-quoted identifier (e.g., `"column name"`).
    QuotedIdentifier,
    /// Single-quoted string literal.
    String,
    /// Numeric literal.
    Number,
    /// Keyword phrase from the keyword table (e.g., `GROUP BY`).
    Keyword,
    /// `@name` directive or variable.
    Macro,

    // Punctuation
    /// ,
    Comma,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// *
    Star,
    /// .
    Dot,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// `<>` or `!=`
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// <<
    ShiftLeft,
    /// >>
    ShiftRight,
    /// ||
    Concat,
    /// |
    Pipe,
    /// &
    Ampersand,
    /// ~
    Tilde,
    /// +=
    PlusEq,
    /// -=
    MinusEq,
    /// /=
    SlashEq,
    /// %=
    PercentEq,
    /// =>
    Arrow,

    // Placeholders
    /// ?
    Question,
    /// :name
    NamedPlaceholder,
    /// $1
    PositionalPlaceholder,
}

impl TokenKind {
    /// Returns a short human-readable description of the kind.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::EndOfStatement => "';'",
            Self::Comment => "comment",
            Self::Invalid => "invalid token",
            Self::Identifier | Self::QuotedIdentifier => "identifier",
            Self::String => "string literal",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::Macro => "macro",
            Self::Comma => "','",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Star => "'*'",
            Self::Dot => "'.'",
            Self::Question | Self::NamedPlaceholder | Self::PositionalPlaceholder => "placeholder",
            _ => "operator",
        }
    }
}

/// A token with its literal text and source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The literal text. Keywords are normalized to upper case with single
    /// spaces; every other kind keeps its source text verbatim.
    pub literal: String,
    /// Where the token starts.
    pub position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    /// Creates an end-of-input token at `position`.
    #[must_use]
    pub const fn eof(position: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            literal: String::new(),
            position,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword)
    }

    /// Returns true if this is the keyword phrase `keyword` (upper case).
    #[must_use]
    pub fn is_keyword_literal(&self, keyword: &str) -> bool {
        self.is_keyword() && self.literal == keyword
    }

    /// Returns true for bare and quoted identifiers.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        )
    }

    /// Returns true for `;` and end of input.
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfStatement | TokenKind::Eof)
    }

    /// Byte offset of the first character of the token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.position.offset
    }

    /// The reduced lookup key for this token.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        Symbol::of(self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Keyword => write!(f, "keyword {}", self.literal),
            TokenKind::Identifier
            | TokenKind::QuotedIdentifier
            | TokenKind::String
            | TokenKind::Number
            | TokenKind::Macro
            | TokenKind::Comment
            | TokenKind::Invalid
            | TokenKind::Question
            | TokenKind::NamedPlaceholder
            | TokenKind::PositionalPlaceholder => {
                write!(f, "{} '{}'", self.kind.describe(), self.literal)
            }
            _ => write!(f, "'{}'", self.literal),
        }
    }
}

/// Reduced key used by the binding table and the handler registry.
///
/// Keywords are distinguished by their literal; any other token kind
/// collapses to a single symbol regardless of its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    kind: TokenKind,
    keyword: String,
}

impl Symbol {
    /// A symbol for a non-keyword token kind.
    #[must_use]
    pub const fn kind(kind: TokenKind) -> Self {
        Self {
            kind,
            keyword: String::new(),
        }
    }

    /// A symbol for a keyword phrase (case-insensitive).
    #[must_use]
    pub fn keyword(literal: &str) -> Self {
        Self {
            kind: TokenKind::Keyword,
            keyword: literal.to_uppercase(),
        }
    }

    /// The symbol for a token.
    #[must_use]
    pub fn of(token: &Token) -> Self {
        if token.is_keyword() {
            Self {
                kind: TokenKind::Keyword,
                keyword: token.literal.clone(),
            }
        } else {
            Self::kind(token.kind)
        }
    }

    /// The token kind of this symbol.
    #[must_use]
    pub const fn token_kind(&self) -> TokenKind {
        self.kind
    }

    /// The keyword literal, empty for non-keywords.
    #[must_use]
    pub fn keyword_literal(&self) -> &str {
        &self.keyword
    }

    /// Returns true if this symbol is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, literal: &str) -> bool {
        self.kind == TokenKind::Keyword && self.keyword == literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal, Position::start())
    }

    #[test]
    fn test_token_is_eof() {
        let eof = Token::eof(Position::start());
        let select = token(TokenKind::Keyword, "SELECT");
        assert!(eof.is_eof());
        assert!(!select.is_eof());
        assert!(eof.is_terminator());
    }

    #[test]
    fn test_is_keyword_literal() {
        let group_by = token(TokenKind::Keyword, "GROUP BY");
        assert!(group_by.is_keyword_literal("GROUP BY"));
        assert!(!group_by.is_keyword_literal("GROUP"));
        let ident = token(TokenKind::Identifier, "GROUP BY");
        assert!(!ident.is_keyword_literal("GROUP BY"));
    }

    #[test]
    fn test_symbol_collapses_non_keywords() {
        let a = token(TokenKind::Identifier, "a").symbol();
        let b = token(TokenKind::Identifier, "b").symbol();
        assert_eq!(a, b);
        assert_eq!(a, Symbol::kind(TokenKind::Identifier));
    }

    #[test]
    fn test_symbol_distinguishes_keywords() {
        let and = token(TokenKind::Keyword, "AND").symbol();
        let or = token(TokenKind::Keyword, "OR").symbol();
        assert_ne!(and, or);
        assert_eq!(and, Symbol::keyword("and"));
        assert!(and.is_keyword("AND"));
        assert_eq!(or.keyword_literal(), "OR");
    }

    #[test]
    fn test_token_display() {
        assert_eq!(
            token(TokenKind::Keyword, "ORDER BY").to_string(),
            "keyword ORDER BY"
        );
        assert_eq!(token(TokenKind::Comma, ",").to_string(), "','");
        assert_eq!(
            token(TokenKind::Identifier, "users").to_string(),
            "identifier 'users'"
        );
    }
}
