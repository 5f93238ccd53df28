//! SQL tokenizer implementation.

use std::sync::Arc;

use tracing::trace;

use super::keywords::Lookup;
use super::{KeywordTable, Position, Source, Token, TokenKind};

/// A lexer that tokenizes SQL input against a keyword table.
///
/// Tokens are produced lazily, one per [`next_token`](Self::next_token)
/// call. Once the input is exhausted every further call yields `Eof`.
pub struct Lexer {
    source: Source,
    keywords: Arc<KeywordTable>,
    /// The position of the start of the current token.
    start: Position,
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl Lexer {
    /// Creates a new lexer over `source`.
    #[must_use]
    pub fn new(source: Source, keywords: Arc<KeywordTable>) -> Self {
        Self {
            source,
            keywords,
            start: Position::start(),
        }
    }

    /// Creates a lexer over a string, for tests and tools.
    #[must_use]
    pub fn from_text(text: &str, keywords: Arc<KeywordTable>) -> Self {
        Self::new(Source::new(text), keywords)
    }

    /// The underlying source buffer.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// The keyword table this lexer matches against.
    #[must_use]
    pub fn keywords(&self) -> &Arc<KeywordTable> {
        &self.keywords
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let literal = self
            .source
            .slice(self.start.offset, self.source.position().offset);
        Token::new(kind, literal, self.start)
    }

    /// Skips blanks between tokens (not comments; those are tokens).
    fn skip_whitespace(&mut self) {
        self.source.advance_while(char::is_whitespace);
    }

    /// Scans a `--` comment up to (not including) the end of line.
    fn scan_line_comment(&mut self) -> Token {
        self.source.advance_while(|c| c != '\n');
        let token = self.make_token(TokenKind::Comment);
        Token::new(TokenKind::Comment, token.literal.trim_end(), token.position)
    }

    /// Scans a `/* ... */` comment.
    fn scan_block_comment(&mut self) -> Token {
        self.source.advance(); // /
        self.source.advance(); // *
        loop {
            match self.source.advance() {
                Some('*') if self.source.current() == Some('/') => {
                    self.source.advance();
                    return self.make_token(TokenKind::Comment);
                }
                Some(_) => {}
                None => return self.make_token(TokenKind::Invalid),
            }
        }
    }

    /// Scans a delimited literal where a doubled delimiter escapes itself.
    ///
    /// An unterminated literal yields `Invalid` positioned at its opening
    /// delimiter.
    fn scan_delimited(&mut self, quote: char, kind: TokenKind) -> Token {
        self.source.advance(); // opening quote
        loop {
            match self.source.advance() {
                Some(c) if c == quote => {
                    if self.source.current() == Some(quote) {
                        self.source.advance();
                    } else {
                        return self.make_token(kind);
                    }
                }
                Some(_) => {}
                None => return self.make_token(TokenKind::Invalid),
            }
        }
    }

    /// Scans a number with at most one decimal point.
    fn scan_number(&mut self) -> Token {
        self.source.advance_while(|c| c.is_ascii_digit());
        if self.source.current() == Some('.')
            && self.source.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.source.advance();
            self.source.advance_while(|c| c.is_ascii_digit());
        }
        self.make_token(TokenKind::Number)
    }

    /// Scans one word chunk and returns it, possibly empty.
    fn scan_chunk(&mut self) -> String {
        let start = self.source.position().offset;
        if self.source.current().is_some_and(is_word_start) {
            self.source.advance_while(is_word_char);
        }
        self.source
            .slice(start, self.source.position().offset)
            .to_string()
    }

    /// Scans an identifier, extending it into the longest keyword phrase
    /// the table knows about.
    fn scan_word(&mut self) -> Token {
        let first = self.scan_chunk();
        let mut words = vec![first.to_lowercase()];
        if !self.keywords.lookup(&words).is_found() {
            return Token::new(TokenKind::Identifier, first, self.start);
        }

        let mut best = 1;
        let mut best_end = self.source.checkpoint();
        loop {
            self.skip_whitespace();
            let chunk = self.scan_chunk();
            if chunk.is_empty() {
                break;
            }
            words.push(chunk.to_lowercase());
            match self.keywords.lookup(&words) {
                Lookup::Exact => {
                    best = words.len();
                    best_end = self.source.checkpoint();
                }
                Lookup::Prefix => {}
                Lookup::NotFound => break,
            }
        }
        self.source.restore(best_end);

        if words.len() > 1 {
            trace!(words = ?words, matched = best, "keyword extension");
        }
        let literal = words[..best].join(" ").to_uppercase();
        Token::new(TokenKind::Keyword, literal, self.start)
    }

    /// Scans `@name`.
    fn scan_macro(&mut self) -> Token {
        self.source.advance(); // @
        self.source.advance_while(is_word_char);
        self.make_token(TokenKind::Macro)
    }

    /// Scans `:name` or `$n`; a bare prefix is invalid.
    fn scan_placeholder(&mut self, kind: TokenKind) -> Token {
        self.source.advance(); // : or $
        let body_start = self.source.position().offset;
        if kind == TokenKind::PositionalPlaceholder {
            self.source.advance_while(|c| c.is_ascii_digit());
        } else {
            self.source.advance_while(is_word_char);
        }
        if self.source.position().offset == body_start {
            return self.make_token(TokenKind::Invalid);
        }
        self.make_token(kind)
    }

    /// Consumes one operator char, or two when the second matches.
    fn scan_operator(&mut self, pairs: &[(char, TokenKind)], single: TokenKind) -> Token {
        self.source.advance();
        if let Some(next) = self.source.current() {
            if let Some(&(_, kind)) = pairs.iter().find(|(c, _)| *c == next) {
                self.source.advance();
                return self.make_token(kind);
            }
        }
        self.make_token(single)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.source.position();

        let Some(c) = self.source.current() else {
            return Token::eof(self.start);
        };
        let next = self.source.peek_next();

        match c {
            '-' if next == Some('-') => self.scan_line_comment(),
            '/' if next == Some('*') => self.scan_block_comment(),
            c if is_word_start(c) => self.scan_word(),
            '"' => self.scan_delimited('"', TokenKind::QuotedIdentifier),
            '\'' => self.scan_delimited('\'', TokenKind::String),
            c if c.is_ascii_digit() => self.scan_number(),

            ',' | '(' | ')' | ';' | '*' | '.' => {
                self.source.advance();
                self.make_token(match c {
                    ',' => TokenKind::Comma,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    ';' => TokenKind::EndOfStatement,
                    '*' => TokenKind::Star,
                    _ => TokenKind::Dot,
                })
            }

            '=' => self.scan_operator(&[('>', TokenKind::Arrow)], TokenKind::Eq),
            '<' => self.scan_operator(
                &[
                    ('>', TokenKind::NotEq),
                    ('=', TokenKind::LtEq),
                    ('<', TokenKind::ShiftLeft),
                ],
                TokenKind::Lt,
            ),
            '>' => self.scan_operator(
                &[('=', TokenKind::GtEq), ('>', TokenKind::ShiftRight)],
                TokenKind::Gt,
            ),
            '!' => self.scan_operator(&[('=', TokenKind::NotEq)], TokenKind::Invalid),
            '+' => self.scan_operator(&[('=', TokenKind::PlusEq)], TokenKind::Plus),
            '-' => self.scan_operator(&[('=', TokenKind::MinusEq)], TokenKind::Minus),
            '/' => self.scan_operator(&[('=', TokenKind::SlashEq)], TokenKind::Slash),
            '%' => self.scan_operator(&[('=', TokenKind::PercentEq)], TokenKind::Percent),
            '|' => self.scan_operator(&[('|', TokenKind::Concat)], TokenKind::Pipe),
            '&' => self.scan_operator(&[], TokenKind::Ampersand),
            '~' => self.scan_operator(&[], TokenKind::Tilde),

            '@' => self.scan_macro(),
            '?' => {
                self.source.advance();
                self.make_token(TokenKind::Question)
            }
            ':' => self.scan_placeholder(TokenKind::NamedPlaceholder),
            '$' => self.scan_placeholder(TokenKind::PositionalPlaceholder),

            _ => {
                self.source.advance();
                self.make_token(TokenKind::Invalid)
            }
        }
    }

    /// Tokenizes the rest of the input, including the final `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
