//! SQL Parser implementation.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::error::ParseError;
use super::pratt::{self, binding_power, LOWEST, NEGATABLE};
use super::registry::{Context, Registry};
use super::{expr, ParserOptions};
use crate::ast::Statement;
use crate::dialect::{AnsiDialect, Dialect};
use crate::error::{Error, Result};
use crate::lexer::{KeywordTable, Lexer, Position, Source, Token, TokenKind};

/// Parses a whole statement, starting at its leading keyword.
pub type StatementHandler = fn(&mut Parser) -> std::result::Result<Statement, ParseError>;

/// A suspended input: the including file while an included one is parsed.
struct Frame {
    lexer: Lexer,
    current: Token,
    peeked: Token,
    path: Option<PathBuf>,
    base_dir: PathBuf,
    /// Comments lexed after the directive, attached once the frame resumes.
    comments: Vec<Token>,
}

/// SQL Parser.
///
/// Call [`parse`](Self::parse) repeatedly (or iterate) to obtain the
/// statements of a script in source order.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peeked: Token,
    /// Canonical path of the input being read, if it is a file.
    path: Option<PathBuf>,
    /// Directory `@include` paths resolve against.
    base_dir: PathBuf,
    frames: Vec<Frame>,
    /// Comments seen by the lexer and not yet attached.
    comments: Vec<Token>,
    keywords: Arc<KeywordTable>,
    registry: Registry,
    statements: HashMap<String, StatementHandler>,
    options: ParserOptions,
    statement_start: Position,
    /// Current nesting of statements and expressions.
    depth: usize,
}

impl Parser {
    /// Creates a parser for the given input using the ANSI dialect.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_dialect(input, &AnsiDialect)
    }

    /// Creates a parser for the given input using `dialect`.
    #[must_use]
    pub fn with_dialect(input: &str, dialect: &dyn Dialect) -> Self {
        Self::from_source(Source::new(input), dialect, None, PathBuf::new())
    }

    /// Reads the whole of `reader` and creates a parser over it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails or the input is not UTF-8.
    pub fn from_reader(reader: impl Read, dialect: &dyn Dialect) -> Result<Self> {
        let source = Source::from_reader(reader)?;
        Ok(Self::from_source(source, dialect, None, PathBuf::new()))
    }

    /// Reads a script file; `@include` paths resolve against its directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>, dialect: &dyn Dialect) -> Result<Self> {
        let path = path.as_ref().canonicalize()?;
        let source = Source::from_reader(File::open(&path)?)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::from_source(source, dialect, Some(path), base_dir))
    }

    fn from_source(
        source: Source,
        dialect: &dyn Dialect,
        path: Option<PathBuf>,
        base_dir: PathBuf,
    ) -> Self {
        let keywords = Arc::new(dialect.keywords());
        let lexer = Lexer::new(source, Arc::clone(&keywords));
        let start = lexer.source().position();
        let mut parser = Self {
            lexer,
            current: Token::eof(start),
            peeked: Token::eof(start),
            path,
            base_dir,
            frames: Vec::new(),
            comments: Vec::new(),
            keywords,
            registry: expr::standard_registry(),
            statements: super::dispatch::standard_statements(),
            options: ParserOptions::default(),
            statement_start: start,
            depth: 0,
        };
        parser.prime();
        dialect.configure(&mut parser);
        parser
    }

    /// Replaces the parser options.
    #[must_use]
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// The active options.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The keyword table the lexer matches against.
    #[must_use]
    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    // --- Extension points ---

    /// The expression handler registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the expression handler registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Registers (or overrides) the grammar for statements starting with
    /// `keyword`.
    pub fn register_statement(&mut self, keyword: &str, handler: StatementHandler) {
        self.statements.insert(keyword.to_uppercase(), handler);
    }

    /// Removes the grammar for `keyword`, returning it.
    pub fn unregister_statement(&mut self, keyword: &str) -> Option<StatementHandler> {
        self.statements.remove(&keyword.to_uppercase())
    }

    // --- Top level ---

    /// Parses the next statement.
    ///
    /// Returns `Ok(None)` once the input (including every included file)
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] for a malformed statement; the parser has already
    /// skipped past its terminator, so the next call continues with the
    /// following statement. Include failures are not recoverable.
    pub fn parse(&mut self) -> Result<Option<Statement>> {
        loop {
            match self.current.kind {
                TokenKind::Eof => {
                    if self.pop_frame() {
                        continue;
                    }
                    self.comments.clear();
                    return Ok(None);
                }
                TokenKind::EndOfStatement => {
                    self.advance();
                }
                TokenKind::Macro => self.directive()?,
                _ => return self.parse_top_level().map(Some),
            }
        }
    }

    fn parse_top_level(&mut self) -> Result<Statement> {
        let leading = self.take_leading_comments();
        self.statement_start = self.current.position;

        let statement = match self.parse_statement() {
            Ok(statement) => statement,
            Err(err) => return Err(self.recover(err)),
        };
        let trailing = match self.current.kind {
            TokenKind::EndOfStatement => {
                let terminator = self.advance();
                self.take_trailing_comment(&terminator)
            }
            TokenKind::Eof => None,
            _ => {
                let err = self.unexpected("statement", "';' or end of input");
                return Err(self.recover(err));
            }
        };

        if leading.is_empty() && trailing.is_none() {
            Ok(statement)
        } else {
            Ok(Statement::Commented {
                leading,
                trailing,
                statement: Box::new(statement),
            })
        }
    }

    /// Dispatches on the current keyword to a statement grammar.
    ///
    /// The grammar consumes everything up to, not including, the
    /// terminator.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no grammar is registered for the current
    /// token or the grammar rejects the input.
    pub fn parse_statement(&mut self) -> std::result::Result<Statement, ParseError> {
        let handler = if self.current.is_keyword() {
            self.statements.get(&self.current.literal).copied()
        } else {
            None
        };
        match handler {
            Some(handler) => {
                debug!(keyword = %self.current.literal, line = self.current.position.line, "dispatch statement");
                self.nested(handler)
            }
            None => Err(self.unexpected("statement", "a statement keyword")),
        }
    }

    /// Runs `f` one nesting level deeper.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` tagged `nesting` once
    /// [`ParserOptions::max_nesting_depth`] is reached, else whatever `f`
    /// returns.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> std::result::Result<T, ParseError>,
    ) -> std::result::Result<T, ParseError> {
        let limit = self.options.max_nesting_depth;
        if self.depth >= limit {
            return Err(self.error("nesting", format!("nesting deeper than {limit} levels")));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parses statements until `until` matches the current token.
    ///
    /// Each statement is terminated by `;`; the terminator may be omitted
    /// before the closing token.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` on a malformed statement or if the input ends
    /// before `until` matches.
    pub fn parse_statement_list(
        &mut self,
        context: &'static str,
        until: fn(&Token) -> bool,
    ) -> std::result::Result<Vec<Statement>, ParseError> {
        let mut body = Vec::new();
        while !until(&self.current) {
            if self.current.is_eof() {
                return Err(self.unexpected(context, "end of block"));
            }
            if self.consume(TokenKind::EndOfStatement) {
                continue;
            }
            body.push(self.parse_statement()?);
            if !self.consume(TokenKind::EndOfStatement) && !until(&self.current) {
                return Err(self.unexpected(context, "';'"));
            }
        }
        Ok(body)
    }

    /// Skips the rest of a failed statement and attaches its text.
    fn recover(&mut self, err: ParseError) -> Error {
        let mut skipped = 0_usize;
        while !self.current.is_terminator() {
            self.advance();
            skipped += 1;
        }
        let end = self.current.offset();
        if self.current.kind == TokenKind::EndOfStatement {
            self.advance();
        }
        self.comments.retain(|comment| comment.offset() > end);

        let err = if self.options.capture_statement_text {
            let text = self
                .lexer
                .source()
                .slice(self.statement_start.offset, end)
                .trim_end()
                .to_string();
            err.with_statement(text, self.statement_start)
        } else {
            err
        };
        debug!(context = err.context, skipped, "resynchronised after syntax error");
        Error::Syntax(err)
    }

    fn take_leading_comments(&mut self) -> Vec<String> {
        let offset = self.current.offset();
        let (leading, rest): (Vec<Token>, Vec<Token>) = std::mem::take(&mut self.comments)
            .into_iter()
            .partition(|comment| comment.offset() < offset);
        self.comments = rest;
        leading.into_iter().map(|comment| comment.literal).collect()
    }

    fn take_trailing_comment(&mut self, terminator: &Token) -> Option<String> {
        self.comments
            .retain(|comment| comment.offset() > terminator.offset());
        let first = self.comments.first()?;
        if first.position.line == terminator.position.line {
            Some(self.comments.remove(0).literal)
        } else {
            None
        }
    }

    // --- Include frames ---

    fn directive(&mut self) -> Result<()> {
        self.statement_start = self.current.position;
        if !self.current.literal.eq_ignore_ascii_case("@include") {
            let err = ParseError::new(
                "macro",
                format!("unknown directive {}", self.current.literal),
                self.current.clone(),
            );
            return Err(self.recover(err));
        }
        self.advance();
        if self.current.kind != TokenKind::String {
            let err = self.unexpected("include", "a quoted path");
            return Err(self.recover(err));
        }
        let path_token = self.advance();
        let relative = unquote(&path_token.literal);
        self.consume(TokenKind::EndOfStatement);
        self.push_frame(&relative, path_token.offset())
    }

    /// Suspends the current input and starts reading `relative`. Pending
    /// comments lexed after `after` stay with the suspended frame.
    fn push_frame(&mut self, relative: &str, after: usize) -> Result<()> {
        let resolved = self.base_dir.join(relative);
        let path = resolved.canonicalize().map_err(|source| Error::Include {
            path: resolved.clone(),
            source,
        })?;
        let cycle = self.path.as_ref() == Some(&path)
            || self.frames.iter().any(|frame| frame.path.as_ref() == Some(&path));
        if cycle {
            return Err(Error::IncludeCycle { path });
        }
        if self.frames.len() >= self.options.max_include_depth {
            return Err(Error::IncludeDepth {
                path,
                limit: self.options.max_include_depth,
            });
        }
        let source = File::open(&path)
            .and_then(Source::from_reader)
            .map_err(|source| Error::Include {
                path: path.clone(),
                source,
            })?;

        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let lexer = Lexer::new(source, Arc::clone(&self.keywords));
        let mut comments = std::mem::take(&mut self.comments);
        comments.retain(|comment| comment.offset() > after);
        let frame = Frame {
            lexer: std::mem::replace(&mut self.lexer, lexer),
            current: self.current.clone(),
            peeked: self.peeked.clone(),
            path: std::mem::replace(&mut self.path, Some(path)),
            base_dir: std::mem::replace(&mut self.base_dir, base_dir),
            comments,
        };
        self.frames.push(frame);
        self.prime();
        debug!(path = ?self.path, depth = self.frames.len(), "include push");
        Ok(())
    }

    fn pop_frame(&mut self) -> bool {
        let Some(frame) = self.frames.pop() else {
            return false;
        };
        debug!(path = ?self.path, depth = self.frames.len(), "include pop");
        self.lexer = frame.lexer;
        self.current = frame.current;
        self.peeked = frame.peeked;
        self.path = frame.path;
        self.base_dir = frame.base_dir;
        self.comments = frame.comments;
        true
    }

    // --- Tokens ---

    fn next_significant(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            if token.kind == TokenKind::Comment {
                self.comments.push(token);
            } else {
                return token;
            }
        }
    }

    fn prime(&mut self) {
        self.current = self.next_significant();
        self.peeked = self.next_significant();
    }

    /// The current token.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// The token after the current one.
    #[must_use]
    pub const fn peek(&self) -> &Token {
        &self.peeked
    }

    /// Advances to the next token, returning the one consumed.
    pub fn advance(&mut self) -> Token {
        let next = self.next_significant();
        let peeked = std::mem::replace(&mut self.peeked, next);
        std::mem::replace(&mut self.current, peeked)
    }

    /// Checks if the current token is of the given kind.
    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Checks if the current token is the given keyword phrase.
    #[must_use]
    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.current.is_keyword_literal(keyword)
    }

    /// Checks if the current token is any of the given keyword phrases.
    #[must_use]
    pub fn check_any_keyword(&self, keywords: &[&str]) -> bool {
        self.current.is_keyword() && keywords.contains(&self.current.literal.as_str())
    }

    /// Consumes the current token if it is of the given kind.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be of the given kind.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` tagged with `context` otherwise.
    pub fn expect(
        &mut self,
        kind: TokenKind,
        context: &'static str,
    ) -> std::result::Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(context, kind.describe()))
        }
    }

    /// Expects the current token to be the given keyword.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` tagged with `context` otherwise.
    pub fn expect_keyword(
        &mut self,
        keyword: &str,
        context: &'static str,
    ) -> std::result::Result<Token, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(context, keyword))
        }
    }

    /// Expects and returns an identifier (bare or quoted, as written).
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` tagged with `context` otherwise.
    pub fn expect_identifier(
        &mut self,
        context: &'static str,
    ) -> std::result::Result<String, ParseError> {
        if self.current.is_identifier() {
            Ok(self.advance().literal)
        } else {
            Err(self.unexpected(context, "identifier"))
        }
    }

    /// The source spelling of `token`. Keywords come back as written
    /// instead of upper-cased, so `t.Left` keeps its `Left`.
    #[must_use]
    pub fn spelling(&self, token: &Token) -> String {
        if !token.is_keyword() {
            return token.literal.clone();
        }
        let text = self.lexer.source().text();
        let mut offset = token.offset();
        let mut words = Vec::new();
        for word in token.literal.split(' ') {
            let rest = text.get(offset..).unwrap_or_default();
            let start = offset + rest.len() - rest.trim_start().len();
            let Some(spelled) = text.get(start..start + word.len()) else {
                return token.literal.to_lowercase();
            };
            words.push(spelled);
            offset = start + word.len();
        }
        words.join(" ")
    }

    /// An error about the current token.
    #[must_use]
    pub fn error(&self, context: &'static str, message: impl Into<String>) -> ParseError {
        ParseError::new(context, message, self.current.clone())
    }

    /// An "expected X, found <current>" error.
    #[must_use]
    pub fn unexpected(&self, context: &'static str, expected: &str) -> ParseError {
        ParseError::unexpected(context, expected, self.current.clone())
    }

    // --- Expressions ---

    /// Runs `f` with a handler frame for `context` pushed, popping it on
    /// every path.
    ///
    /// # Errors
    ///
    /// Propagates the error from `f`.
    pub fn with_context<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> std::result::Result<T, ParseError>,
    ) -> std::result::Result<T, ParseError> {
        self.registry.enter(context);
        let result = f(self);
        self.registry.leave();
        result
    }

    /// The infix binding power of the current token.
    fn infix_power(&self) -> u8 {
        if self.current.is_keyword_literal("NOT") {
            let negates = self.peeked.is_keyword() && NEGATABLE.contains(&self.peeked.literal.as_str());
            return if negates { pratt::COMPARE } else { LOWEST };
        }
        binding_power(&self.current.symbol())
    }

    /// Parses an expression with the active handler frame.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no prefix handler accepts the current token
    /// or a handler fails.
    pub fn parse_expression(&mut self, min_power: u8) -> std::result::Result<Statement, ParseError> {
        self.nested(|p| p.parse_operand_chain(min_power))
    }

    fn parse_operand_chain(&mut self, min_power: u8) -> std::result::Result<Statement, ParseError> {
        let symbol = self.current.symbol();
        let mut left = match self.registry.prefix(&symbol) {
            Some(handler) => handler(self)?,
            None if expr::is_keyword_function(self) => expr::keyword_function(self)?,
            None => return Err(self.unexpected("expression", "an expression")),
        };

        loop {
            if matches!(
                self.current.kind,
                TokenKind::EndOfStatement | TokenKind::Eof | TokenKind::RightParen | TokenKind::Comma
            ) {
                break;
            }
            if min_power >= self.infix_power() {
                break;
            }
            let Some(handler) = self.registry.infix(&self.current.symbol()) else {
                break;
            };
            left = handler(self, left)?;
        }

        Ok(left)
    }

    /// Parses a full expression in a fresh `context` frame.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the expression is malformed.
    pub fn parse_expression_in(
        &mut self,
        context: Context,
    ) -> std::result::Result<Statement, ParseError> {
        self.with_context(context, |p| p.parse_expression(LOWEST))
    }

    /// Parses a comma-separated list of expressions in `context`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if an item is malformed.
    pub fn parse_expression_list(
        &mut self,
        context: Context,
    ) -> std::result::Result<Vec<Statement>, ParseError> {
        self.with_context(context, |p| {
            let mut items = vec![p.parse_expression(LOWEST)?];
            while p.consume(TokenKind::Comma) {
                items.push(p.parse_expression(LOWEST)?);
            }
            Ok(items)
        })
    }

    /// Parses a comma-separated list of identifiers.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if an item is not an identifier.
    pub fn parse_identifier_list(
        &mut self,
        context: &'static str,
    ) -> std::result::Result<Vec<String>, ParseError> {
        let mut idents = vec![self.expect_identifier(context)?];
        while self.consume(TokenKind::Comma) {
            idents.push(self.expect_identifier(context)?);
        }
        Ok(idents)
    }

    /// Parses a parenthesized identifier list: `(a, b)`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the list is malformed.
    pub fn parse_column_list(
        &mut self,
        context: &'static str,
    ) -> std::result::Result<Vec<String>, ParseError> {
        self.expect(TokenKind::LeftParen, context)?;
        let columns = self.parse_identifier_list(context)?;
        self.expect(TokenKind::RightParen, context)?;
        Ok(columns)
    }

    /// Parses a dotted object name such as `schema.table`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token is not an identifier.
    pub fn parse_name(&mut self, context: &'static str) -> std::result::Result<Statement, ParseError> {
        let mut parts = vec![self.expect_identifier(context)?];
        while self.consume(TokenKind::Dot) {
            parts.push(self.expect_identifier(context)?);
        }
        Ok(Statement::Name { parts })
    }
}

impl Iterator for Parser {
    type Item = Result<Statement>;

    /// Yields statements until the input ends or an include fails.
    fn next(&mut self) -> Option<Self::Item> {
        match self.parse() {
            Ok(Some(statement)) => Some(Ok(statement)),
            Ok(None) => None,
            Err(err) if err.is_recoverable() => Some(Err(err)),
            Err(err) => {
                self.frames.clear();
                self.current = Token::eof(self.current.position);
                Some(Err(err))
            }
        }
    }
}

/// Strips the quotes of a string literal and unescapes doubled quotes.
pub(crate) fn unquote(literal: &str) -> String {
    literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(literal)
        .replace("''", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Result<Option<Statement>> {
        Parser::new(sql).parse()
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_none());
        assert!(parse("  ;; ").unwrap().is_none());
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT 1;").unwrap().unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_terminator_optional_at_eof() {
        assert!(parse("SELECT 1").unwrap().is_some());
    }

    #[test]
    fn test_missing_terminator() {
        let err = parse("SELECT 1 2").unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.context, "statement");
        assert_eq!(err.token.literal, "2");
    }

    #[test]
    fn test_unknown_statement_keyword() {
        let err = parse("FROM t;").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.as_syntax().unwrap().context, "statement");
    }

    #[test]
    fn test_recovery_skips_to_next_statement() {
        let mut parser = Parser::new("SELECT FROM; SELECT 2;");
        assert!(parser.parse().is_err());
        let stmt = parser.parse().unwrap().unwrap();
        assert_eq!(stmt.to_string(), "SELECT 2");
        assert!(parser.parse().unwrap().is_none());
    }

    #[test]
    fn test_error_carries_statement_text() {
        let mut parser = Parser::new("SELECT 1;\nSELECT a FROM WHERE;\n");
        parser.parse().unwrap();
        let err = parser.parse().unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.statement.as_deref(), Some("SELECT a FROM WHERE"));
        assert_eq!(err.statement_start, Position::new(2, 1, 10));
    }

    #[test]
    fn test_statement_text_can_be_disabled() {
        let options = ParserOptions {
            capture_statement_text: false,
            ..ParserOptions::default()
        };
        let mut parser = Parser::new("SELECT FROM;").with_options(options);
        let err = parser.parse().unwrap_err();
        assert!(err.as_syntax().unwrap().statement.is_none());
    }

    #[test]
    fn test_leading_and_trailing_comments() {
        let mut parser = Parser::new("-- first\n/* second */\nSELECT 1; -- after\nSELECT 2;");
        match parser.parse().unwrap().unwrap() {
            Statement::Commented {
                leading,
                trailing,
                statement,
            } => {
                assert_eq!(leading, vec!["-- first", "/* second */"]);
                assert_eq!(trailing.as_deref(), Some("-- after"));
                assert_eq!(statement.to_string(), "SELECT 1");
            }
            other => panic!("expected commented statement, got {other:?}"),
        }
        assert_eq!(parser.parse().unwrap().unwrap().to_string(), "SELECT 2");
    }

    #[test]
    fn test_comment_on_next_line_is_leading() {
        let mut parser = Parser::new("SELECT 1;\n-- about two\nSELECT 2;");
        assert_eq!(parser.parse().unwrap().unwrap().to_string(), "SELECT 1");
        match parser.parse().unwrap().unwrap() {
            Statement::Commented { leading, trailing, .. } => {
                assert_eq!(leading, vec!["-- about two"]);
                assert!(trailing.is_none());
            }
            other => panic!("expected commented statement, got {other:?}"),
        }
    }

    #[test]
    fn test_inner_comments_are_dropped() {
        let stmt = parse("SELECT a, -- note\n b FROM t;").unwrap().unwrap();
        assert_eq!(stmt.to_string(), "SELECT a, b FROM t");
    }

    #[test]
    fn test_unknown_directive() {
        let mut parser = Parser::new("@foo 'x'; SELECT 1;");
        let err = parser.parse().unwrap_err();
        assert_eq!(err.as_syntax().unwrap().context, "macro");
        assert!(parser.parse().unwrap().is_some());
    }

    #[test]
    fn test_iterator() {
        let results: Vec<_> = Parser::new("SELECT 1; SELECT; SELECT 3;").collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'a.sql'"), "a.sql");
        assert_eq!(unquote("'it''s.sql'"), "it's.sql");
    }
}
