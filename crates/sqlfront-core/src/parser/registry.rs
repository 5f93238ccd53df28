//! The handler registry: a stack of prefix/infix handler tables.
//!
//! The base tables hold every registered handler. Entering a grammar
//! context pushes a frame cloned from the base and narrowed for that
//! context; expression parsing only ever consults the top frame. Leaving
//! the context pops the frame, so nothing a nested call disables leaks out.

use std::collections::HashMap;

use super::{ParseError, Parser};
use crate::ast::Statement;
use crate::lexer::{Symbol, TokenKind};

/// Parses an operand starting at the current token.
pub type PrefixHandler = fn(&mut Parser) -> Result<Statement, ParseError>;

/// Extends a left operand with the operator at the current token.
pub type InfixHandler = fn(&mut Parser, Statement) -> Result<Statement, ParseError>;

/// A grammar position with its own handler set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Select list and other places where `AS alias` may follow.
    Expression,
    /// Conditions and operands where a trailing word must not become an
    /// alias: `WHERE`, `HAVING`, `ON`, arguments, `ORDER BY`, ...
    Predicate,
    /// Table position: names, subqueries, table functions and aliases only.
    TableReference,
}

#[derive(Debug, Clone)]
struct Frame {
    context: Context,
    prefix: HashMap<Symbol, PrefixHandler>,
    infix: HashMap<Symbol, InfixHandler>,
}

/// Prefix and infix handler tables keyed by [`Symbol`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    prefix: HashMap<Symbol, PrefixHandler>,
    infix: HashMap<Symbol, InfixHandler>,
    frames: Vec<Frame>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overrides) a prefix handler.
    pub fn register_prefix(&mut self, symbol: Symbol, handler: PrefixHandler) {
        self.prefix.insert(symbol, handler);
    }

    /// Registers (or overrides) an infix handler.
    pub fn register_infix(&mut self, symbol: Symbol, handler: InfixHandler) {
        self.infix.insert(symbol, handler);
    }

    /// Removes a prefix handler, returning it.
    pub fn unregister_prefix(&mut self, symbol: &Symbol) -> Option<PrefixHandler> {
        self.prefix.remove(symbol)
    }

    /// Removes an infix handler, returning it.
    pub fn unregister_infix(&mut self, symbol: &Symbol) -> Option<InfixHandler> {
        self.infix.remove(symbol)
    }

    /// Pushes a frame for `context`.
    pub fn enter(&mut self, context: Context) {
        let mut prefix = self.prefix.clone();
        let mut infix = self.infix.clone();
        match context {
            Context::Expression => {}
            Context::Predicate => {
                infix.remove(&Symbol::keyword("AS"));
            }
            Context::TableReference => {
                prefix.retain(|symbol, _| {
                    matches!(
                        symbol.token_kind(),
                        TokenKind::Identifier
                            | TokenKind::QuotedIdentifier
                            | TokenKind::Macro
                            | TokenKind::LeftParen
                    )
                });
                infix.retain(|symbol, _| {
                    symbol.token_kind() == TokenKind::LeftParen || symbol.is_keyword("AS")
                });
            }
        }
        self.frames.push(Frame {
            context,
            prefix,
            infix,
        });
    }

    /// Pops the innermost frame.
    pub fn leave(&mut self) {
        self.frames.pop();
    }

    /// The innermost context, `None` outside any.
    #[must_use]
    pub fn context(&self) -> Option<Context> {
        self.frames.last().map(|frame| frame.context)
    }

    /// Number of pushed frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Disables a prefix handler in the innermost frame only.
    pub fn disable_prefix(&mut self, symbol: &Symbol) -> Option<PrefixHandler> {
        self.frames.last_mut()?.prefix.remove(symbol)
    }

    /// Disables an infix handler in the innermost frame only.
    pub fn disable_infix(&mut self, symbol: &Symbol) -> Option<InfixHandler> {
        self.frames.last_mut()?.infix.remove(symbol)
    }

    /// Looks up the active prefix handler.
    #[must_use]
    pub fn prefix(&self, symbol: &Symbol) -> Option<PrefixHandler> {
        match self.frames.last() {
            Some(frame) => frame.prefix.get(symbol).copied(),
            None => self.prefix.get(symbol).copied(),
        }
    }

    /// Looks up the active infix handler.
    #[must_use]
    pub fn infix(&self, symbol: &Symbol) -> Option<InfixHandler> {
        match self.frames.last() {
            Some(frame) => frame.infix.get(symbol).copied(),
            None => self.infix.get(symbol).copied(),
        }
    }
}
