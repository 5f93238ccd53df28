//! Binding powers for Pratt expression parsing.
//!
//! Higher binding power binds tighter. The expression loop keeps consuming
//! infix operators while `min_power < binding_power(current)`, so every
//! operator here is left-associative.

use crate::lexer::{Symbol, TokenKind};

/// Sentinel: binds nothing.
pub const LOWEST: u8 = 0;
/// `AS alias`, looser than any operator.
pub const ALIAS: u8 = 1;
/// `OR`.
pub const OR: u8 = 2;
/// `AND`.
pub const AND: u8 = 3;
/// Operand level of prefix `NOT`.
pub const NOT: u8 = 4;
/// Comparisons, `LIKE`, `IN`, `BETWEEN`, `IS`.
pub const COMPARE: u8 = 5;
/// `|`, `&`, `<<`, `>>`.
pub const BITWISE: u8 = 6;
/// `||`.
pub const CONCAT: u8 = 7;
/// `+`, `-`.
pub const ADDITIVE: u8 = 8;
/// `*`, `/`, `%`.
pub const MULTIPLICATIVE: u8 = 9;
/// `COLLATE`.
pub const COLLATE: u8 = 10;
/// Operand level of prefix `-`, `+`, `~`.
pub const UNARY: u8 = 11;
/// Function call `(`.
pub const CALL: u8 = 12;

/// Keywords that a preceding `NOT` can negate in infix position.
pub const NEGATABLE: [&str; 5] = ["IN", "LIKE", "ILIKE", "BETWEEN", "SIMILAR TO"];

/// Returns the infix binding power of a symbol, `LOWEST` if it is not an
/// infix operator.
///
/// `NOT` is reported as `LOWEST`; whether it acts as an infix operator
/// depends on the following token, which the parser checks itself.
#[must_use]
pub fn binding_power(symbol: &Symbol) -> u8 {
    match symbol.token_kind() {
        TokenKind::Keyword => keyword_binding_power(symbol.keyword_literal()),
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Arrow => COMPARE,
        TokenKind::Pipe | TokenKind::Ampersand | TokenKind::ShiftLeft | TokenKind::ShiftRight => {
            BITWISE
        }
        TokenKind::Concat => CONCAT,
        TokenKind::Plus | TokenKind::Minus => ADDITIVE,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => MULTIPLICATIVE,
        TokenKind::LeftParen => CALL,
        _ => LOWEST,
    }
}

fn keyword_binding_power(keyword: &str) -> u8 {
    match keyword {
        "AS" => ALIAS,
        "OR" => OR,
        "AND" => AND,
        "LIKE" | "ILIKE" | "SIMILAR TO" | "IN" | "BETWEEN" | "IS" | "ISNULL" | "NOTNULL" => {
            COMPARE
        }
        "COLLATE" => COLLATE,
        _ => LOWEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(kind: TokenKind) -> u8 {
        binding_power(&Symbol::kind(kind))
    }

    fn keyword(literal: &str) -> u8 {
        binding_power(&Symbol::keyword(literal))
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(kind(TokenKind::Star) > kind(TokenKind::Plus));
        assert!(kind(TokenKind::Plus) > kind(TokenKind::Concat));
        assert!(kind(TokenKind::Concat) > kind(TokenKind::Eq));
        assert!(kind(TokenKind::Eq) > keyword("AND"));
        assert!(keyword("AND") > keyword("OR"));
        assert!(keyword("OR") > keyword("AS"));
        assert!(keyword("AS") > LOWEST);
    }

    #[test]
    fn test_keyword_comparisons_share_level() {
        for op in ["LIKE", "ILIKE", "SIMILAR TO", "IN", "BETWEEN", "IS"] {
            assert_eq!(keyword(op), kind(TokenKind::Eq), "{op}");
        }
    }

    #[test]
    fn test_not_is_not_infix_by_itself() {
        assert_eq!(keyword("NOT"), LOWEST);
        assert!(NOT > AND && NOT < COMPARE);
    }

    #[test]
    fn test_non_operators() {
        assert_eq!(kind(TokenKind::Comma), LOWEST);
        assert_eq!(kind(TokenKind::Identifier), LOWEST);
        assert_eq!(keyword("FROM"), LOWEST);
        assert_eq!(kind(TokenKind::LeftParen), CALL);
    }
}
