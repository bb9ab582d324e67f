//! Operator precedence for binary operators.

use esfront_ast::token_kind::TokenKind;

/// Operator precedence levels, lowest to highest. The binary levels equal
/// the precedence column of the token kind table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    NullishCoalescing = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    BitwiseOr = 8,
    BitwiseXor = 9,
    BitwiseAnd = 10,
    Equality = 11,
    Relational = 12,
    Shift = 13,
    Additive = 14,
    Multiplicative = 15,
    Exponentiation = 16,
    Invalid = 255,
}

impl OperatorPrecedence {
    fn from_level(level: u8) -> Self {
        match level {
            5 => OperatorPrecedence::NullishCoalescing,
            6 => OperatorPrecedence::LogicalOr,
            7 => OperatorPrecedence::LogicalAnd,
            8 => OperatorPrecedence::BitwiseOr,
            9 => OperatorPrecedence::BitwiseXor,
            10 => OperatorPrecedence::BitwiseAnd,
            11 => OperatorPrecedence::Equality,
            12 => OperatorPrecedence::Relational,
            13 => OperatorPrecedence::Shift,
            14 => OperatorPrecedence::Additive,
            15 => OperatorPrecedence::Multiplicative,
            16 => OperatorPrecedence::Exponentiation,
            _ => OperatorPrecedence::Invalid,
        }
    }

    /// The threshold for the right operand of an operator at this level.
    pub fn next(self, right_assoc: bool) -> OperatorPrecedence {
        if right_assoc {
            self
        } else {
            OperatorPrecedence::from_level(self as u8 + 1)
        }
    }
}

/// Get the binary operator precedence for a given token kind. `as` and
/// `satisfies` only count when TypeScript is enabled, and `in` is suppressed
/// inside `for` initializers.
pub fn get_binary_operator_precedence(kind: TokenKind, typescript: bool, no_in: bool) -> OperatorPrecedence {
    match kind {
        TokenKind::As | TokenKind::Satisfies if !typescript => OperatorPrecedence::Invalid,
        TokenKind::In if no_in => OperatorPrecedence::Invalid,
        _ => OperatorPrecedence::from_level(kind.precedence()),
    }
}
