//! Parser utility functions.

use esfront_ast::node::Expression;
use esfront_ast::token_kind::TokenKind;

/// Check if a token kind can start a property name in an object literal,
/// class body or type literal.
pub fn can_start_property_key(kind: TokenKind) -> bool {
    kind.is_identifier_name()
        || matches!(
            kind,
            TokenKind::String
                | TokenKind::Num
                | TokenKind::BigInt
                | TokenKind::LBracket
                | TokenKind::PrivateName
        )
}

/// Check if a class member modifier (`static`, `public`, `async`, ...) is
/// used as a modifier rather than as the member name, judging by the token
/// after it.
pub fn can_follow_modifier(kind: TokenKind) -> bool {
    can_start_property_key(kind) || matches!(kind, TokenKind::Star | TokenKind::LBrace)
}

/// Check if the token after a speculative `<...>` confirms that it was a
/// type argument list.
pub fn can_follow_type_arguments(kind: TokenKind) -> bool {
    match kind {
        TokenKind::LParen | TokenKind::TemplateStart => true,
        TokenKind::Lt | TokenKind::Gt | TokenKind::Plus | TokenKind::Minus => false,
        _ => !kind.starts_expr(),
    }
}

/// Check if a token kind can start a type.
pub fn can_start_type(kind: TokenKind) -> bool {
    kind.is_identifier_like()
        || matches!(
            kind,
            TokenKind::Void
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::Typeof
                | TokenKind::True
                | TokenKind::False
                | TokenKind::String
                | TokenKind::Num
                | TokenKind::BigInt
                | TokenKind::Minus
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Lt
                | TokenKind::BitOr
                | TokenKind::BitAnd
        )
}

/// Identifiers, member expressions and TypeScript casts of them.
pub fn is_simple_assign_target(expr: Expression<'_>) -> bool {
    match expr.unparenthesized() {
        Expression::Ident(_) | Expression::Member(_) => true,
        Expression::TsAs(cast) => is_simple_assign_target(cast.expr),
        Expression::TsSatisfies(cast) => is_simple_assign_target(cast.expr),
        Expression::TsNonNull(cast) => is_simple_assign_target(cast.expr),
        _ => false,
    }
}

/// The text between the quotes of a string literal.
pub fn strip_quotes(raw: &str) -> &str {
    if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}
