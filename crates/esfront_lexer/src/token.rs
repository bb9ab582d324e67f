//! Tokens produced by the lexer.

use esfront_ast::token_kind::TokenKind;
use esfront_core::text::TextRange;
use esfront_diagnostics::LexError;
use std::borrow::Cow;

/// The decoded payload of a token. Which variant is present depends on the
/// token kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue<'s> {
    None,
    /// Identifiers and private names. `decoded` is set when the name was
    /// written with `\u` escapes.
    Ident { decoded: Option<String> },
    /// String literals and JSX strings.
    Str {
        value: Cow<'s, str>,
        /// An octal (`\07`) or `\8`/`\9` escape was used.
        legacy_octal: bool,
    },
    /// Numeric literals are decoded lazily from the raw text.
    Num {
        /// Written with a leading zero, such as `017` or `089`.
        legacy: bool,
    },
    RegExp { pattern: &'s str, flags: &'s str },
    Template(Box<TemplateValue<'s>>),
    /// JSX child text with entities decoded.
    JsxText { value: Cow<'s, str> },
    /// The diagnostic of an illegal token.
    Error(LexError),
}

/// The payload of a template literal span.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateValue<'s> {
    /// Escapes decoded. `None` when an invalid escape was seen.
    pub cooked: Option<String>,
    /// Source text with line terminators normalized to `\n`.
    pub raw: Cow<'s, str>,
    /// The span ends the template (closing back-quote rather than `${`).
    pub tail: bool,
    /// No escape sequences were written.
    pub plain: bool,
    /// The first invalid escape, reported only for untagged templates.
    pub illegal_escape: Option<LexError>,
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub range: TextRange,
    /// The exact source text of the token.
    pub raw: &'s str,
    pub value: TokenValue<'s>,
    /// A line terminator appeared between the previous token and this one.
    pub after_line_term: bool,
}

impl<'s> Token<'s> {
    pub fn new(kind: TokenKind, range: TextRange, raw: &'s str, value: TokenValue<'s>) -> Self {
        Self {
            kind,
            range,
            raw,
            value,
            after_line_term: false,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The name of an identifier-like token with escapes decoded. Private
    /// names are returned without the `#`.
    pub fn name(&self) -> &str {
        match &self.value {
            TokenValue::Ident { decoded: Some(name) } => name,
            _ if self.kind == TokenKind::PrivateName => self.raw.strip_prefix('#').unwrap_or(self.raw),
            _ => self.raw,
        }
    }

    /// Whether an identifier was written with escapes.
    pub fn is_escaped(&self) -> bool {
        matches!(self.value, TokenValue::Ident { decoded: Some(_) })
    }

    pub fn error(&self) -> Option<&LexError> {
        match &self.value {
            TokenValue::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn template(&self) -> Option<&TemplateValue<'s>> {
        match &self.value {
            TokenValue::Template(value) => Some(value),
            _ => None,
        }
    }

    /// Decoded value of a string or JSX string token.
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Legacy octal forms: `017`, `089`, `"\07"`, `"\8"`.
    pub fn is_legacy_octal(&self) -> bool {
        matches!(
            self.value,
            TokenValue::Num { legacy: true } | TokenValue::Str { legacy_octal: true, .. }
        )
    }
}
