//! esfront_diagnostics: Error codes, message templates and positioned errors.
//!
//! Every syntax error raised by the parser, and every illegal token produced
//! by the lexer, is described by an [`ErrorCode`] whose message template lives
//! in the [`messages`] table. Templates may contain `{0}`, `{1}`, ...
//! placeholders filled in by [`format_message`].

use esfront_core::text::{Loc, Source, TextRange};
use miette::{LabeledSpan, SourceSpan};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The numeric diagnostic code (e.g., 1002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// The enumerated kinds of syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnexpectedToken,
    UnexpectedEof,
    IllegalCharacter,
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedRegExp,
    UnterminatedComment,
    UnterminatedJsx,
    UnbalancedJsxTag,
    AdjacentJsxElementsNotWrapped,
    IllegalEscapeSequence,
    InvalidNumericLiteral,
    LegacyOctalInStrictMode,
    RestrictedProductionViolation,
    AmbiguousGenericsFallbackFailure,
    NullishMixedWithLogical,
    InvalidAssignmentTarget,
    InvalidJsxAttribute,
    FeatureDisabled,
    StrictModeViolation,
    IllegalStatementPosition,
}

impl ErrorCode {
    /// The message template for this code.
    pub fn message(self) -> &'static DiagnosticMessage {
        use messages::*;
        match self {
            ErrorCode::UnexpectedToken => &UNEXPECTED_TOKEN,
            ErrorCode::UnexpectedEof => &UNEXPECTED_END_OF_INPUT,
            ErrorCode::IllegalCharacter => &INVALID_CHARACTER,
            ErrorCode::UnterminatedString => &UNTERMINATED_STRING_LITERAL,
            ErrorCode::UnterminatedTemplate => &UNTERMINATED_TEMPLATE_LITERAL,
            ErrorCode::UnterminatedRegExp => &UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            ErrorCode::UnterminatedComment => &ASTERISK_SLASH_EXPECTED,
            ErrorCode::UnterminatedJsx => &JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG,
            ErrorCode::UnbalancedJsxTag => &EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0_FOUND_1,
            ErrorCode::AdjacentJsxElementsNotWrapped => &ADJACENT_JSX_ELEMENTS_MUST_BE_WRAPPED,
            ErrorCode::IllegalEscapeSequence => &INVALID_ESCAPE_SEQUENCE,
            ErrorCode::InvalidNumericLiteral => &INVALID_NUMERIC_LITERAL,
            ErrorCode::LegacyOctalInStrictMode => &OCTAL_LITERALS_NOT_ALLOWED_IN_STRICT_MODE,
            ErrorCode::RestrictedProductionViolation => &LINE_TERMINATOR_NOT_PERMITTED_AFTER_0,
            ErrorCode::AmbiguousGenericsFallbackFailure => &AMBIGUOUS_LESS_THAN,
            ErrorCode::NullishMixedWithLogical => &NULLISH_MIXED_WITH_LOGICAL,
            ErrorCode::InvalidAssignmentTarget => &INVALID_ASSIGNMENT_TARGET,
            ErrorCode::InvalidJsxAttribute => &JSX_ATTRIBUTE_0,
            ErrorCode::FeatureDisabled => &_0_REQUIRES_THE_1_FEATURE,
            ErrorCode::StrictModeViolation => &_0_NOT_ALLOWED_IN_STRICT_MODE,
            ErrorCode::IllegalStatementPosition => &_0_NOT_ALLOWED_HERE,
        }
    }

    /// The numeric code, stable across releases.
    pub fn number(self) -> u32 {
        self.message().code
    }

    /// A short label used under the caret when rendering.
    pub fn label(self) -> &'static str {
        match self {
            ErrorCode::UnbalancedJsxTag => "closing tag does not match",
            ErrorCode::AdjacentJsxElementsNotWrapped => "second root element starts here",
            ErrorCode::RestrictedProductionViolation => "line terminator here",
            ErrorCode::UnexpectedEof => "input ends here",
            _ => "here",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ES{}", self.number())
    }
}

/// An error found while scanning a token. Carried on illegal tokens and on
/// deferred template escapes; the lexer itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub code: ErrorCode,
    pub message: String,
    pub range: TextRange,
}

impl LexError {
    pub fn new(code: ErrorCode, range: TextRange, args: &[&str]) -> Self {
        Self {
            code,
            message: format_message(code.message().message, args),
            range,
        }
    }
}

/// The single terminal error of a parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// The kind of error.
    pub code: ErrorCode,
    /// Human readable message with arguments filled in.
    pub message: String,
    /// The offending source range.
    pub range: TextRange,
}

impl ParseError {
    pub fn new(code: ErrorCode, range: TextRange, args: &[&str]) -> Self {
        Self {
            code,
            message: format_message(code.message().message, args),
            range,
        }
    }

    /// Begin and end line/column of the offending range.
    pub fn loc(&self, source: &Source<'_>) -> Loc {
        source.loc(self.range)
    }

    /// Render as `line:column: message`.
    pub fn describe(&self, source: &Source<'_>) -> String {
        format!("{}: {} {}", self.loc(source).begin, self.code, self.message)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            range: err.range,
        }
    }
}

impl miette::Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self.code.message().category {
            DiagnosticCategory::Error => Some(miette::Severity::Error),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::from((self.range.lo as usize, self.range.len() as usize));
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.code.label().to_string()),
            span,
        ))))
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Lexical errors (1000-1099)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character '{0}'.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1125, Error, "Invalid escape sequence: {0}");
    pub const INVALID_NUMERIC_LITERAL: DiagnosticMessage = diag!(1124, Error, "Invalid numeric literal: {0}");

    // ========================================================================
    // Syntax errors (1100-1299)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token {0}.");
    pub const UNEXPECTED_END_OF_INPUT: DiagnosticMessage = diag!(1126, Error, "Unexpected end of input.");
    pub const OCTAL_LITERALS_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1121, Error, "Octal literals are not allowed in strict mode: {0}");
    pub const LINE_TERMINATOR_NOT_PERMITTED_AFTER_0: DiagnosticMessage = diag!(1200, Error, "Line terminator not permitted {0}.");
    pub const AMBIGUOUS_LESS_THAN: DiagnosticMessage = diag!(1201, Error, "'<' is neither the start of type arguments nor a comparison here.");
    pub const NULLISH_MIXED_WITH_LOGICAL: DiagnosticMessage = diag!(5076, Error, "'{0}' and '{1}' operations cannot be mixed without parentheses.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(2364, Error, "Invalid assignment target.");
    pub const _0_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1101, Error, "{0} is not allowed in strict mode.");
    pub const _0_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(1108, Error, "{0} is not allowed here.");
    pub const _0_REQUIRES_THE_1_FEATURE: DiagnosticMessage = diag!(17004, Error, "{0} requires the '{1}' feature to be enabled.");

    // ========================================================================
    // JSX errors (17000-17099)
    // ========================================================================
    pub const JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG: DiagnosticMessage = diag!(17008, Error, "JSX element '{0}' has no corresponding closing tag.");
    pub const EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0_FOUND_1: DiagnosticMessage = diag!(17002, Error, "Expected corresponding JSX closing tag for '{0}', found '{1}'.");
    pub const ADJACENT_JSX_ELEMENTS_MUST_BE_WRAPPED: DiagnosticMessage = diag!(2657, Error, "Adjacent JSX elements must be wrapped in an enclosing tag.");
    pub const JSX_ATTRIBUTE_0: DiagnosticMessage = diag!(17000, Error, "JSX attributes {0}.");
}
