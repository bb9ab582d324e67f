//! The parser core.
//!
//! This is a recursive descent parser over the pull-based [`Lexer`]. The
//! grammar is split across sibling modules (`statement`, `expression`, `jsx`,
//! `typescript`), each adding methods to [`Parser`]; this module owns token
//! management, speculation, lexer mode scoping and node allocation.
//!
//! A parse either yields a complete tree or stops at the first error.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use esfront_ast::node::*;
use esfront_ast::node_type::NodeType;
use esfront_ast::token_kind::TokenKind;
use esfront_ast::types::SourceType;
use esfront_core::text::TextRange;
use esfront_diagnostics::{ErrorCode, ParseError};
use esfront_lexer::numeric::parse_number;
use esfront_lexer::{LexMode, Lexer, LexerCheckpoint, Token, TokenValue};
use rustc_hash::FxHashSet;
use std::borrow::Cow;
use tracing::{debug, trace};

use crate::options::{Features, ParserOptions};

pub type PResult<T> = Result<T, ParseError>;

bitflags::bitflags! {
    /// Grammar parameters of the code being parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct Context: u8 {
        const STRICT       = 1 << 0;
        const IN_FUNCTION  = 1 << 1;
        /// `yield` is an operator.
        const YIELD        = 1 << 2;
        /// `await` is an operator.
        const AWAIT        = 1 << 3;
        /// `in` is not a binary operator (`for` initializers).
        const NO_IN        = 1 << 4;
        const IN_ITERATION = 1 << 5;
        const IN_SWITCH    = 1 << 6;
    }
}

/// Parser state restored when a speculative parse fails.
struct Snapshot<'a> {
    lexer: LexerCheckpoint<'a>,
    ctx: Context,
    prev_end: u32,
    cover_init: Option<TextRange>,
    rejected_lt: Option<TextRange>,
}

/// Parses one source text into an arena-allocated [`Program`].
pub struct Parser<'a> {
    pub(crate) arena: &'a Bump,
    pub(crate) source: &'a str,
    pub(crate) lexer: Lexer<'a>,
    pub(crate) features: Features,
    pub(crate) ctx: Context,
    /// End of the last consumed token.
    pub(crate) prev_end: u32,
    /// First `{ a = 1 }` shorthand initializer not yet claimed by a
    /// destructuring pattern.
    pub(crate) cover_init: Option<TextRange>,
    /// A `<` after an expression that failed as a type argument list.
    pub(crate) rejected_lt: Option<TextRange>,
    /// Labels of the enclosing labeled statements in the current function.
    pub(crate) labels: Vec<Label<'a>>,
    /// Offsets where an arrow function head was tried and rejected. Kept
    /// across rollbacks so nested groups are not retried on every reparse.
    pub(crate) failed_arrows: FxHashSet<u32>,
}

/// An enclosing statement label.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Label<'a> {
    pub name: &'a str,
    /// The label is on a loop, so `continue` may target it.
    pub iteration: bool,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source: &'a str, options: ParserOptions) -> Self {
        let features = options.features();
        let mut ctx = Context::empty();
        if features.contains(Features::STRICT) {
            ctx |= Context::STRICT;
        }
        if features.contains(Features::MODULE) {
            ctx |= Context::AWAIT;
        }
        Self {
            arena,
            source,
            lexer: Lexer::new(source),
            features,
            ctx,
            prev_end: 0,
            cover_init: None,
            rejected_lt: None,
            labels: Vec::new(),
            failed_arrows: FxHashSet::default(),
        }
    }

    /// Parse the whole input. Stops at the first syntax error.
    pub fn parse_program(mut self) -> PResult<&'a Program<'a>> {
        debug!(len = self.source.len(), features = ?self.features, "parse start");
        let result = self.parse_program_body();
        match &result {
            Ok(program) => debug!(statements = program.body.len(), strict = program.strict, "parse end"),
            Err(err) => debug!(code = ?err.code, range = ?err.range, "parse failed"),
        }
        result
    }

    fn parse_program_body(&mut self) -> PResult<&'a Program<'a>> {
        let mut body = self.new_vec();
        self.parse_directives(&mut body)?;
        while !self.at(TokenKind::Eof) {
            let stmt = self.parse_module_item()?;
            body.push(stmt);
        }
        let source_type = if self.is_module() { SourceType::Module } else { SourceType::Script };
        Ok(self.alloc(Program {
            data: NodeData::new(NodeType::Program, TextRange::new(0, self.source.len() as u32)),
            body: body.into_bump_slice(),
            source_type,
            strict: self.is_strict(),
        }))
    }

    // ========================================================================
    // Features and context
    // ========================================================================

    #[inline]
    pub(crate) fn is_ts(&self) -> bool {
        self.features.contains(Features::TYPESCRIPT)
    }

    #[inline]
    pub(crate) fn is_jsx(&self) -> bool {
        self.features.contains(Features::JSX)
    }

    #[inline]
    pub(crate) fn is_module(&self) -> bool {
        self.features.contains(Features::MODULE)
    }

    #[inline]
    pub(crate) fn is_strict(&self) -> bool {
        self.ctx.contains(Context::STRICT)
    }

    #[inline]
    pub(crate) fn has_ctx(&self, flags: Context) -> bool {
        self.ctx.intersects(flags)
    }

    /// Run `f` with `add` set and `remove` cleared, restoring the context on
    /// every exit path.
    pub(crate) fn with_context<T>(
        &mut self,
        add: Context,
        remove: Context,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = self.ctx;
        self.ctx = (self.ctx - remove) | add;
        let result = f(self);
        self.ctx = saved;
        result
    }

    /// Run `f` with `mode` pushed on the lexer's mode stack. The mode is popped
    /// whether `f` succeeds or not.
    pub(crate) fn with_mode<T>(&mut self, mode: LexMode, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.lexer.push_mode(mode);
        let result = f(self);
        self.lexer.pop_mode();
        result
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn peek(&mut self) -> &Token<'a> {
        self.lexer.peek()
    }

    #[inline]
    pub(crate) fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek().kind
    }

    #[inline]
    pub(crate) fn at(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().kind == kind
    }

    #[inline]
    pub(crate) fn peek_range(&mut self) -> TextRange {
        self.lexer.peek().range
    }

    #[inline]
    pub(crate) fn peek_start(&mut self) -> u32 {
        self.lexer.peek().range.lo
    }

    /// A line terminator precedes the upcoming token.
    #[inline]
    pub(crate) fn has_line_break_before(&mut self) -> bool {
        self.lexer.peek().after_line_term
    }

    /// Consume the upcoming token. Callers check its kind first, so an
    /// illegal token is never consumed.
    pub(crate) fn bump(&mut self) -> Token<'a> {
        let token = self.lexer.next();
        self.prev_end = token.range.hi;
        token
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<Token<'a>> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected())
        }
    }

    /// The error for the upcoming token. Illegal tokens report their own
    /// lexical error.
    pub(crate) fn unexpected(&mut self) -> ParseError {
        let token = self.lexer.peek();
        match token.kind {
            TokenKind::Illegal => match token.error() {
                Some(err) => err.clone().into(),
                None => ParseError::new(ErrorCode::IllegalCharacter, token.range, &[token.raw]),
            },
            TokenKind::Eof => ParseError::new(ErrorCode::UnexpectedEof, token.range, &[]),
            _ => ParseError::new(ErrorCode::UnexpectedToken, token.range, &[token.raw]),
        }
    }

    /// Consume a statement terminator, inserting one where the rules allow.
    pub(crate) fn semicolon(&mut self) -> PResult<()> {
        if self.eat(TokenKind::Semi) || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    pub(crate) fn can_insert_semicolon(&mut self) -> bool {
        let token = self.lexer.peek();
        matches!(token.kind, TokenKind::RBrace | TokenKind::Eof | TokenKind::Semi) || token.after_line_term
    }

    /// The upcoming token in operator position: a `>` is merged with the
    /// characters after it.
    pub(crate) fn peek_operator(&mut self) -> TokenKind {
        if self.at(TokenKind::Gt) {
            self.lexer.rescan_gt();
        }
        self.peek_kind()
    }

    /// The upcoming token in operand position: a `/` starts a regular
    /// expression.
    pub(crate) fn peek_operand(&mut self) -> TokenKind {
        if matches!(self.peek_kind(), TokenKind::Slash | TokenKind::SlashEq) {
            self.lexer.rescan_as_regexp();
        }
        self.peek_kind()
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    fn snapshot(&self) -> Snapshot<'a> {
        Snapshot {
            lexer: self.lexer.checkpoint(),
            ctx: self.ctx,
            prev_end: self.prev_end,
            cover_init: self.cover_init,
            rejected_lt: self.rejected_lt,
        }
    }

    fn restore(&mut self, snapshot: Snapshot<'a>) {
        self.lexer.restore(snapshot.lexer);
        self.ctx = snapshot.ctx;
        self.prev_end = snapshot.prev_end;
        self.cover_init = snapshot.cover_init;
        self.rejected_lt = snapshot.rejected_lt;
    }

    /// Run `f`, and undo everything it consumed when it fails.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let start = self.peek_start();
        match f(self) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(start, code = ?err.code, at = ?err.range, "speculative parse rolled back");
                self.restore(snapshot);
                None
            }
        }
    }

    /// Run `f` and always undo what it consumed.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Kind of the token after the upcoming one, and whether a line break
    /// precedes it.
    pub(crate) fn peek2(&mut self) -> (TokenKind, bool) {
        self.look_ahead(|p| {
            p.bump();
            let token = p.peek();
            (token.kind, token.after_line_term)
        })
    }

    pub(crate) fn peek2_kind(&mut self) -> TokenKind {
        self.peek2().0
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub(crate) fn new_vec<T>(&self) -> BumpVec<'a, T> {
        BumpVec::new_in(self.arena)
    }

    pub(crate) fn alloc_str(&self, text: &str) -> &'a str {
        self.arena.alloc_str(text)
    }

    /// Source-borrowed text is kept as is; decoded text is copied into the
    /// arena.
    pub(crate) fn cow_str(&self, text: &Cow<'a, str>) -> &'a str {
        match text {
            Cow::Borrowed(text) => *text,
            Cow::Owned(text) => self.arena.alloc_str(text),
        }
    }

    pub(crate) fn typ(&self, info: TypInfo<'a>) -> Option<&'a TypInfo<'a>> {
        if info.is_empty() {
            None
        } else {
            Some(self.arena.alloc(info))
        }
    }

    /// Range from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn finish(&self, start: u32) -> TextRange {
        TextRange::new(start, self.prev_end.max(start))
    }

    #[inline]
    pub(crate) fn node(&self, ty: NodeType, start: u32) -> NodeData {
        NodeData::new(ty, self.finish(start))
    }

    // ========================================================================
    // Names and literals
    // ========================================================================

    pub(crate) fn ident_from_token(&self, token: &Token<'a>) -> &'a Identifier<'a> {
        let name = match &token.value {
            TokenValue::Ident { decoded: Some(name) } => self.alloc_str(name),
            _ => token.raw,
        };
        self.alloc(Identifier {
            data: NodeData::new(NodeType::Identifier, token.range),
            name,
            typ: None,
        })
    }

    /// Any identifier name, reserved words included (`a.if`, `{ class: 1 }`).
    pub(crate) fn parse_identifier_name(&mut self) -> PResult<&'a Identifier<'a>> {
        if !self.peek_kind().is_identifier_name() {
            return Err(self.unexpected());
        }
        let token = self.bump();
        Ok(self.ident_from_token(&token))
    }

    /// Whether the upcoming token can be used as an identifier reference or
    /// binding in the current context.
    pub(crate) fn at_identifier(&mut self) -> bool {
        match self.peek_kind() {
            TokenKind::Yield => !self.has_ctx(Context::YIELD),
            TokenKind::Await => !self.has_ctx(Context::AWAIT),
            kind => kind.is_identifier_like(),
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> PResult<&'a Identifier<'a>> {
        if !self.at_identifier() {
            return Err(self.unexpected());
        }
        let token = self.bump();
        Ok(self.ident_from_token(&token))
    }

    pub(crate) fn private_name(&self, token: &Token<'a>) -> &'a PrivateName<'a> {
        let name = match &token.value {
            TokenValue::Ident { decoded: Some(name) } => self.alloc_str(name),
            _ => token.raw.strip_prefix('#').unwrap_or(token.raw),
        };
        self.alloc(PrivateName {
            data: NodeData::new(NodeType::PrivateName, token.range),
            name,
        })
    }

    fn check_legacy_octal(&self, token: &Token<'a>) -> PResult<()> {
        if token.is_legacy_octal() && self.is_strict() {
            return Err(ParseError::new(ErrorCode::LegacyOctalInStrictMode, token.range, &[token.raw]));
        }
        Ok(())
    }

    pub(crate) fn parse_string_lit(&mut self) -> PResult<&'a StringLit<'a>> {
        if !self.at(TokenKind::String) {
            return Err(self.unexpected());
        }
        let token = self.bump();
        self.check_legacy_octal(&token)?;
        Ok(self.string_lit(&token))
    }

    /// A string literal node for a string or JSX string token.
    pub(crate) fn string_lit(&self, token: &Token<'a>) -> &'a StringLit<'a> {
        let value = match &token.value {
            TokenValue::Str { value, .. } => self.cow_str(value),
            _ => "",
        };
        self.alloc(StringLit {
            data: NodeData::new(NodeType::StringLit, token.range),
            value,
            raw: token.raw,
        })
    }

    pub(crate) fn parse_num_lit(&mut self) -> PResult<&'a NumLit<'a>> {
        if !self.at(TokenKind::Num) {
            return Err(self.unexpected());
        }
        let token = self.bump();
        self.check_legacy_octal(&token)?;
        Ok(self.alloc(NumLit {
            data: NodeData::new(NodeType::NumLit, token.range),
            value: parse_number(token.raw),
            raw: token.raw,
        }))
    }

    pub(crate) fn parse_bigint_lit(&mut self) -> PResult<&'a BigIntLit<'a>> {
        let token = self.expect(TokenKind::BigInt)?;
        Ok(self.alloc(BigIntLit {
            data: NodeData::new(NodeType::BigIntLit, token.range),
            raw: token.raw,
        }))
    }

    /// An error for `construct`, which requires `feature`.
    pub(crate) fn feature_disabled(&mut self, construct: &str, feature: &str) -> ParseError {
        ParseError::new(ErrorCode::FeatureDisabled, self.peek_range(), &[construct, feature])
    }
}

/// Parse `source` into a [`Program`] allocated in `arena`.
///
/// ```
/// use bumpalo::Bump;
/// use esfront_parser::{parse, ParserOptions};
///
/// let arena = Bump::new();
/// let program = parse(&arena, "let answer = 42;", ParserOptions::default()).unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse<'a>(arena: &'a Bump, source: &'a str, options: ParserOptions) -> PResult<&'a Program<'a>> {
    Parser::new(arena, source, options).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser<'a>(arena: &'a Bump, source: &'a str) -> Parser<'a> {
        Parser::new(arena, source, ParserOptions::default())
    }

    #[test]
    fn test_try_parse_restores_position() {
        let arena = Bump::new();
        let mut p = parser(&arena, "a b");
        let result: Option<()> = p.try_parse(|p| {
            p.bump();
            p.bump();
            Err(p.unexpected())
        });
        assert!(result.is_none());
        assert_eq!(p.peek_kind(), TokenKind::Identifier);
        assert_eq!(p.peek_start(), 0);
        assert_eq!(p.prev_end, 0);
    }

    #[test]
    fn test_with_mode_pops_on_error() {
        let arena = Bump::new();
        let mut p = parser(&arena, "`x`");
        p.bump();
        let depth = p.lexer.mode_depth();
        let result: PResult<()> = p.with_mode(LexMode::Template, |p| Err(p.unexpected()));
        assert!(result.is_err());
        assert_eq!(p.lexer.mode_depth(), depth);
    }

    #[test]
    fn test_with_context_restores() {
        let arena = Bump::new();
        let mut p = parser(&arena, "");
        let _ = p.with_context(Context::IN_FUNCTION | Context::STRICT, Context::empty(), |p| {
            assert!(p.is_strict());
            Ok(())
        });
        assert!(!p.is_strict());
        assert!(!p.has_ctx(Context::IN_FUNCTION));
    }

    #[test]
    fn test_peek2_does_not_consume() {
        let arena = Bump::new();
        let mut p = parser(&arena, "x\n=> 1");
        assert_eq!(p.peek2(), (TokenKind::Arrow, true));
        assert_eq!(p.peek_kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_peek_operator_merges_gt() {
        let arena = Bump::new();
        let mut p = parser(&arena, ">>= 1");
        assert_eq!(p.peek_kind(), TokenKind::Gt);
        assert_eq!(p.peek_operator(), TokenKind::ShrEq);
    }
}
