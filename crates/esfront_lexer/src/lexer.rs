//! The mode-stacked lexer.
//!
//! The lexer is pull based: the parser asks for one token at a time with
//! [`Lexer::next`] and may look at the upcoming token with [`Lexer::peek`].
//! How characters are grouped depends on the mode on top of the mode stack.
//! Changing the mode while a token is buffered rewinds the buffer so the
//! token is scanned again under the new mode.
//!
//! Malformed input never stops the lexer; it produces an `Illegal` token
//! carrying a [`LexError`] and the parser decides what to do with it.

use crate::char_codes::*;
use crate::jsx_entities::decode_entities;
use crate::token::{TemplateValue, Token, TokenValue};
use esfront_ast::token_kind::{keyword_kind, TokenKind};
use esfront_core::text::TextRange;
use esfront_diagnostics::{ErrorCode, LexError};
use std::borrow::Cow;
use tracing::trace;

/// How the lexer groups characters into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexMode {
    /// JavaScript and TypeScript tokens.
    Normal,
    /// Inside a JSX tag: names, strings, `=`, `/`, `>`, `{`.
    JsxTag,
    /// Right after `=` in a JSX attribute.
    JsxAttrValue,
    /// Between JSX tags: raw text, `{` and `<`.
    JsxChild,
    /// Inside a template literal, after the back-quote or a closing `}`.
    Template,
}

/// A buffered token together with where scanning for it started.
#[derive(Debug, Clone)]
struct Pending<'s> {
    token: Token<'s>,
    /// Position before any trivia skipped for this token.
    scan_start: usize,
    mode: LexMode,
    preceding_ws: TextRange,
}

/// Saved lexer state for speculative parsing.
#[derive(Debug, Clone)]
pub struct LexerCheckpoint<'s> {
    pos: usize,
    modes: Vec<LexMode>,
    pending: Option<Pending<'s>>,
    prev_before_expr: bool,
    preceding_ws: TextRange,
}

/// Shape of a validated numeric literal.
struct NumberShape {
    legacy: bool,
    bigint: bool,
}

pub struct Lexer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    modes: Vec<LexMode>,
    pending: Option<Pending<'s>>,
    /// `before_expr` of the last consumed token: a `/` now starts a regexp.
    prev_before_expr: bool,
    /// Whitespace and comments skipped before the last scanned token.
    preceding_ws: TextRange,
}

impl<'s> Lexer<'s> {
    /// Create a lexer positioned after an optional `#!` line.
    pub fn new(source: &'s str) -> Self {
        let mut lexer = Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            modes: vec![LexMode::Normal],
            pending: None,
            prev_before_expr: true,
            preceding_ws: TextRange::empty(0),
        };
        lexer.skip_shebang();
        lexer
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    fn skip_shebang(&mut self) {
        if self.bytes.starts_with(b"#!") {
            self.pos = self.find_line_end(2);
        }
    }

    // ========================================================================
    // Token stream
    // ========================================================================

    /// The upcoming token. Repeated calls return the same token.
    pub fn peek(&mut self) -> &Token<'s> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => self.scan(),
        };
        &self.pending.insert(pending).token
    }

    /// Consume and return the upcoming token.
    pub fn next(&mut self) -> Token<'s> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => self.scan(),
        };
        self.prev_before_expr = match pending.mode {
            LexMode::Normal => pending.token.kind.before_expr(),
            LexMode::Template => pending.token.template().is_some_and(|t| !t.tail),
            _ => pending.token.kind != TokenKind::Gt && pending.token.kind.before_expr(),
        };
        pending.token
    }

    /// Whitespace and comments skipped before the most recently scanned
    /// token. Empty in modes that keep whitespace as text.
    pub fn preceding_whitespace(&self) -> TextRange {
        match &self.pending {
            Some(pending) => pending.preceding_ws,
            None => self.preceding_ws,
        }
    }

    // ========================================================================
    // Mode stack
    // ========================================================================

    /// The current lexer mode.
    pub fn mode(&self) -> LexMode {
        self.modes.last().copied().unwrap_or(LexMode::Normal)
    }

    /// Number of modes on the stack, the base `Normal` mode included.
    pub fn mode_depth(&self) -> usize {
        self.modes.len()
    }

    pub fn push_mode(&mut self, mode: LexMode) {
        self.rewind_pending();
        trace!(?mode, depth = self.modes.len(), "push lexer mode");
        self.modes.push(mode);
    }

    /// Pop the current mode. The base mode is never popped.
    pub fn pop_mode(&mut self) -> LexMode {
        debug_assert!(self.modes.len() > 1, "unbalanced lexer mode pop");
        if self.modes.len() <= 1 {
            return LexMode::Normal;
        }
        self.rewind_pending();
        let mode = self.modes.pop().unwrap_or(LexMode::Normal);
        trace!(?mode, depth = self.modes.len(), "pop lexer mode");
        mode
    }

    fn rewind_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.pos = pending.scan_start;
        }
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    pub fn checkpoint(&self) -> LexerCheckpoint<'s> {
        LexerCheckpoint {
            pos: self.pos,
            modes: self.modes.clone(),
            pending: self.pending.clone(),
            prev_before_expr: self.prev_before_expr,
            preceding_ws: self.preceding_ws,
        }
    }

    pub fn restore(&mut self, checkpoint: LexerCheckpoint<'s>) {
        self.pos = checkpoint.pos;
        self.modes = checkpoint.modes;
        self.pending = checkpoint.pending;
        self.prev_before_expr = checkpoint.prev_before_expr;
        self.preceding_ws = checkpoint.preceding_ws;
    }

    // ========================================================================
    // Rescanning
    // ========================================================================

    /// Rescan a buffered `/` or `/=` as the start of a regular expression.
    pub fn rescan_as_regexp(&mut self) -> &Token<'s> {
        self.peek();
        if let Some(mut pending) = self.pending.take() {
            let kind = pending.token.kind;
            if pending.mode == LexMode::Normal && matches!(kind, TokenKind::Slash | TokenKind::SlashEq) {
                let start = pending.token.range.lo as usize;
                self.pos = start;
                let mut token = self.scan_regexp(start);
                token.after_line_term = pending.token.after_line_term;
                trace!(range = ?token.range, "rescan as regexp");
                pending.token = token;
            }
            self.pending = Some(pending);
        }
        self.peek()
    }

    /// Merge a buffered `>` with the characters that follow it into `>>`,
    /// `>>>`, `>=`, `>>=` or `>>>=`.
    pub fn rescan_gt(&mut self) -> &Token<'s> {
        self.peek();
        if let Some(mut pending) = self.pending.take() {
            if pending.mode == LexMode::Normal && pending.token.kind == TokenKind::Gt {
                let start = pending.token.range.lo as usize;
                let (kind, len) = match &self.bytes[start + 1..] {
                    [b'>', b'>', b'=', ..] => (TokenKind::UShrEq, 4),
                    [b'>', b'>', ..] => (TokenKind::UShr, 3),
                    [b'>', b'=', ..] => (TokenKind::ShrEq, 3),
                    [b'>', ..] => (TokenKind::Shr, 2),
                    [b'=', ..] => (TokenKind::GtEq, 2),
                    _ => (TokenKind::Gt, 1),
                };
                if len > 1 {
                    self.pos = start + len;
                    let mut token = self.make(kind, start, TokenValue::None);
                    token.after_line_term = pending.token.after_line_term;
                    pending.token = token;
                }
            }
            self.pending = Some(pending);
        }
        self.peek()
    }

    // ========================================================================
    // Scanning helpers
    // ========================================================================

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek_byte() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn range_from(&self, start: usize) -> TextRange {
        TextRange::new(start as u32, self.pos as u32)
    }

    fn make(&self, kind: TokenKind, start: usize, value: TokenValue<'s>) -> Token<'s> {
        Token::new(kind, self.range_from(start), &self.source[start..self.pos], value)
    }

    fn punct(&mut self, kind: TokenKind, start: usize, len: usize) -> Token<'s> {
        self.pos = start + len;
        self.make(kind, start, TokenValue::None)
    }

    fn illegal(&self, start: usize, code: ErrorCode, args: &[&str]) -> Token<'s> {
        let err = LexError::new(code, self.range_from(start), args);
        self.make(TokenKind::Illegal, start, TokenValue::Error(err))
    }

    fn illegal_char(&mut self, start: usize) -> Token<'s> {
        let ch = self.peek_char().unwrap_or('\u{FFFD}');
        self.pos += ch.len_utf8();
        let text = ch.to_string();
        self.illegal(start, ErrorCode::IllegalCharacter, &[&text])
    }

    /// Position of the next line terminator at or after `from`, or the end.
    fn find_line_end(&self, from: usize) -> usize {
        let mut at = from;
        while let Some(offset) = memchr::memchr3(b'\n', b'\r', 0xE2, &self.bytes[at..]) {
            let found = at + offset;
            if self.bytes[found] != 0xE2 || matches!(&self.bytes[found..], [0xE2, 0x80, 0xA8 | 0xA9, ..]) {
                return found;
            }
            at = found + 1;
        }
        self.bytes.len()
    }

    /// Skip whitespace and comments, reporting whether a line terminator was
    /// crossed.
    fn skip_trivia(&mut self) -> Result<bool, LexError> {
        let start = self.pos;
        let mut newline = false;
        while let Some(b) = self.peek_byte() {
            match b {
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'\n' | b'\r' => {
                    newline = true;
                    self.pos += 1;
                }
                b'/' => match self.byte_at(1) {
                    Some(b'/') => self.pos = self.find_line_end(self.pos + 2),
                    Some(b'*') => {
                        let body = self.pos + 2;
                        match memchr::memmem::find(&self.bytes[body..], b"*/") {
                            Some(len) => {
                                newline |= contains_line_break(&self.source[body..body + len]);
                                self.pos = body + len + 2;
                            }
                            None => {
                                let comment_start = self.pos;
                                self.pos = self.bytes.len();
                                return Err(LexError::new(
                                    ErrorCode::UnterminatedComment,
                                    self.range_from(comment_start),
                                    &[],
                                ));
                            }
                        }
                    }
                    _ => break,
                },
                _ if b >= 0x80 => match self.peek_char() {
                    Some(ch) if is_line_break(ch) => {
                        newline = true;
                        self.pos += ch.len_utf8();
                    }
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => break,
                },
                _ => break,
            }
        }
        self.preceding_ws = self.range_from(start);
        Ok(newline)
    }

    fn scan(&mut self) -> Pending<'s> {
        let scan_start = self.pos;
        let mode = self.mode();
        self.preceding_ws = TextRange::empty(scan_start as u32);
        let token = match mode {
            LexMode::Normal => self.scan_normal(),
            LexMode::JsxTag => self.scan_jsx_tag(),
            LexMode::JsxAttrValue => self.scan_jsx_attr_value(),
            LexMode::JsxChild => self.scan_jsx_child(),
            LexMode::Template => self.scan_template_span(),
        };
        Pending {
            token,
            scan_start,
            mode,
            preceding_ws: self.preceding_ws,
        }
    }

    /// Skip trivia in whitespace-insensitive modes. An unterminated comment
    /// becomes the token.
    fn skip_trivia_or_illegal(&mut self) -> Result<bool, Token<'s>> {
        self.skip_trivia().map_err(|err| {
            let start = err.range.lo as usize;
            self.make(TokenKind::Illegal, start, TokenValue::Error(err))
        })
    }

    // ========================================================================
    // Normal mode
    // ========================================================================

    fn scan_normal(&mut self) -> Token<'s> {
        let after_line_term = match self.skip_trivia_or_illegal() {
            Ok(newline) => newline,
            Err(token) => return token,
        };
        let mut token = self.scan_normal_token();
        token.after_line_term = after_line_term;
        token
    }

    fn scan_normal_token(&mut self) -> Token<'s> {
        let start = self.pos;
        let Some(b) = self.peek_byte() else {
            return self.make(TokenKind::Eof, start, TokenValue::None);
        };
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'$' | b'_' | b'\\' => self.scan_identifier(start),
            b'0'..=b'9' => self.scan_number(start),
            b'"' | b'\'' => self.scan_string(start, b),
            b'`' => self.punct(TokenKind::TemplateStart, start, 1),
            b'#' => self.scan_private_name(start),
            b'.' => self.scan_dot(start),
            b'?' => self.scan_question(start),
            b'/' => self.scan_slash(start),
            b'<' => self.scan_less_than(start),
            b'>' => self.punct(TokenKind::Gt, start, 1),
            b'=' => self.scan_equals(start),
            b'!' => self.scan_exclamation(start),
            b'+' => self.scan_plus_minus(start, b'+'),
            b'-' => self.scan_plus_minus(start, b'-'),
            b'*' => self.scan_asterisk(start),
            b'%' => self.scan_with_eq(start, TokenKind::Percent, TokenKind::PercentEq),
            b'^' => self.scan_with_eq(start, TokenKind::BitXor, TokenKind::BitXorEq),
            b'&' => self.scan_doubled(
                start,
                b'&',
                [TokenKind::BitAnd, TokenKind::BitAndEq, TokenKind::AndAnd, TokenKind::AndAndEq],
            ),
            b'|' => self.scan_doubled(
                start,
                b'|',
                [TokenKind::BitOr, TokenKind::BitOrEq, TokenKind::OrOr, TokenKind::OrOrEq],
            ),
            b'~' => self.punct(TokenKind::Tilde, start, 1),
            b'{' => self.punct(TokenKind::LBrace, start, 1),
            b'}' => self.punct(TokenKind::RBrace, start, 1),
            b'(' => self.punct(TokenKind::LParen, start, 1),
            b')' => self.punct(TokenKind::RParen, start, 1),
            b'[' => self.punct(TokenKind::LBracket, start, 1),
            b']' => self.punct(TokenKind::RBracket, start, 1),
            b';' => self.punct(TokenKind::Semi, start, 1),
            b',' => self.punct(TokenKind::Comma, start, 1),
            b':' => self.punct(TokenKind::Colon, start, 1),
            _ if b >= 0x80 => match self.peek_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(start),
                _ => self.illegal_char(start),
            },
            _ => self.illegal_char(start),
        }
    }

    fn scan_dot(&mut self, start: usize) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'0'..=b'9'), _) => self.scan_number(start),
            (Some(b'.'), Some(b'.')) => self.punct(TokenKind::Ellipsis, start, 3),
            _ => self.punct(TokenKind::Dot, start, 1),
        }
    }

    fn scan_question(&mut self, start: usize) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'?'), Some(b'=')) => self.punct(TokenKind::NullishEq, start, 3),
            (Some(b'?'), _) => self.punct(TokenKind::Nullish, start, 2),
            // `a?.5:b` is a conditional, not optional chaining.
            (Some(b'.'), Some(b'0'..=b'9')) => self.punct(TokenKind::Question, start, 1),
            (Some(b'.'), _) => self.punct(TokenKind::QuestionDot, start, 2),
            _ => self.punct(TokenKind::Question, start, 1),
        }
    }

    fn scan_slash(&mut self, start: usize) -> Token<'s> {
        if self.prev_before_expr {
            return self.scan_regexp(start);
        }
        self.scan_with_eq(start, TokenKind::Slash, TokenKind::SlashEq)
    }

    fn scan_less_than(&mut self, start: usize) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'<'), Some(b'=')) => self.punct(TokenKind::ShlEq, start, 3),
            (Some(b'<'), _) => self.punct(TokenKind::Shl, start, 2),
            (Some(b'='), _) => self.punct(TokenKind::LtEq, start, 2),
            _ => self.punct(TokenKind::Lt, start, 1),
        }
    }

    fn scan_equals(&mut self, start: usize) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'='), Some(b'=')) => self.punct(TokenKind::EqEqEq, start, 3),
            (Some(b'='), _) => self.punct(TokenKind::EqEq, start, 2),
            (Some(b'>'), _) => self.punct(TokenKind::Arrow, start, 2),
            _ => self.punct(TokenKind::Eq, start, 1),
        }
    }

    fn scan_exclamation(&mut self, start: usize) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'='), Some(b'=')) => self.punct(TokenKind::NotEqEq, start, 3),
            (Some(b'='), _) => self.punct(TokenKind::NotEq, start, 2),
            _ => self.punct(TokenKind::Bang, start, 1),
        }
    }

    fn scan_plus_minus(&mut self, start: usize, ch: u8) -> Token<'s> {
        let plus = ch == b'+';
        match self.byte_at(1) {
            Some(next) if next == ch => {
                let kind = if plus { TokenKind::PlusPlus } else { TokenKind::MinusMinus };
                self.punct(kind, start, 2)
            }
            Some(b'=') => {
                let kind = if plus { TokenKind::PlusEq } else { TokenKind::MinusEq };
                self.punct(kind, start, 2)
            }
            _ => {
                let kind = if plus { TokenKind::Plus } else { TokenKind::Minus };
                self.punct(kind, start, 1)
            }
        }
    }

    fn scan_asterisk(&mut self, start: usize) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'*'), Some(b'=')) => self.punct(TokenKind::StarStarEq, start, 3),
            (Some(b'*'), _) => self.punct(TokenKind::StarStar, start, 2),
            (Some(b'='), _) => self.punct(TokenKind::StarEq, start, 2),
            _ => self.punct(TokenKind::Star, start, 1),
        }
    }

    fn scan_with_eq(&mut self, start: usize, single: TokenKind, with_eq: TokenKind) -> Token<'s> {
        if self.byte_at(1) == Some(b'=') {
            self.punct(with_eq, start, 2)
        } else {
            self.punct(single, start, 1)
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the `|` family.
    fn scan_doubled(&mut self, start: usize, ch: u8, kinds: [TokenKind; 4]) -> Token<'s> {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(a), Some(b'=')) if a == ch => self.punct(kinds[3], start, 3),
            (Some(a), _) if a == ch => self.punct(kinds[2], start, 2),
            (Some(b'='), _) => self.punct(kinds[1], start, 2),
            _ => self.punct(kinds[0], start, 1),
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) -> Token<'s> {
        let mut decoded: Option<String> = None;
        let mut first = true;
        while let Some(b) = self.peek_byte() {
            if b == b'\\' {
                let escape_start = self.pos;
                self.pos += 1;
                let ch = match self.read_identifier_escape() {
                    Some(ch) if first && is_identifier_start(ch) => ch,
                    Some(ch) if !first && is_identifier_part(ch) => ch,
                    _ => {
                        let text = self.source[escape_start..self.pos].to_string();
                        return self.illegal(escape_start, ErrorCode::IllegalEscapeSequence, &[&text]);
                    }
                };
                decoded
                    .get_or_insert_with(|| self.source[start..escape_start].to_string())
                    .push(ch);
            } else {
                let Some(ch) = self.peek_char() else { break };
                let valid = if first { is_identifier_start(ch) } else { is_identifier_part(ch) };
                if !valid {
                    break;
                }
                if let Some(name) = decoded.as_mut() {
                    name.push(ch);
                }
                self.pos += ch.len_utf8();
            }
            first = false;
        }
        match decoded {
            Some(name) => self.make(TokenKind::Identifier, start, TokenValue::Ident { decoded: Some(name) }),
            None => {
                let kind = keyword_kind(&self.source[start..self.pos]).unwrap_or(TokenKind::Identifier);
                self.make(kind, start, TokenValue::None)
            }
        }
    }

    /// Read `uXXXX` or `u{X...}` after a backslash in an identifier.
    fn read_identifier_escape(&mut self) -> Option<char> {
        if !self.eat_byte(b'u') {
            return None;
        }
        char::from_u32(self.read_unicode_escape()?)
    }

    fn scan_private_name(&mut self, start: usize) -> Token<'s> {
        let name_start = start + 1;
        let starts_name = match self.byte_at(1) {
            Some(b'\\') => true,
            _ => self.source[name_start..].chars().next().is_some_and(is_identifier_start),
        };
        if !starts_name {
            return self.illegal_char(start);
        }
        self.pos = name_start;
        let name = self.scan_identifier(name_start);
        if name.kind == TokenKind::Illegal {
            return name;
        }
        let decoded = match name.value {
            TokenValue::Ident { decoded } => decoded,
            _ => None,
        };
        self.make(TokenKind::PrivateName, start, TokenValue::Ident { decoded })
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self, start: usize) -> Token<'s> {
        match self.read_number_body() {
            Ok(shape) => {
                if let Some(ch) = self.peek_char() {
                    if is_identifier_start(ch) || ch.is_ascii_digit() || ch == '\\' {
                        self.pos += ch.len_utf8();
                        return self.invalid_number(start);
                    }
                }
                let kind = if shape.bigint { TokenKind::BigInt } else { TokenKind::Num };
                self.make(kind, start, TokenValue::Num { legacy: shape.legacy })
            }
            Err(()) => {
                while self.peek_byte().is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_') {
                    self.pos += 1;
                }
                if self.pos == start {
                    self.pos += 1;
                }
                self.invalid_number(start)
            }
        }
    }

    fn invalid_number(&self, start: usize) -> Token<'s> {
        let text = &self.source[start..self.pos];
        self.illegal(start, ErrorCode::InvalidNumericLiteral, &[text])
    }

    fn read_number_body(&mut self) -> Result<NumberShape, ()> {
        let first = self.peek_byte();
        if first == Some(b'0') {
            let radix = match self.byte_at(1) {
                Some(b'x' | b'X') => 16,
                Some(b'o' | b'O') => 8,
                Some(b'b' | b'B') => 2,
                _ => 0,
            };
            if radix != 0 {
                self.pos += 2;
                if self.read_digits(radix, true)? == 0 {
                    return Err(());
                }
                let bigint = self.eat_byte(b'n');
                return Ok(NumberShape { legacy: false, bigint });
            }
            if matches!(self.byte_at(1), Some(b'0'..=b'9' | b'_')) {
                self.pos += 1;
                if self.peek_byte() == Some(b'_') {
                    return Err(());
                }
                let digits_start = self.pos;
                self.read_digits(10, false)?;
                let octal = self.bytes[digits_start..self.pos].iter().all(|&b| is_octal_digit(b));
                // `089.5` and `08e1` continue as decimals.
                if !octal {
                    self.read_fraction_and_exponent()?;
                }
                if matches!(self.peek_byte(), Some(b'n' | b'_')) {
                    return Err(());
                }
                return Ok(NumberShape { legacy: true, bigint: false });
            }
        }
        if first != Some(b'.') {
            self.read_digits(10, true)?;
        }
        let has_fraction = self.read_fraction_and_exponent()?;
        let bigint = !has_fraction && self.eat_byte(b'n');
        Ok(NumberShape { legacy: false, bigint })
    }

    /// Read an optional fraction and exponent; returns whether either was
    /// present.
    fn read_fraction_and_exponent(&mut self) -> Result<bool, ()> {
        let mut seen = false;
        if self.peek_byte() == Some(b'.') {
            seen = true;
            self.pos += 1;
            if self.peek_byte() == Some(b'_') {
                return Err(());
            }
            self.read_digits(10, true)?;
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            seen = true;
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.read_digits(10, true)? == 0 {
                return Err(());
            }
        }
        Ok(seen)
    }

    /// Read digits of `radix`, returning how many were read. Separators must
    /// sit between two digits.
    fn read_digits(&mut self, radix: u32, separators: bool) -> Result<usize, ()> {
        let mut count = 0;
        let mut last_was_separator = false;
        while let Some(b) = self.peek_byte() {
            if b == b'_' && separators {
                if count == 0 || last_was_separator {
                    return Err(());
                }
                last_was_separator = true;
            } else if (b as char).is_digit(radix) {
                count += 1;
                last_was_separator = false;
            } else {
                break;
            }
            self.pos += 1;
        }
        if last_was_separator {
            return Err(());
        }
        Ok(count)
    }

    // ========================================================================
    // Strings and escapes
    // ========================================================================

    fn scan_string(&mut self, start: usize, quote: u8) -> Token<'s> {
        self.pos += 1;
        let content_start = self.pos;
        let mut value: Option<String> = None;
        let mut legacy_octal = false;
        loop {
            let Some(b) = self.peek_byte() else {
                return self.illegal(start, ErrorCode::UnterminatedString, &[]);
            };
            if b == quote {
                let value = match value {
                    Some(owned) => Cow::Owned(owned),
                    None => Cow::Borrowed(&self.source[content_start..self.pos]),
                };
                self.pos += 1;
                return self.make(TokenKind::String, start, TokenValue::Str { value, legacy_octal });
            }
            match b {
                b'\n' | b'\r' => return self.illegal(start, ErrorCode::UnterminatedString, &[]),
                b'\\' => {
                    let out = value.get_or_insert_with(|| self.source[content_start..self.pos].to_string());
                    self.pos += 1;
                    match self.read_escape(out, false) {
                        Ok(legacy) => legacy_octal |= legacy,
                        Err(err) => {
                            let start = err.range.lo as usize;
                            return self.make(TokenKind::Illegal, start, TokenValue::Error(err));
                        }
                    }
                }
                _ => {
                    let ch = self.peek_char().unwrap_or('\u{FFFD}');
                    if let Some(out) = value.as_mut() {
                        out.push(ch);
                    }
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// Decode one escape sequence, the backslash already consumed, into
    /// `out`. Returns whether it was a legacy octal or `\8`/`\9` escape.
    /// Template literals reject those.
    fn read_escape(&mut self, out: &mut String, template: bool) -> Result<bool, LexError> {
        let escape_start = self.pos - 1;
        let Some(ch) = self.peek_char() else {
            let code = if template { ErrorCode::UnterminatedTemplate } else { ErrorCode::UnterminatedString };
            return Err(LexError::new(code, self.range_from(escape_start), &[]));
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '\r' => {
                self.eat_byte(b'\n');
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            '0' if !self.peek_byte().is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            '0'..='7' => {
                if template {
                    return Err(self.escape_error(escape_start, "octal escapes are not allowed in templates"));
                }
                let max_len = if ch <= '3' { 3 } else { 2 };
                let mut code = ch as u32 - '0' as u32;
                let mut len = 1;
                while len < max_len {
                    match self.peek_byte() {
                        Some(b) if is_octal_digit(b) => {
                            code = code * 8 + (b - b'0') as u32;
                            self.pos += 1;
                            len += 1;
                        }
                        _ => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                return Ok(true);
            }
            '8' | '9' => {
                if template {
                    return Err(self.escape_error(escape_start, "\\8 and \\9 are not allowed in templates"));
                }
                out.push(ch);
                return Ok(true);
            }
            'x' => {
                let code = self
                    .read_hex(2)
                    .ok_or_else(|| self.escape_error(escape_start, "expected two hexadecimal digits"))?;
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            'u' => {
                let code = self
                    .read_unicode_escape()
                    .ok_or_else(|| self.escape_error(escape_start, "malformed Unicode escape"))?;
                out.push(self.combine_surrogates(code));
            }
            other => out.push(other),
        }
        Ok(false)
    }

    fn escape_error(&self, start: usize, reason: &str) -> LexError {
        LexError::new(ErrorCode::IllegalEscapeSequence, self.range_from(start), &[reason])
    }

    /// Pair a high surrogate with a following `\uDCxx` escape. Lone
    /// surrogates decode to U+FFFD.
    fn combine_surrogates(&mut self, code: u32) -> char {
        if (0xD800..0xDC00).contains(&code) && self.bytes[self.pos..].starts_with(b"\\u") {
            let save = self.pos;
            self.pos += 2;
            match self.read_unicode_escape() {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).unwrap_or('\u{FFFD}');
                }
                _ => self.pos = save,
            }
        }
        char::from_u32(code).unwrap_or('\u{FFFD}')
    }

    fn read_hex(&mut self, count: usize) -> Option<u32> {
        let mut value = 0;
        for _ in 0..count {
            let digit = (self.peek_byte()? as char).to_digit(16)?;
            value = value * 16 + digit;
            self.pos += 1;
        }
        Some(value)
    }

    /// `XXXX` or `{X...}` after `\u`. Code points above U+10FFFF fail.
    fn read_unicode_escape(&mut self) -> Option<u32> {
        if !self.eat_byte(b'{') {
            return self.read_hex(4);
        }
        let mut value: u32 = 0;
        let mut digits = 0;
        while let Some(digit) = self.peek_byte().and_then(|b| (b as char).to_digit(16)) {
            value = value.checked_mul(16)?.checked_add(digit)?;
            if value > 0x10FFFF {
                return None;
            }
            digits += 1;
            self.pos += 1;
        }
        if digits == 0 || !self.eat_byte(b'}') {
            return None;
        }
        Some(value)
    }

    // ========================================================================
    // Regular expressions
    // ========================================================================

    fn scan_regexp(&mut self, start: usize) -> Token<'s> {
        self.pos = start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.peek_char() else {
                return self.illegal(start, ErrorCode::UnterminatedRegExp, &[]);
            };
            if is_line_break(ch) {
                return self.illegal(start, ErrorCode::UnterminatedRegExp, &[]);
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => match self.peek_char() {
                    Some(next) if !is_line_break(next) => self.pos += next.len_utf8(),
                    _ => return self.illegal(start, ErrorCode::UnterminatedRegExp, &[]),
                },
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        let pattern_end = self.pos - 1;
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let value = TokenValue::RegExp {
            pattern: &self.source[start + 1..pattern_end],
            flags: &self.source[pattern_end + 1..self.pos],
        };
        self.make(TokenKind::RegExp, start, value)
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Scan literal text up to `${` or the closing back-quote. The token
    /// range includes the terminator.
    fn scan_template_span(&mut self) -> Token<'s> {
        let start = self.pos;
        let mut cooked = String::new();
        let mut plain = true;
        let mut has_cr = false;
        let mut illegal_escape: Option<LexError> = None;
        loop {
            let Some(b) = self.peek_byte() else {
                return self.illegal(start, ErrorCode::UnterminatedTemplate, &[]);
            };
            match b {
                b'`' => {
                    let raw_end = self.pos;
                    self.pos += 1;
                    return self.template_token(start, raw_end, true, cooked, plain, has_cr, illegal_escape);
                }
                b'$' if self.byte_at(1) == Some(b'{') => {
                    let raw_end = self.pos;
                    self.pos += 2;
                    return self.template_token(start, raw_end, false, cooked, plain, has_cr, illegal_escape);
                }
                b'\\' => {
                    plain = false;
                    self.pos += 1;
                    if let Err(err) = self.read_escape(&mut cooked, true) {
                        if err.code == ErrorCode::UnterminatedTemplate {
                            return self.illegal(start, ErrorCode::UnterminatedTemplate, &[]);
                        }
                        illegal_escape.get_or_insert(err);
                    }
                }
                b'\r' => {
                    has_cr = true;
                    self.pos += 1;
                    self.eat_byte(b'\n');
                    cooked.push('\n');
                }
                _ => {
                    let ch = self.peek_char().unwrap_or('\u{FFFD}');
                    cooked.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn template_token(
        &self,
        start: usize,
        raw_end: usize,
        tail: bool,
        cooked: String,
        plain: bool,
        has_cr: bool,
        illegal_escape: Option<LexError>,
    ) -> Token<'s> {
        let text = &self.source[start..raw_end];
        let raw = if has_cr {
            Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Cow::Borrowed(text)
        };
        let value = TemplateValue {
            cooked: if illegal_escape.is_some() { None } else { Some(cooked) },
            raw,
            tail,
            plain,
            illegal_escape,
        };
        self.make(TokenKind::TemplateSpan, start, TokenValue::Template(Box::new(value)))
    }

    // ========================================================================
    // JSX
    // ========================================================================

    fn scan_jsx_tag(&mut self) -> Token<'s> {
        let after_line_term = match self.skip_trivia_or_illegal() {
            Ok(newline) => newline,
            Err(token) => return token,
        };
        let start = self.pos;
        let Some(b) = self.peek_byte() else {
            return self.make(TokenKind::Eof, start, TokenValue::None);
        };
        let mut token = match b {
            b'"' | b'\'' => self.scan_jsx_string(start, b),
            b'.' => self.punct(TokenKind::Dot, start, 1),
            b':' => self.punct(TokenKind::Colon, start, 1),
            b'>' => self.punct(TokenKind::Gt, start, 1),
            b'<' => self.punct(TokenKind::Lt, start, 1),
            b'/' => self.punct(TokenKind::Slash, start, 1),
            b'=' => self.punct(TokenKind::Eq, start, 1),
            b'{' => self.punct(TokenKind::LBrace, start, 1),
            b'}' => self.punct(TokenKind::RBrace, start, 1),
            _ => match self.peek_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_jsx_name(start),
                _ => self.illegal_char(start),
            },
        };
        token.after_line_term = after_line_term;
        token
    }

    /// A JSX identifier: an identifier that may also contain `-`.
    fn scan_jsx_name(&mut self, start: usize) -> Token<'s> {
        while let Some(ch) = self.peek_char() {
            if !(is_identifier_part(ch) || ch == '-') {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.make(TokenKind::JsxName, start, TokenValue::None)
    }

    /// JSX strings have no escapes; character references are decoded.
    fn scan_jsx_string(&mut self, start: usize, quote: u8) -> Token<'s> {
        let content_start = start + 1;
        let Some(len) = memchr::memchr(quote, &self.bytes[content_start..]) else {
            self.pos = self.bytes.len();
            return self.illegal(start, ErrorCode::UnterminatedString, &[]);
        };
        self.pos = content_start + len + 1;
        let value = decode_entities(&self.source[content_start..content_start + len]);
        self.make(
            TokenKind::JsxString,
            start,
            TokenValue::Str {
                value,
                legacy_octal: false,
            },
        )
    }

    fn scan_jsx_attr_value(&mut self) -> Token<'s> {
        let after_line_term = match self.skip_trivia_or_illegal() {
            Ok(newline) => newline,
            Err(token) => return token,
        };
        let start = self.pos;
        let mut token = match self.peek_byte() {
            None => self.make(TokenKind::Eof, start, TokenValue::None),
            Some(quote @ (b'"' | b'\'')) => self.scan_jsx_string(start, quote),
            Some(b'{') => self.punct(TokenKind::LBrace, start, 1),
            Some(b'<') => self.punct(TokenKind::Lt, start, 1),
            Some(_) => {
                let ch = self.peek_char().unwrap_or('\u{FFFD}');
                self.pos += ch.len_utf8();
                self.illegal(
                    start,
                    ErrorCode::InvalidJsxAttribute,
                    &["must be assigned a string, an expression or an element"],
                )
            }
        };
        token.after_line_term = after_line_term;
        token
    }

    /// Text between tags is kept with its exact whitespace.
    fn scan_jsx_child(&mut self) -> Token<'s> {
        let start = self.pos;
        match self.peek_byte() {
            None => self.make(TokenKind::Eof, start, TokenValue::None),
            Some(b'<') => self.punct(TokenKind::Lt, start, 1),
            Some(b'{') => self.punct(TokenKind::LBrace, start, 1),
            Some(_) => {
                self.pos = memchr::memchr2(b'<', b'{', &self.bytes[start..])
                    .map_or(self.bytes.len(), |len| start + len);
                let value = decode_entities(&self.source[start..self.pos]);
                self.make(TokenKind::JsxText, start, TokenValue::JsxText { value })
            }
        }
    }
}

/// Scan `source` in normal mode up to, not including, `Eof`.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next();
        if token.kind == TokenKind::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}
