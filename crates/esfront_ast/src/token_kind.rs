//! Token kinds and their static syntactic properties.
//!
//! Every kind carries a display name, a binary precedence (0 when the kind is
//! not a binary operator), right associativity, `before_expr` (the next `/`
//! starts a regular expression) and `starts_expr` (the kind can begin an
//! expression). The properties live in [`TOKEN_KINDS`], indexed by the kind's
//! discriminant.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// The next `/` after this token starts a regular expression.
const BE: u8 = 1 << 0;
/// The token can start an expression.
const SE: u8 = 1 << 1;
/// Right associative binary operator.
const RA: u8 = 1 << 2;
/// Reserved word.
const KW: u8 = 1 << 3;
/// Contextual keyword, usable as an identifier.
const CX: u8 = 1 << 4;

/// Static properties of one token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenKindInfo {
    /// Display name. For keywords and punctuators this is the source text.
    pub name: &'static str,
    /// Binary precedence, 0 when the kind is not a binary operator.
    pub prec: u8,
    pub right_assoc: bool,
    pub before_expr: bool,
    pub starts_expr: bool,
    pub keyword: bool,
    pub contextual: bool,
}

impl TokenKindInfo {
    const fn new(name: &'static str, prec: u8, flags: u8) -> Self {
        Self {
            name,
            prec,
            right_assoc: flags & RA != 0,
            before_expr: flags & BE != 0,
            starts_expr: flags & SE != 0,
            keyword: flags & KW != 0,
            contextual: flags & CX != 0,
        }
    }
}

macro_rules! define_token_kinds {
    ($($variant:ident => $name:literal, $prec:literal, $flags:expr;)*) => {
        /// The kind of a lexical token.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            /// Every kind, in discriminant order.
            pub const ALL: [TokenKind; TokenKind::COUNT] = [$(TokenKind::$variant,)*];
            /// Number of token kinds.
            pub const COUNT: usize = [$($name,)*].len();
        }

        /// Static property table, indexed by `TokenKind as usize`.
        pub static TOKEN_KINDS: [TokenKindInfo; TokenKind::COUNT] = [
            $(TokenKindInfo::new($name, $prec, $flags),)*
        ];
    };
}

define_token_kinds! {
    // Special
    Eof => "EOF", 0, 0;
    Illegal => "Illegal", 0, 0;

    // Literals and names
    Identifier => "Identifier", 0, SE;
    PrivateName => "PrivateName", 0, SE;
    Num => "Num", 0, SE;
    BigInt => "BigInt", 0, SE;
    String => "String", 0, SE;
    RegExp => "RegExp", 0, SE;
    TemplateStart => "`", 0, SE;
    TemplateSpan => "TemplateSpan", 0, 0;

    // JSX
    JsxName => "JsxName", 0, 0;
    JsxString => "JsxString", 0, 0;
    JsxText => "JsxText", 0, 0;

    // Punctuation
    LBrace => "{", 0, BE | SE;
    RBrace => "}", 0, 0;
    LParen => "(", 0, BE | SE;
    RParen => ")", 0, 0;
    LBracket => "[", 0, BE | SE;
    RBracket => "]", 0, 0;
    Semi => ";", 0, BE;
    Comma => ",", 0, BE;
    Dot => ".", 0, 0;
    Ellipsis => "...", 0, BE;
    QuestionDot => "?.", 0, 0;
    Question => "?", 0, BE;
    Colon => ":", 0, BE;
    Arrow => "=>", 0, BE;

    // Assignment
    Eq => "=", 0, BE;
    PlusEq => "+=", 0, BE;
    MinusEq => "-=", 0, BE;
    StarEq => "*=", 0, BE;
    SlashEq => "/=", 0, BE | SE;
    PercentEq => "%=", 0, BE;
    StarStarEq => "**=", 0, BE;
    ShlEq => "<<=", 0, BE;
    ShrEq => ">>=", 0, BE;
    UShrEq => ">>>=", 0, BE;
    BitAndEq => "&=", 0, BE;
    BitOrEq => "|=", 0, BE;
    BitXorEq => "^=", 0, BE;
    AndAndEq => "&&=", 0, BE;
    OrOrEq => "||=", 0, BE;
    NullishEq => "??=", 0, BE;

    // Binary
    Nullish => "??", 5, BE;
    OrOr => "||", 6, BE;
    AndAnd => "&&", 7, BE;
    BitOr => "|", 8, BE;
    BitXor => "^", 9, BE;
    BitAnd => "&", 10, BE;
    EqEq => "==", 11, BE;
    NotEq => "!=", 11, BE;
    EqEqEq => "===", 11, BE;
    NotEqEq => "!==", 11, BE;
    Lt => "<", 12, BE | SE;
    Gt => ">", 12, BE;
    LtEq => "<=", 12, BE;
    GtEq => ">=", 12, BE;
    Shl => "<<", 13, BE;
    Shr => ">>", 13, BE;
    UShr => ">>>", 13, BE;
    Plus => "+", 14, BE | SE;
    Minus => "-", 14, BE | SE;
    Star => "*", 15, BE;
    Slash => "/", 15, BE | SE;
    Percent => "%", 15, BE;
    StarStar => "**", 16, BE | RA;

    // Unary and update
    Bang => "!", 0, BE | SE;
    Tilde => "~", 0, BE | SE;
    PlusPlus => "++", 0, SE;
    MinusMinus => "--", 0, SE;

    // Reserved words
    Break => "break", 0, KW;
    Case => "case", 0, BE | KW;
    Catch => "catch", 0, KW;
    Class => "class", 0, SE | KW;
    Const => "const", 0, KW;
    Continue => "continue", 0, KW;
    Debugger => "debugger", 0, KW;
    Default => "default", 0, BE | KW;
    Delete => "delete", 0, BE | SE | KW;
    Do => "do", 0, BE | KW;
    Else => "else", 0, BE | KW;
    Enum => "enum", 0, KW;
    Export => "export", 0, KW;
    Extends => "extends", 0, BE | KW;
    False => "false", 0, SE | KW;
    Finally => "finally", 0, KW;
    For => "for", 0, KW;
    Function => "function", 0, SE | KW;
    If => "if", 0, KW;
    Import => "import", 0, SE | KW;
    In => "in", 12, BE | KW;
    Instanceof => "instanceof", 12, BE | KW;
    New => "new", 0, BE | SE | KW;
    Null => "null", 0, SE | KW;
    Return => "return", 0, BE | KW;
    Super => "super", 0, SE | KW;
    Switch => "switch", 0, KW;
    This => "this", 0, SE | KW;
    Throw => "throw", 0, BE | KW;
    True => "true", 0, SE | KW;
    Try => "try", 0, KW;
    Typeof => "typeof", 0, BE | SE | KW;
    Var => "var", 0, KW;
    Void => "void", 0, BE | SE | KW;
    While => "while", 0, KW;
    With => "with", 0, KW;

    // Contextual keywords
    Async => "async", 0, SE | CX;
    Await => "await", 0, BE | SE | CX;
    Yield => "yield", 0, BE | SE | CX;
    Let => "let", 0, SE | CX;
    Static => "static", 0, SE | CX;
    Of => "of", 0, BE | SE | CX;
    Get => "get", 0, SE | CX;
    Set => "set", 0, SE | CX;
    As => "as", 12, BE | SE | CX;
    Satisfies => "satisfies", 12, BE | SE | CX;
    Type => "type", 0, SE | CX;
    Interface => "interface", 0, SE | CX;
    Implements => "implements", 0, SE | CX;
    Public => "public", 0, SE | CX;
    Private => "private", 0, SE | CX;
    Protected => "protected", 0, SE | CX;
    Readonly => "readonly", 0, SE | CX;
    Abstract => "abstract", 0, SE | CX;
    Keyof => "keyof", 0, SE | CX;
}

impl TokenKind {
    /// The static properties of this kind.
    #[inline]
    pub fn info(self) -> &'static TokenKindInfo {
        &TOKEN_KINDS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Binary precedence, 0 when not a binary operator.
    #[inline]
    pub fn precedence(self) -> u8 {
        self.info().prec
    }

    #[inline]
    pub fn is_right_assoc(self) -> bool {
        self.info().right_assoc
    }

    #[inline]
    pub fn before_expr(self) -> bool {
        self.info().before_expr
    }

    #[inline]
    pub fn starts_expr(self) -> bool {
        self.info().starts_expr
    }

    /// Reserved words (`if`, `class`, ...).
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.info().keyword
    }

    /// Words with special meaning only in some positions (`async`, `of`, ...).
    #[inline]
    pub fn is_contextual(self) -> bool {
        self.info().contextual
    }

    /// Kinds usable where an identifier reference or binding is expected.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        self == TokenKind::Identifier || self.is_contextual()
    }

    /// Kinds usable as a property name after `.` or as an object key.
    #[inline]
    pub fn is_identifier_name(self) -> bool {
        self.is_identifier_like() || self.is_keyword()
    }

    /// `=` and the compound assignment operators.
    pub fn is_assign(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::StarStarEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::UShrEq
                | TokenKind::BitAndEq
                | TokenKind::BitOrEq
                | TokenKind::BitXorEq
                | TokenKind::AndAndEq
                | TokenKind::OrOrEq
                | TokenKind::NullishEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    TokenKind::ALL
        .iter()
        .filter(|kind| kind.is_keyword() || kind.is_contextual())
        .map(|&kind| (kind.name(), kind))
        .collect()
});

/// Look up the keyword or contextual keyword spelled by `word`.
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word).copied()
}
