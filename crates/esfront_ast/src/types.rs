//! Operator enums, flag types and small value types shared by AST nodes.

use crate::token_kind::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags::bitflags! {
    /// Modifiers written on class members and constructor parameters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u16 {
        const NONE              = 0;
        const PUBLIC            = 1 << 0;
        const PRIVATE           = 1 << 1;
        const PROTECTED         = 1 << 2;
        const STATIC            = 1 << 3;
        const READONLY          = 1 << 4;
        const ABSTRACT          = 1 << 5;
        const ASYNC             = 1 << 6;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits();
    }
}

impl ModifierFlags {
    /// The flag written by a modifier keyword, if the kind is one.
    pub fn from_token(kind: TokenKind) -> Option<ModifierFlags> {
        Some(match kind {
            TokenKind::Public => ModifierFlags::PUBLIC,
            TokenKind::Private => ModifierFlags::PRIVATE,
            TokenKind::Protected => ModifierFlags::PROTECTED,
            TokenKind::Static => ModifierFlags::STATIC,
            TokenKind::Readonly => ModifierFlags::READONLY,
            TokenKind::Abstract => ModifierFlags::ABSTRACT,
            _ => return None,
        })
    }
}

/// Whether the input is a classic script or an ES module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

/// The keyword of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// Kind of an object literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    Init,
    Get,
    Set,
}

/// Kind of a class method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

macro_rules! operator_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal, $kind:ident;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// The operator as written in source.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }

            /// The operator spelled by a token kind.
            pub fn from_token(kind: TokenKind) -> Option<Self> {
                match kind {
                    $(TokenKind::$kind => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operator_enum! {
    /// Non-logical binary operators.
    BinaryOp {
        EqEq => "==", EqEq;
        NotEq => "!=", NotEq;
        EqEqEq => "===", EqEqEq;
        NotEqEq => "!==", NotEqEq;
        Lt => "<", Lt;
        LtEq => "<=", LtEq;
        Gt => ">", Gt;
        GtEq => ">=", GtEq;
        Shl => "<<", Shl;
        Shr => ">>", Shr;
        UShr => ">>>", UShr;
        Add => "+", Plus;
        Sub => "-", Minus;
        Mul => "*", Star;
        Div => "/", Slash;
        Mod => "%", Percent;
        Exp => "**", StarStar;
        BitOr => "|", BitOr;
        BitXor => "^", BitXor;
        BitAnd => "&", BitAnd;
        In => "in", In;
        InstanceOf => "instanceof", Instanceof;
    }
}

operator_enum! {
    /// Short-circuiting operators.
    LogicalOp {
        Or => "||", OrOr;
        And => "&&", AndAnd;
        Nullish => "??", Nullish;
    }
}

operator_enum! {
    /// Assignment operators.
    AssignOp {
        Assign => "=", Eq;
        AddAssign => "+=", PlusEq;
        SubAssign => "-=", MinusEq;
        MulAssign => "*=", StarEq;
        DivAssign => "/=", SlashEq;
        ModAssign => "%=", PercentEq;
        ExpAssign => "**=", StarStarEq;
        ShlAssign => "<<=", ShlEq;
        ShrAssign => ">>=", ShrEq;
        UShrAssign => ">>>=", UShrEq;
        BitAndAssign => "&=", BitAndEq;
        BitOrAssign => "|=", BitOrEq;
        BitXorAssign => "^=", BitXorEq;
        AndAssign => "&&=", AndAndEq;
        OrAssign => "||=", OrOrEq;
        NullishAssign => "??=", NullishEq;
    }
}

operator_enum! {
    /// Prefix unary operators.
    UnaryOp {
        Not => "!", Bang;
        BitNot => "~", Tilde;
        Plus => "+", Plus;
        Minus => "-", Minus;
        TypeOf => "typeof", Typeof;
        Void => "void", Void;
        Delete => "delete", Delete;
    }
}

operator_enum! {
    /// `++` and `--`.
    UpdateOp {
        Increment => "++", PlusPlus;
        Decrement => "--", MinusMinus;
    }
}

/// TypeScript keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsKeywordKind {
    Any,
    Unknown,
    Number,
    String,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Never,
    Void,
    Undefined,
    Null,
    This,
}

impl TsKeywordKind {
    /// The keyword type spelled by `name`, for names that are not reserved
    /// words (`void`, `null` and `this` are matched by token kind).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" => TsKeywordKind::Any,
            "unknown" => TsKeywordKind::Unknown,
            "number" => TsKeywordKind::Number,
            "string" => TsKeywordKind::String,
            "boolean" => TsKeywordKind::Boolean,
            "bigint" => TsKeywordKind::BigInt,
            "symbol" => TsKeywordKind::Symbol,
            "object" => TsKeywordKind::Object,
            "never" => TsKeywordKind::Never,
            "undefined" => TsKeywordKind::Undefined,
            _ => return None,
        })
    }
}

/// TypeScript type operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsTypeOperatorKind {
    KeyOf,
}
